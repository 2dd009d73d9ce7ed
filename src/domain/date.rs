//! Calendar dates entered as `YYYY-MM-DD` strings.
//!
//! Two failure modes are kept distinct so callers can tell a typo from a
//! plausible-but-unacceptable date: [`Error::Malformed`] for strings that are
//! not ISO-shaped (or name an impossible day), and [`Error::OutOfRange`] for
//! well-formed dates outside the accepted window.

use std::{fmt, str::FromStr, sync::LazyLock};

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;

use super::ErrorKind;

/// The earliest year accepted for entry and treatment dates.
const WINDOW_START_YEAR: i32 = 2020;

static ISO_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("hard-coded pattern is valid"));

/// A validated calendar date.
///
/// Construct with [`EventDate::parse`] for format-only validation (dates of
/// birth, inquiry dates) or [`EventDate::parse_in_window`] for dates that must
/// fall in `[2020-01-01, today]` (entry dates, treatment dates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventDate(NaiveDate);

impl EventDate {
    /// Parses a `YYYY-MM-DD` string, checking format only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the string is not ISO-shaped or does
    /// not name a real calendar date.
    pub fn parse(value: &str) -> Result<Self, Error> {
        if !ISO_SHAPE.is_match(value) {
            return Err(Error::Malformed(value.to_string()));
        }
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|_| Error::Malformed(value.to_string()))?;
        Ok(Self(date))
    }

    /// Parses a `YYYY-MM-DD` string and checks it falls in
    /// `[2020-01-01, today]` inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] for strings that fail [`Self::parse`], or
    /// [`Error::OutOfRange`] for dates before 2020 or after today.
    pub fn parse_in_window(value: &str) -> Result<Self, Error> {
        let date = Self::parse(value)?;
        let today = Local::now().date_naive();
        if date.0.year() < WINDOW_START_YEAR || date.0 > today {
            return Err(Error::OutOfRange(value.to_string()));
        }
        Ok(date)
    }

    /// Returns the underlying calendar date.
    #[must_use]
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for EventDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors from parsing or range-checking a date string.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The string is not a well-formed `YYYY-MM-DD` date.
    #[error("invalid date '{0}': expected format YYYY-MM-DD")]
    Malformed(String),

    /// The date parsed but falls outside `[2020-01-01, today]`.
    #[error("date '{0}' must be between 2020-01-01 and today")]
    OutOfRange(String),
}

impl Error {
    /// The taxonomy bucket for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Malformed(_) | Self::OutOfRange(_) => ErrorKind::Validation,
        }
    }
}
