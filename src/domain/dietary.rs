use std::{fmt, str::FromStr};

use super::ErrorKind;

/// The fixed set of dietary restriction codes.
///
/// These are the airline-style 4-letter meal codes the intake form accepts;
/// the set is closed and not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DietaryCode {
    /// Asian vegetarian meal.
    Avml,
    /// Diabetic meal.
    Dbml,
    /// Gluten intolerant meal.
    Gfml,
    /// Kosher meal.
    Ksml,
    /// Low salt meal.
    Lsml,
    /// Muslim meal.
    Moml,
    /// Peanut-free meal.
    Pfml,
    /// Vegan meal.
    Vgml,
    /// Vegetarian Jain meal.
    Vjml,
}

impl DietaryCode {
    /// Every code, in listing order.
    pub const ALL: [Self; 9] = [
        Self::Avml,
        Self::Dbml,
        Self::Gfml,
        Self::Ksml,
        Self::Lsml,
        Self::Moml,
        Self::Pfml,
        Self::Vgml,
        Self::Vjml,
    ];

    /// Returns the 4-letter code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Avml => "AVML",
            Self::Dbml => "DBML",
            Self::Gfml => "GFML",
            Self::Ksml => "KSML",
            Self::Lsml => "LSML",
            Self::Moml => "MOML",
            Self::Pfml => "PFML",
            Self::Vgml => "VGML",
            Self::Vjml => "VJML",
        }
    }

    /// Returns the meal name shown when listing codes.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Avml => "Asian Vegetarian Meal",
            Self::Dbml => "Diabetic Meal",
            Self::Gfml => "Gluten Intolerant Meal",
            Self::Ksml => "Kosher Meal",
            Self::Lsml => "Low Salt Meal",
            Self::Moml => "Muslim Meal",
            Self::Pfml => "Peanut-Free Meal",
            Self::Vgml => "Vegan Meal",
            Self::Vjml => "Vegetarian Jain Meal",
        }
    }
}

impl fmt::Display for DietaryCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for DietaryCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AVML" => Ok(Self::Avml),
            "DBML" => Ok(Self::Dbml),
            "GFML" => Ok(Self::Gfml),
            "KSML" => Ok(Self::Ksml),
            "LSML" => Ok(Self::Lsml),
            "MOML" => Ok(Self::Moml),
            "PFML" => Ok(Self::Pfml),
            "VGML" => Ok(Self::Vgml),
            "VJML" => Ok(Self::Vjml),
            _ => Err(ParseCodeError(s.to_string())),
        }
    }
}

/// Error returned for a string that is not one of the nine accepted codes.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown dietary restriction code '{0}'")]
pub struct ParseCodeError(String);

impl ParseCodeError {
    /// The taxonomy bucket for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("AVML", DietaryCode::Avml)]
    #[test_case("avml", DietaryCode::Avml; "lowercase is accepted")]
    #[test_case("KSML", DietaryCode::Ksml)]
    #[test_case("vjml", DietaryCode::Vjml)]
    fn parse_accepts_known_codes(input: &str, expected: DietaryCode) {
        assert_eq!(input.parse::<DietaryCode>().unwrap(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("XXXX"; "unknown code")]
    #[test_case("AVM"; "truncated")]
    #[test_case("AVMLX"; "too long")]
    fn parse_rejects_unknown_codes(input: &str) {
        let err = input.parse::<DietaryCode>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn round_trips_through_code() {
        for code in DietaryCode::ALL {
            assert_eq!(code.code().parse::<DietaryCode>().unwrap(), code);
        }
    }

    #[test]
    fn every_code_has_a_description() {
        for code in DietaryCode::ALL {
            assert!(!code.description().is_empty());
        }
    }
}
