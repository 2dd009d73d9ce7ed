use super::{
    date::{self, EventDate},
    id::LocationId,
};

/// A dated treatment record for a victim.
///
/// The treatment location is held by ID; the record does not own the
/// location. Treatment dates share the entry-date window of
/// `[2020-01-01, today]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicalRecord {
    location: LocationId,
    treatment_details: String,
    date_of_treatment: EventDate,
}

impl MedicalRecord {
    /// Creates a record, validating the treatment date.
    ///
    /// # Errors
    ///
    /// Returns [`date::Error::Malformed`] or [`date::Error::OutOfRange`] when
    /// the date is not a valid `YYYY-MM-DD` string within the window.
    pub fn new(
        location: LocationId,
        treatment_details: impl Into<String>,
        date_of_treatment: &str,
    ) -> Result<Self, date::Error> {
        Ok(Self {
            location,
            treatment_details: treatment_details.into(),
            date_of_treatment: EventDate::parse_in_window(date_of_treatment)?,
        })
    }

    /// Returns the ID of the location where treatment took place.
    #[must_use]
    pub const fn location(&self) -> LocationId {
        self.location
    }

    /// Returns the treatment details.
    #[must_use]
    pub fn treatment_details(&self) -> &str {
        &self.treatment_details
    }

    /// Returns the treatment date.
    #[must_use]
    pub const fn date_of_treatment(&self) -> EventDate {
        self.date_of_treatment
    }

    /// Replaces the treatment details.
    pub fn set_treatment_details(&mut self, details: impl Into<String>) {
        self.treatment_details = details.into();
    }

    /// Replaces the treatment date, revalidating it.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`MedicalRecord::new`].
    pub fn set_date_of_treatment(&mut self, date: &str) -> Result<(), date::Error> {
        self.date_of_treatment = EventDate::parse_in_window(date)?;
        Ok(())
    }
}
