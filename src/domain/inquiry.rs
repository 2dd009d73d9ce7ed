use super::{
    date::{self, EventDate},
    id::{InquirerId, LocationId, SocialId},
};

/// A person asking after a missing victim.
///
/// Identity for deduplication is the (first name, last name, phone) tuple,
/// not the value itself: registering a second inquirer with the same tuple
/// routes to the existing entry and its interaction history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquirer {
    first_name: String,
    last_name: String,
    services_phone: String,
    info: Option<String>,
    interactions: Vec<String>,
}

impl Inquirer {
    /// Creates an inquirer with an empty interaction log.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        services_phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            services_phone: services_phone.into(),
            info: None,
            interactions: Vec::new(),
        }
    }

    /// Returns the first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the phone number used for service callbacks.
    #[must_use]
    pub fn services_phone(&self) -> &str {
        &self.services_phone
    }

    /// Returns any free-text info held about the inquirer.
    #[must_use]
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// Replaces the free-text info.
    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = Some(info.into());
    }

    /// Returns the interaction log, oldest first.
    #[must_use]
    pub fn interactions(&self) -> &[String] {
        &self.interactions
    }

    /// Appends an interaction to the log.
    pub fn add_interaction(&mut self, text: impl Into<String>) {
        self.interactions.push(text.into());
    }

    /// Returns whether `self` and `other` are the same person by the
    /// deduplication tuple.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        self.matches(&other.first_name, &other.last_name, &other.services_phone)
    }

    /// Returns whether the identity tuple matches the given fields.
    #[must_use]
    pub fn matches(&self, first_name: &str, last_name: &str, phone: &str) -> bool {
        self.first_name == first_name
            && self.last_name == last_name
            && self.services_phone == phone
    }
}

/// One logged inquiry: who asked, about whom, and what they knew.
///
/// The missing person and last known location are held by ID. The inquiry
/// date is shape-checked only; inquiries about events before 2020 are
/// legitimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryRecord {
    inquirer: InquirerId,
    missing_person: SocialId,
    date_of_inquiry: EventDate,
    info_provided: String,
    last_known_location: LocationId,
}

impl InquiryRecord {
    /// Creates an inquiry record, validating the date format.
    ///
    /// # Errors
    ///
    /// Returns [`date::Error::Malformed`] when the date is not a `YYYY-MM-DD`
    /// string.
    pub fn new(
        inquirer: InquirerId,
        missing_person: SocialId,
        date_of_inquiry: &str,
        info_provided: impl Into<String>,
        last_known_location: LocationId,
    ) -> Result<Self, date::Error> {
        Ok(Self {
            inquirer,
            missing_person,
            date_of_inquiry: EventDate::parse(date_of_inquiry)?,
            info_provided: info_provided.into(),
            last_known_location,
        })
    }

    /// Returns the registry handle of the inquirer.
    #[must_use]
    pub const fn inquirer(&self) -> InquirerId {
        self.inquirer
    }

    /// Returns the social ID of the person asked about.
    #[must_use]
    pub const fn missing_person(&self) -> SocialId {
        self.missing_person
    }

    /// Returns the inquiry date.
    #[must_use]
    pub const fn date_of_inquiry(&self) -> EventDate {
        self.date_of_inquiry
    }

    /// Returns the information the inquirer provided.
    #[must_use]
    pub fn info_provided(&self) -> &str {
        &self.info_provided
    }

    /// Returns the ID of the last known location.
    #[must_use]
    pub const fn last_known_location(&self) -> LocationId {
        self.last_known_location
    }
}
