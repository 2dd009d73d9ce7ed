use std::collections::BTreeSet;

use super::{
    ErrorKind,
    config::Config,
    date::{self, EventDate},
    dietary::DietaryCode,
    id::{LocationId, SocialId},
    medical::MedicalRecord,
    relation::FamilyRelation,
    supply::{Supply, SupplyKind},
};

/// The oldest approximate age a victim record accepts.
const MAX_APPROXIMATE_AGE: u32 = 150;

/// A displaced person tracked by the registry.
///
/// A victim is created through [`Registry::admit_victim`], which validates the
/// entry date and issues the social ID before the record exists. The record
/// itself holds demographic fields, dietary restrictions, personal belongings,
/// medical records, and family connections. Cross-entity fields (the assigned
/// location, belongings issued from a location's inventory) are maintained by
/// the registry so that both sides stay consistent.
///
/// [`Registry::admit_victim`]: super::registry::Registry::admit_victim
#[derive(Debug, Clone)]
pub struct Victim {
    social_id: SocialId,
    first_name: String,
    last_name: Option<String>,
    date_of_birth: Option<EventDate>,
    approximate_age: Option<u32>,
    entry_date: EventDate,
    gender: Option<String>,
    comments: Option<String>,
    dietary_restrictions: BTreeSet<DietaryCode>,
    belongings: Vec<Supply>,
    medical_records: Vec<MedicalRecord>,
    family_connections: Vec<FamilyRelation>,
    location: Option<LocationId>,
}

impl Victim {
    /// Creates a victim record from pre-validated parts.
    ///
    /// The social ID must come from the registry's counter and the entry date
    /// must already have passed [`EventDate::parse_in_window`].
    #[must_use]
    pub(crate) fn new(
        social_id: SocialId,
        first_name: impl Into<String>,
        entry_date: EventDate,
    ) -> Self {
        Self {
            social_id,
            first_name: first_name.into(),
            last_name: None,
            date_of_birth: None,
            approximate_age: None,
            entry_date,
            gender: None,
            comments: None,
            dietary_restrictions: BTreeSet::new(),
            belongings: Vec::new(),
            medical_records: Vec::new(),
            family_connections: Vec::new(),
            location: None,
        }
    }

    /// Returns the victim's social ID.
    #[must_use]
    pub const fn social_id(&self) -> SocialId {
        self.social_id
    }

    /// Returns the victim's first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Sets the victim's first name.
    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
    }

    /// Returns the victim's last name, if recorded.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Sets the victim's last name.
    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = Some(last_name.into());
    }

    /// Returns the date the victim entered the relief system.
    #[must_use]
    pub const fn entry_date(&self) -> EventDate {
        self.entry_date
    }

    /// Returns the victim's date of birth, if recorded.
    #[must_use]
    pub const fn date_of_birth(&self) -> Option<EventDate> {
        self.date_of_birth
    }

    /// Records the victim's date of birth.
    ///
    /// The date only has to be a real calendar date in `YYYY-MM-DD` form;
    /// unlike entry dates there is no 2020-to-today window.
    ///
    /// # Errors
    ///
    /// Returns a state error if an approximate age is already recorded, or a
    /// validation error if the date string is malformed.
    pub fn set_date_of_birth(&mut self, date: &str) -> Result<(), Error> {
        if self.approximate_age.is_some() {
            return Err(Error::BirthDateConflictsWithAge);
        }
        self.date_of_birth = Some(EventDate::parse(date)?);
        Ok(())
    }

    /// Returns the victim's approximate age, if recorded.
    #[must_use]
    pub const fn approximate_age(&self) -> Option<u32> {
        self.approximate_age
    }

    /// Records the victim's approximate age.
    ///
    /// # Errors
    ///
    /// Returns a state error if a date of birth is already recorded, or a
    /// validation error if the age exceeds 150.
    pub fn set_approximate_age(&mut self, age: u32) -> Result<(), Error> {
        if self.date_of_birth.is_some() {
            return Err(Error::AgeConflictsWithBirthDate);
        }
        if age > MAX_APPROXIMATE_AGE {
            return Err(Error::AgeOutOfRange(age));
        }
        self.approximate_age = Some(age);
        Ok(())
    }

    /// Returns the victim's gender, if recorded.
    #[must_use]
    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    /// Records the victim's gender, matched case-insensitively against the
    /// configured vocabulary and stored in its canonical lowercase form.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the value is not in the vocabulary.
    pub fn set_gender(&mut self, value: &str, config: &Config) -> Result<(), Error> {
        let canonical = config
            .canonical_gender(value)
            .ok_or_else(|| Error::UnknownGender(value.to_string()))?;
        self.gender = Some(canonical.to_string());
        Ok(())
    }

    /// Returns the free-text comments on this record, if any.
    #[must_use]
    pub fn comments(&self) -> Option<&str> {
        self.comments.as_deref()
    }

    /// Sets the free-text comments on this record.
    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.comments = Some(comments.into());
    }

    /// Returns the victim's dietary restrictions, in code order.
    #[must_use]
    pub const fn dietary_restrictions(&self) -> &BTreeSet<DietaryCode> {
        &self.dietary_restrictions
    }

    /// Adds a dietary restriction.
    ///
    /// Returns `true` if the code was added, `false` if it was already
    /// recorded.
    pub fn add_dietary_restriction(&mut self, code: DietaryCode) -> bool {
        self.dietary_restrictions.insert(code)
    }

    /// Removes a dietary restriction.
    ///
    /// Returns `true` if the code was removed, `false` if it was not recorded.
    pub fn remove_dietary_restriction(&mut self, code: DietaryCode) -> bool {
        self.dietary_restrictions.remove(&code)
    }

    /// Returns the victim's personal belongings, one line item per issue.
    #[must_use]
    pub fn belongings(&self) -> &[Supply] {
        &self.belongings
    }

    /// Appends a belonging line item.
    ///
    /// Issues go through [`Registry::issue_belonging`], which checks the
    /// location's inventory first; repeated issues of the same kind stay
    /// separate line items.
    ///
    /// [`Registry::issue_belonging`]: super::registry::Registry::issue_belonging
    pub(crate) fn push_belonging(&mut self, supply: Supply) {
        self.belongings.push(supply);
    }

    /// Removes up to `quantity` units of `kind` from the belongings.
    ///
    /// Line items are consumed oldest first: each matching item is reduced by
    /// what is still owed and dropped when it reaches zero. Returns the
    /// quantity actually removed, which is less than `quantity` when the
    /// victim held fewer units than requested.
    pub fn remove_belonging(&mut self, kind: &SupplyKind, quantity: u32) -> u32 {
        let mut owed = quantity;
        self.belongings.retain_mut(|item| {
            if owed == 0 || item.kind() != kind {
                return true;
            }
            let take = owed.min(item.quantity());
            item.adjust(-i64::from(take));
            owed -= take;
            item.quantity() > 0
        });
        quantity - owed
    }

    /// Returns the victim's medical records, oldest first.
    #[must_use]
    pub fn medical_records(&self) -> &[MedicalRecord] {
        &self.medical_records
    }

    /// Appends a medical record.
    pub fn add_medical_record(&mut self, record: MedicalRecord) {
        self.medical_records.push(record);
    }

    /// Returns the victim's family connections.
    #[must_use]
    pub fn family_connections(&self) -> &[FamilyRelation] {
        &self.family_connections
    }

    /// Records a family connection.
    ///
    /// Returns `true` if the relation was added, `false` if an equal relation
    /// (under the order-independent contract) was already recorded.
    pub fn add_family_connection(&mut self, relation: FamilyRelation) -> bool {
        if self.family_connections.contains(&relation) {
            false
        } else {
            self.family_connections.push(relation);
            true
        }
    }

    /// Removes a family connection.
    ///
    /// Returns `true` if an equal relation was recorded and removed.
    pub fn remove_family_connection(&mut self, relation: &FamilyRelation) -> bool {
        if let Some(pos) = self.family_connections.iter().position(|r| r == relation) {
            self.family_connections.remove(pos);
            true
        } else {
            false
        }
    }

    /// Returns the ID of the location the victim is housed at, if any.
    #[must_use]
    pub const fn location(&self) -> Option<LocationId> {
        self.location
    }

    pub(crate) const fn set_location(&mut self, location: LocationId) {
        self.location = Some(location);
    }

    pub(crate) const fn clear_location(&mut self) {
        self.location = None;
    }

    /// Reports whether the query is a case-insensitive substring of the
    /// victim's first or last name.
    #[must_use]
    pub fn matches_name(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.first_name.to_lowercase().contains(&needle)
            || self
                .last_name
                .as_ref()
                .is_some_and(|last| last.to_lowercase().contains(&needle))
    }
}

/// Errors arising from victim record operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A date of birth is already recorded, so an approximate age cannot be.
    #[error("cannot set approximate age: a date of birth is already recorded")]
    AgeConflictsWithBirthDate,

    /// An approximate age is already recorded, so a date of birth cannot be.
    #[error("cannot set date of birth: an approximate age is already recorded")]
    BirthDateConflictsWithAge,

    /// The approximate age is outside the accepted range.
    #[error("approximate age {0} is out of range (0 to 150)")]
    AgeOutOfRange(u32),

    /// The gender is not in the configured vocabulary.
    #[error("unrecognised gender '{0}'")]
    UnknownGender(String),

    /// A date string failed validation.
    #[error(transparent)]
    Date(#[from] date::Error),
}

impl Error {
    /// Classifies this error within the registry's error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AgeConflictsWithBirthDate | Self::BirthDateConflictsWithAge => ErrorKind::State,
            Self::AgeOutOfRange(_) | Self::UnknownGender(_) => ErrorKind::Validation,
            Self::Date(error) => error.kind(),
        }
    }
}
