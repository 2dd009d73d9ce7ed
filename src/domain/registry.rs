use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use super::{
    ErrorKind,
    config::Config,
    date::{self, EventDate},
    id::{InquirerId, LocationId, SocialId},
    inquiry::{Inquirer, InquiryRecord},
    location::Location,
    medical::MedicalRecord,
    relation::{self, FamilyRelation},
    supply::{Supply, SupplyKind},
    victim::{self, Victim},
};

/// The root of the relief data model.
///
/// A registry owns every location, victim, inquirer, and inquiry record, plus
/// the counters that issue social and location IDs. Cross-entity operations
/// (occupancy, supply issue, family relations, inquiry logging) go through the
/// registry so that both sides of each link stay consistent. Counters start at
/// 1 and never reuse a value; validation happens before an ID is issued, so a
/// failed creation does not consume one.
///
/// Registries are plain values. Independent instances share nothing, so each
/// test can build its own.
#[derive(Debug, Clone)]
pub struct Registry {
    config: Config,
    locations: BTreeMap<LocationId, Location>,
    victims: BTreeMap<SocialId, Victim>,
    inquirers: Vec<Inquirer>,
    inquiries: Vec<InquiryRecord>,
    next_social: NonZeroUsize,
    next_location: NonZeroUsize,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Registry {
    /// Creates an empty registry using the given configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            locations: BTreeMap::new(),
            victims: BTreeMap::new(),
            inquirers: Vec::new(),
            inquiries: Vec::new(),
            next_social: NonZeroUsize::MIN,
            next_location: NonZeroUsize::MIN,
        }
    }

    /// Returns the configuration this registry was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    fn next_social_id(&mut self) -> SocialId {
        let id = SocialId::new(self.next_social);
        self.next_social = self
            .next_social
            .checked_add(1)
            .expect("social ID counter overflow!");
        id
    }

    fn next_location_id(&mut self) -> LocationId {
        let id = LocationId::new(self.next_location);
        self.next_location = self
            .next_location
            .checked_add(1)
            .expect("location ID counter overflow!");
        id
    }

    /// Registers a new location and returns its ID.
    ///
    /// # Panics
    ///
    /// Panics if the location ID counter overflows `usize`.
    pub fn add_location(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> LocationId {
        let id = self.next_location_id();
        self.locations.insert(id, Location::new(id, name, address));
        id
    }

    /// Returns all locations, in ascending ID order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Looks up a location by ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no location has this ID.
    pub fn location(&self, id: LocationId) -> Result<&Location, Error> {
        self.locations.get(&id).ok_or(Error::LocationNotFound(id))
    }

    /// Looks up a location by ID for mutation.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no location has this ID.
    pub fn location_mut(&mut self, id: LocationId) -> Result<&mut Location, Error> {
        self.locations
            .get_mut(&id)
            .ok_or(Error::LocationNotFound(id))
    }

    /// Admits a new victim, optionally housing them at a location.
    ///
    /// The entry date is validated (ISO shape, year 2020 or later, not in the
    /// future) and the location checked before a social ID is issued, so a
    /// failed admission never consumes an ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad entry date, or a not-found error
    /// for an unknown location ID.
    ///
    /// # Panics
    ///
    /// Panics if the social ID counter overflows `usize`.
    pub fn admit_victim(
        &mut self,
        first_name: &str,
        entry_date: &str,
        location: Option<LocationId>,
    ) -> Result<SocialId, Error> {
        let entry = EventDate::parse_in_window(entry_date)?;
        if let Some(location) = location {
            if !self.locations.contains_key(&location) {
                return Err(Error::LocationNotFound(location));
            }
        }

        let id = self.next_social_id();
        let mut victim = Victim::new(id, first_name, entry);
        if let Some(location) = location {
            victim.set_location(location);
            self.locations
                .get_mut(&location)
                .ok_or(Error::LocationNotFound(location))?
                .add_occupant(id);
        }
        self.victims.insert(id, victim);
        Ok(id)
    }

    /// Returns all victims, in ascending social ID order.
    pub fn victims(&self) -> impl Iterator<Item = &Victim> {
        self.victims.values()
    }

    /// Looks up a victim by social ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no victim has this social ID.
    pub fn victim(&self, id: SocialId) -> Result<&Victim, Error> {
        self.victims.get(&id).ok_or(Error::VictimNotFound(id))
    }

    /// Looks up a victim by social ID for mutation.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no victim has this social ID.
    pub fn victim_mut(&mut self, id: SocialId) -> Result<&mut Victim, Error> {
        self.victims.get_mut(&id).ok_or(Error::VictimNotFound(id))
    }

    /// Looks up a victim among the occupants of a particular location.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the location is unknown, or if the victim
    /// is unknown or not housed at that location.
    pub fn victim_at(&self, location: LocationId, victim: SocialId) -> Result<&Victim, Error> {
        let site = self.location(location)?;
        if !site.contains_occupant(victim) {
            return Err(Error::OccupantNotFound { location, victim });
        }
        self.victims
            .get(&victim)
            .ok_or(Error::VictimNotFound(victim))
    }

    /// Houses a victim at a location, removing them from their previous one.
    ///
    /// The occupant lists hold at most one entry per victim, so re-assigning
    /// to the current location is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the victim or the location is unknown.
    pub fn assign_location(&mut self, victim: SocialId, location: LocationId) -> Result<(), Error> {
        if !self.locations.contains_key(&location) {
            return Err(Error::LocationNotFound(location));
        }
        let previous = self
            .victims
            .get(&victim)
            .ok_or(Error::VictimNotFound(victim))?
            .location();

        if let Some(previous) = previous {
            if let Some(site) = self.locations.get_mut(&previous) {
                site.remove_occupant(victim);
            }
        }
        self.locations
            .get_mut(&location)
            .ok_or(Error::LocationNotFound(location))?
            .add_occupant(victim);
        self.victims
            .get_mut(&victim)
            .ok_or(Error::VictimNotFound(victim))?
            .set_location(location);
        Ok(())
    }

    /// Records a victim's gender against the configured vocabulary.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the victim is unknown, or a validation
    /// error if the value is not in the vocabulary.
    pub fn set_gender(&mut self, victim: SocialId, value: &str) -> Result<(), Error> {
        let config = &self.config;
        self.victims
            .get_mut(&victim)
            .ok_or(Error::VictimNotFound(victim))?
            .set_gender(value, config)?;
        Ok(())
    }

    /// Issues a supply from the victim's location inventory as a personal
    /// belonging.
    ///
    /// On success the location's matching inventory entry is decremented by
    /// the requested quantity and the supply is appended to the victim's
    /// belongings as its own line item.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the victim is unknown, a state error if
    /// the victim has no location, and a validation error if the location
    /// does not stock the kind or stocks less than the requested quantity.
    pub fn issue_belonging(&mut self, victim: SocialId, supply: Supply) -> Result<(), Error> {
        let record = self
            .victims
            .get(&victim)
            .ok_or(Error::VictimNotFound(victim))?;
        let location_id = record.location().ok_or(Error::Unhoused(victim))?;
        let site = self
            .locations
            .get_mut(&location_id)
            .ok_or(Error::LocationNotFound(location_id))?;

        let available = site
            .find_supply(supply.kind())
            .map(Supply::quantity)
            .ok_or_else(|| Error::NotStocked {
                kind: supply.kind().clone(),
            })?;
        if available < supply.quantity() {
            return Err(Error::InsufficientSupply {
                kind: supply.kind().clone(),
                available,
                requested: supply.quantity(),
            });
        }

        site.remove_supply(supply.kind(), supply.quantity());
        self.victims
            .get_mut(&victim)
            .ok_or(Error::VictimNotFound(victim))?
            .push_belonging(supply);
        Ok(())
    }

    /// Records a family relation between two victims, in both their
    /// connection lists.
    ///
    /// Returns `true` if the relation was newly recorded, `false` if both
    /// victims already held an equal relation.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if either victim is unknown, or a validation
    /// error if both social IDs are the same.
    pub fn relate(&mut self, one: SocialId, label: &str, two: SocialId) -> Result<bool, Error> {
        self.victim(one)?;
        self.victim(two)?;
        let relation = FamilyRelation::new(one, label, two)?;

        let added = self
            .victims
            .get_mut(&one)
            .ok_or(Error::VictimNotFound(one))?
            .add_family_connection(relation.clone());
        let added = self
            .victims
            .get_mut(&two)
            .ok_or(Error::VictimNotFound(two))?
            .add_family_connection(relation)
            || added;
        Ok(added)
    }

    /// Removes a family relation from both victims' connection lists.
    ///
    /// Returns `true` if either victim held an equal relation.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if either victim is unknown, or a validation
    /// error if both social IDs are the same.
    pub fn unrelate(&mut self, one: SocialId, label: &str, two: SocialId) -> Result<bool, Error> {
        self.victim(one)?;
        self.victim(two)?;
        let relation = FamilyRelation::new(one, label, two)?;

        let removed = self
            .victims
            .get_mut(&one)
            .ok_or(Error::VictimNotFound(one))?
            .remove_family_connection(&relation);
        let removed = self
            .victims
            .get_mut(&two)
            .ok_or(Error::VictimNotFound(two))?
            .remove_family_connection(&relation)
            || removed;
        Ok(removed)
    }

    /// Appends a medical record to a victim.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the victim or the treating location is
    /// unknown, or a validation error if the treatment date is malformed or
    /// outside the 2020-to-today window.
    pub fn record_treatment(
        &mut self,
        victim: SocialId,
        location: LocationId,
        details: &str,
        date: &str,
    ) -> Result<(), Error> {
        self.location(location)?;
        let record = MedicalRecord::new(location, details, date)?;
        self.victims
            .get_mut(&victim)
            .ok_or(Error::VictimNotFound(victim))?
            .add_medical_record(record);
        Ok(())
    }

    /// Searches housed victims by name.
    ///
    /// The query matches case-insensitively as a substring of the first or
    /// last name. Results come in location-then-occupant order; victims not
    /// housed anywhere are never returned.
    #[must_use]
    pub fn search_victims(&self, query: &str) -> Vec<&Victim> {
        self.locations
            .values()
            .flat_map(Location::occupants)
            .filter_map(|id| self.victims.get(id))
            .filter(|victim| victim.matches_name(query))
            .collect()
    }

    /// Registers an inquirer, reusing any existing entry with the same
    /// identity.
    ///
    /// Identity is the (first name, last name, services phone) tuple. When a
    /// match exists its ID is returned and the existing interaction history
    /// is preserved; otherwise the inquirer is appended to the catalog.
    pub fn register_inquirer(&mut self, inquirer: Inquirer) -> InquirerId {
        if let Some(pos) = self
            .inquirers
            .iter()
            .position(|known| known.same_identity(&inquirer))
        {
            return InquirerId::new(NonZeroUsize::MIN.saturating_add(pos));
        }
        self.inquirers.push(inquirer);
        InquirerId::new(NonZeroUsize::MIN.saturating_add(self.inquirers.len() - 1))
    }

    /// Reports whether an inquirer with the same identity tuple is already
    /// registered.
    #[must_use]
    pub fn inquirer_exists(&self, candidate: &Inquirer) -> bool {
        self.inquirers
            .iter()
            .any(|known| known.same_identity(candidate))
    }

    /// Finds a registered inquirer by identity tuple.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if no inquirer matches the tuple exactly.
    pub fn find_inquirer(
        &self,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<InquirerId, Error> {
        self.inquirers
            .iter()
            .position(|known| known.matches(first_name, last_name, phone))
            .map(|pos| InquirerId::new(NonZeroUsize::MIN.saturating_add(pos)))
            .ok_or_else(|| Error::InquirerNotFound {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                phone: phone.to_string(),
            })
    }

    /// Returns all registered inquirers, in registration order.
    #[must_use]
    pub fn inquirers(&self) -> &[Inquirer] {
        &self.inquirers
    }

    /// Looks up an inquirer by ID.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the ID has not been issued.
    pub fn inquirer(&self, id: InquirerId) -> Result<&Inquirer, Error> {
        self.inquirers
            .get(id.get() - 1)
            .ok_or(Error::InquirerUnregistered(id))
    }

    /// Looks up an inquirer by ID for mutation.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the ID has not been issued.
    pub fn inquirer_mut(&mut self, id: InquirerId) -> Result<&mut Inquirer, Error> {
        self.inquirers
            .get_mut(id.get() - 1)
            .ok_or(Error::InquirerUnregistered(id))
    }

    /// Logs an inquiry about a missing person.
    ///
    /// The record is kept in the registry's inquiry list, and the provided
    /// information is appended to the inquirer's interaction log. The date is
    /// shape-checked only; inquiries may reference any calendar date.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the inquirer, missing person, or location
    /// is unknown, or a validation error if the date string is malformed.
    pub fn log_inquiry(
        &mut self,
        inquirer: InquirerId,
        missing_person: SocialId,
        date: &str,
        info: &str,
        last_known_location: LocationId,
    ) -> Result<(), Error> {
        self.inquirer(inquirer)?;
        self.victim(missing_person)?;
        self.location(last_known_location)?;
        let record = InquiryRecord::new(inquirer, missing_person, date, info, last_known_location)?;

        let asker = self
            .inquirers
            .get_mut(inquirer.get() - 1)
            .ok_or(Error::InquirerUnregistered(inquirer))?;
        asker.set_info(info);
        asker.add_interaction(info);
        self.inquiries.push(record);
        Ok(())
    }

    /// Returns the inquiries logged this session, oldest first.
    #[must_use]
    pub fn inquiries(&self) -> &[InquiryRecord] {
        &self.inquiries
    }
}

/// Errors arising from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No location has the given ID.
    #[error("no location with ID {0}")]
    LocationNotFound(LocationId),

    /// No victim has the given social ID.
    #[error("no victim with social ID {0}")]
    VictimNotFound(SocialId),

    /// The victim exists but is not housed at the given location.
    #[error("victim {victim} is not housed at location {location}")]
    OccupantNotFound {
        /// The location that was searched.
        location: LocationId,
        /// The social ID that was not among its occupants.
        victim: SocialId,
    },

    /// The victim has no location, so nothing can be issued to them.
    #[error("victim {0} is not assigned to a location")]
    Unhoused(SocialId),

    /// The location does not stock the requested supply kind at all.
    #[error("no {kind} is stocked at the victim's location")]
    NotStocked {
        /// The requested supply kind.
        kind: SupplyKind,
    },

    /// The location stocks the kind, but less than the requested quantity.
    #[error("insufficient {kind} at the victim's location: {available} available, {requested} requested")]
    InsufficientSupply {
        /// The requested supply kind.
        kind: SupplyKind,
        /// The quantity the location holds.
        available: u32,
        /// The quantity that was requested.
        requested: u32,
    },

    /// No registered inquirer matches the identity tuple.
    #[error("no registered inquirer named {first_name} {last_name} with phone {phone}")]
    InquirerNotFound {
        /// The first name that was searched for.
        first_name: String,
        /// The last name that was searched for.
        last_name: String,
        /// The services phone number that was searched for.
        phone: String,
    },

    /// The inquirer ID has never been issued by this registry.
    #[error("inquirer ID {0} has not been registered")]
    InquirerUnregistered(InquirerId),

    /// A relation between a victim and themselves was requested.
    #[error(transparent)]
    Relation(#[from] relation::SelfRelationError),

    /// A victim-local operation failed.
    #[error(transparent)]
    Victim(#[from] victim::Error),

    /// A date string failed validation.
    #[error(transparent)]
    Date(#[from] date::Error),
}

impl Error {
    /// Classifies this error within the registry's error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::LocationNotFound(_)
            | Self::VictimNotFound(_)
            | Self::OccupantNotFound { .. }
            | Self::InquirerNotFound { .. }
            | Self::InquirerUnregistered(_) => ErrorKind::NotFound,
            Self::Unhoused(_) => ErrorKind::State,
            Self::NotStocked { .. } | Self::InsufficientSupply { .. } => ErrorKind::Validation,
            Self::Relation(error) => error.kind(),
            Self::Victim(error) => error.kind(),
            Self::Date(error) => error.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location_id(n: usize) -> LocationId {
        LocationId::new(NonZeroUsize::new(n).unwrap())
    }

    fn social_id(n: usize) -> SocialId {
        SocialId::new(NonZeroUsize::new(n).unwrap())
    }

    #[test]
    fn admission_validates_entry_date_before_issuing_ids() {
        let mut registry = Registry::default();

        assert!(registry.admit_victim("Ana", "01/02/2024", None).is_err());
        assert!(registry.admit_victim("Ana", "2019-12-31", None).is_err());

        // Failed admissions consumed no IDs.
        let id = registry.admit_victim("Ana", "2024-01-01", None).unwrap();
        assert_eq!(id.get(), 1);
    }

    #[test]
    fn social_ids_strictly_increase_and_are_never_reused() {
        let mut registry = Registry::default();

        let first = registry.admit_victim("Ana", "2024-01-01", None).unwrap();
        registry.admit_victim("Bad", "not-a-date", None).unwrap_err();
        let second = registry.admit_victim("Ben", "2024-01-02", None).unwrap();
        let third = registry.admit_victim("Cleo", "2024-01-03", None).unwrap();

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(third.get(), 3);
    }

    #[test]
    fn location_ids_strictly_increase() {
        let mut registry = Registry::default();

        let a = registry.add_location("Shelter A", "1 Main St");
        let b = registry.add_location("Shelter B", "2 Side Ave");

        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert_eq!(registry.locations().count(), 2);
    }

    #[test]
    fn admission_with_location_registers_occupancy() {
        let mut registry = Registry::default();
        let shelter = registry.add_location("Shelter A", "1 Main St");

        let id = registry
            .admit_victim("Ana", "2024-01-01", Some(shelter))
            .unwrap();

        assert_eq!(registry.victim(id).unwrap().location(), Some(shelter));
        assert!(registry.location(shelter).unwrap().contains_occupant(id));
    }

    #[test]
    fn admission_to_unknown_location_fails_without_consuming_an_id() {
        let mut registry = Registry::default();

        let error = registry
            .admit_victim("Ana", "2024-01-01", Some(location_id(9)))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);

        let id = registry.admit_victim("Ana", "2024-01-01", None).unwrap();
        assert_eq!(id.get(), 1);
    }

    #[test]
    fn lookups_fail_for_ids_never_issued() {
        let registry = Registry::default();

        assert_eq!(
            registry.location(location_id(7)).unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            registry.victim(social_id(7)).unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn victim_at_distinguishes_unknown_from_housed_elsewhere() {
        let mut registry = Registry::default();
        let a = registry.add_location("Shelter A", "1 Main St");
        let b = registry.add_location("Shelter B", "2 Side Ave");
        let id = registry.admit_victim("Ana", "2024-01-01", Some(a)).unwrap();

        assert_eq!(registry.victim_at(a, id).unwrap().first_name(), "Ana");
        assert!(matches!(
            registry.victim_at(b, id),
            Err(Error::OccupantNotFound { .. })
        ));
    }

    #[test]
    fn reassignment_moves_the_victim_between_occupant_lists() {
        let mut registry = Registry::default();
        let a = registry.add_location("Shelter A", "1 Main St");
        let b = registry.add_location("Shelter B", "2 Side Ave");
        let id = registry.admit_victim("Ana", "2024-01-01", Some(a)).unwrap();

        registry.assign_location(id, b).unwrap();

        assert!(!registry.location(a).unwrap().contains_occupant(id));
        assert!(registry.location(b).unwrap().contains_occupant(id));
        assert_eq!(registry.victim(id).unwrap().location(), Some(b));

        // Re-assigning to the current location changes nothing.
        registry.assign_location(id, b).unwrap();
        assert_eq!(registry.location(b).unwrap().occupants().len(), 1);
    }

    #[test]
    fn gender_is_validated_against_the_configured_vocabulary() {
        let mut registry = Registry::default();
        let id = registry.admit_victim("Ana", "2024-01-01", None).unwrap();

        registry.set_gender(id, "Woman").unwrap();
        assert_eq!(registry.victim(id).unwrap().gender(), Some("woman"));

        let error = registry.set_gender(id, "starfleet").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn issuing_a_belonging_transfers_quantity_from_the_inventory() {
        let mut registry = Registry::default();
        let shelter = registry.add_location("Shelter A", "1 Main St");
        let id = registry
            .admit_victim("John", "2024-01-01", Some(shelter))
            .unwrap();
        registry
            .location_mut(shelter)
            .unwrap()
            .add_supply(Supply::new("Water", 10).unwrap());

        registry
            .issue_belonging(id, Supply::new("Water", 3).unwrap())
            .unwrap();

        let water = SupplyKind::new("water").unwrap();
        let site = registry.location(shelter).unwrap();
        assert_eq!(site.find_supply(&water).unwrap().quantity(), 7);

        let victim = registry.victim(id).unwrap();
        assert_eq!(victim.belongings().len(), 1);
        assert_eq!(victim.belongings()[0].quantity(), 3);
    }

    #[test]
    fn issuing_to_an_unhoused_victim_is_a_state_error() {
        let mut registry = Registry::default();
        let id = registry.admit_victim("John", "2024-01-01", None).unwrap();

        let error = registry
            .issue_belonging(id, Supply::new("Water", 1).unwrap())
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::State);
    }

    #[test]
    fn issuing_distinguishes_unstocked_from_insufficient() {
        let mut registry = Registry::default();
        let shelter = registry.add_location("Shelter A", "1 Main St");
        let id = registry
            .admit_victim("John", "2024-01-01", Some(shelter))
            .unwrap();
        registry
            .location_mut(shelter)
            .unwrap()
            .add_supply(Supply::new("Water", 2).unwrap());

        let unstocked = registry
            .issue_belonging(id, Supply::new("Blanket", 1).unwrap())
            .unwrap_err();
        assert!(matches!(unstocked, Error::NotStocked { .. }));
        assert_eq!(unstocked.kind(), ErrorKind::Validation);

        let short = registry
            .issue_belonging(id, Supply::new("Water", 3).unwrap())
            .unwrap_err();
        assert!(matches!(
            short,
            Error::InsufficientSupply {
                available: 2,
                requested: 3,
                ..
            }
        ));
        assert_eq!(short.kind(), ErrorKind::Validation);

        // A failed issue leaves the inventory untouched.
        let water = SupplyKind::new("water").unwrap();
        let site = registry.location(shelter).unwrap();
        assert_eq!(site.find_supply(&water).unwrap().quantity(), 2);
    }

    #[test]
    fn relating_two_victims_updates_both_connection_lists() {
        let mut registry = Registry::default();
        let a = registry.admit_victim("Ana", "2024-01-01", None).unwrap();
        let b = registry.admit_victim("Ben", "2024-01-02", None).unwrap();

        assert!(registry.relate(a, "parent", b).unwrap());

        let relation = FamilyRelation::new(a, "parent", b).unwrap();
        assert!(registry.victim(a).unwrap().family_connections().contains(&relation));
        assert!(registry.victim(b).unwrap().family_connections().contains(&relation));
    }

    #[test]
    fn duplicate_relations_are_not_stacked() {
        let mut registry = Registry::default();
        let a = registry.admit_victim("Ana", "2024-01-01", None).unwrap();
        let b = registry.admit_victim("Ben", "2024-01-02", None).unwrap();

        assert!(registry.relate(a, "sibling", b).unwrap());
        // The reversed order is the same relation.
        assert!(!registry.relate(b, "sibling", a).unwrap());
        assert_eq!(registry.victim(a).unwrap().family_connections().len(), 1);
        assert_eq!(registry.victim(b).unwrap().family_connections().len(), 1);
    }

    #[test]
    fn self_relations_are_rejected() {
        let mut registry = Registry::default();
        let a = registry.admit_victim("Ana", "2024-01-01", None).unwrap();

        let error = registry.relate(a, "sibling", a).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn unrelate_removes_from_both_lists() {
        let mut registry = Registry::default();
        let a = registry.admit_victim("Ana", "2024-01-01", None).unwrap();
        let b = registry.admit_victim("Ben", "2024-01-02", None).unwrap();
        registry.relate(a, "sibling", b).unwrap();

        // Order-independent: remove using the reversed pair.
        assert!(registry.unrelate(b, "sibling", a).unwrap());
        assert!(registry.victim(a).unwrap().family_connections().is_empty());
        assert!(registry.victim(b).unwrap().family_connections().is_empty());
        assert!(!registry.unrelate(a, "sibling", b).unwrap());
    }

    #[test]
    fn treatment_records_require_a_known_location_and_valid_date() {
        let mut registry = Registry::default();
        let clinic = registry.add_location("Field Clinic", "3 North Rd");
        let id = registry.admit_victim("Ana", "2024-01-01", None).unwrap();

        registry
            .record_treatment(id, clinic, "sprained ankle", "2024-02-01")
            .unwrap();
        assert_eq!(registry.victim(id).unwrap().medical_records().len(), 1);

        let missing = registry
            .record_treatment(id, location_id(9), "x", "2024-02-01")
            .unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let early = registry
            .record_treatment(id, clinic, "x", "2019-02-01")
            .unwrap_err();
        assert_eq!(early.kind(), ErrorKind::Validation);
        assert_eq!(registry.victim(id).unwrap().medical_records().len(), 1);
    }

    #[test]
    fn search_matches_substrings_across_housed_victims() {
        let mut registry = Registry::default();
        let a = registry.add_location("Shelter A", "1 Main St");
        let b = registry.add_location("Shelter B", "2 Side Ave");
        registry.admit_victim("Praveen", "2024-01-01", Some(a)).unwrap();
        registry.admit_victim("Oprah", "2024-01-02", Some(b)).unwrap();
        registry.admit_victim("Dana", "2024-01-03", None).unwrap();

        let matches = registry.search_victims("Pra");

        // Case-insensitive, in location order; "Oprah" contains "pra" too.
        let names: Vec<_> = matches.iter().map(|v| v.first_name()).collect();
        assert_eq!(names, vec!["Praveen", "Oprah"]);
    }

    #[test]
    fn search_skips_unhoused_victims() {
        let mut registry = Registry::default();
        registry.admit_victim("Dana", "2024-01-03", None).unwrap();

        assert!(registry.search_victims("Dana").is_empty());
    }

    #[test]
    fn inquirer_registration_deduplicates_by_identity_tuple() {
        let mut registry = Registry::default();

        let first = registry.register_inquirer(Inquirer::new("Nia", "Brown", "555-0100"));
        registry
            .inquirer_mut(first)
            .unwrap()
            .add_interaction("first call");

        let again = registry.register_inquirer(Inquirer::new("Nia", "Brown", "555-0100"));
        assert_eq!(first, again);
        assert_eq!(registry.inquirers().len(), 1);
        // The existing interaction history is preserved.
        assert_eq!(
            registry.inquirer(first).unwrap().interactions(),
            &["first call".to_string()]
        );

        let other = registry.register_inquirer(Inquirer::new("Nia", "Brown", "555-0199"));
        assert_ne!(first, other);
        assert_eq!(registry.inquirers().len(), 2);
    }

    #[test]
    fn find_inquirer_requires_an_exact_tuple_match() {
        let mut registry = Registry::default();
        registry.register_inquirer(Inquirer::new("Nia", "Brown", "555-0100"));

        assert!(registry.find_inquirer("Nia", "Brown", "555-0100").is_ok());
        let error = registry
            .find_inquirer("Nia", "Brown", "555-0101")
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn logging_an_inquiry_appends_the_record_and_the_interaction() {
        let mut registry = Registry::default();
        let shelter = registry.add_location("Shelter A", "1 Main St");
        let missing = registry
            .admit_victim("Ana", "2024-01-01", Some(shelter))
            .unwrap();
        let asker = registry.register_inquirer(Inquirer::new("Nia", "Brown", "555-0100"));

        registry
            .log_inquiry(asker, missing, "2024-03-05", "seen near the river", shelter)
            .unwrap();

        assert_eq!(registry.inquiries().len(), 1);
        let record = &registry.inquiries()[0];
        assert_eq!(record.missing_person(), missing);
        assert_eq!(record.last_known_location(), shelter);
        assert_eq!(record.info_provided(), "seen near the river");

        let inquirer = registry.inquirer(asker).unwrap();
        assert_eq!(inquirer.info(), Some("seen near the river"));
        assert_eq!(inquirer.interactions(), &["seen near the river".to_string()]);
    }

    #[test]
    fn inquiry_dates_are_shape_checked_only() {
        let mut registry = Registry::default();
        let shelter = registry.add_location("Shelter A", "1 Main St");
        let missing = registry
            .admit_victim("Ana", "2024-01-01", Some(shelter))
            .unwrap();
        let asker = registry.register_inquirer(Inquirer::new("Nia", "Brown", "555-0100"));

        // Outside the entry-date window, but shaped correctly.
        registry
            .log_inquiry(asker, missing, "2019-03-05", "old sighting", shelter)
            .unwrap();

        let error = registry
            .log_inquiry(asker, missing, "05/03/2024", "bad date", shelter)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(registry.inquiries().len(), 1);
    }

    #[test]
    fn inquiries_against_unknown_parties_are_rejected() {
        let mut registry = Registry::default();
        let shelter = registry.add_location("Shelter A", "1 Main St");
        let missing = registry
            .admit_victim("Ana", "2024-01-01", Some(shelter))
            .unwrap();
        let asker = registry.register_inquirer(Inquirer::new("Nia", "Brown", "555-0100"));

        let unknown_inquirer = InquirerId::new(NonZeroUsize::new(9).unwrap());
        assert_eq!(
            registry
                .log_inquiry(unknown_inquirer, missing, "2024-03-05", "x", shelter)
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            registry
                .log_inquiry(asker, social_id(9), "2024-03-05", "x", shelter)
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            registry
                .log_inquiry(asker, missing, "2024-03-05", "x", location_id(9))
                .unwrap_err()
                .kind(),
            ErrorKind::NotFound
        );
        assert!(registry.inquiries().is_empty());
    }
}
