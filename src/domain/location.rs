use super::{
    id::{LocationId, SocialId},
    supply::{Supply, SupplyKind},
};

/// A relief site holding occupants and a supply inventory.
///
/// Locations are created through [`Registry::add_location`], which issues the
/// ID. The inventory keeps at most one entry per supply kind; same-kind
/// additions merge by quantity. Occupancy is maintained by the registry so
/// that the occupant list and each victim's location back-reference stay
/// consistent.
///
/// [`Registry::add_location`]: super::registry::Registry::add_location
#[derive(Debug, Clone)]
pub struct Location {
    id: LocationId,
    name: String,
    address: String,
    occupants: Vec<SocialId>,
    supplies: Vec<Supply>,
}

impl Location {
    pub(crate) fn new(id: LocationId, name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: address.into(),
            occupants: Vec::new(),
            supplies: Vec::new(),
        }
    }

    /// Returns the location's ID.
    #[must_use]
    pub const fn id(&self) -> LocationId {
        self.id
    }

    /// Returns the location's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the location's street address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the social IDs of the victims housed here, in arrival order.
    #[must_use]
    pub fn occupants(&self) -> &[SocialId] {
        &self.occupants
    }

    /// Reports whether the victim with the given social ID is housed here.
    #[must_use]
    pub fn contains_occupant(&self, id: SocialId) -> bool {
        self.occupants.contains(&id)
    }

    /// Registers a victim as an occupant.
    ///
    /// Returns `true` if the victim was added, `false` if already present.
    pub(crate) fn add_occupant(&mut self, id: SocialId) -> bool {
        if self.occupants.contains(&id) {
            false
        } else {
            self.occupants.push(id);
            true
        }
    }

    /// Removes a victim from the occupant list.
    ///
    /// Returns `true` if the victim was present.
    pub(crate) fn remove_occupant(&mut self, id: SocialId) -> bool {
        if let Some(pos) = self.occupants.iter().position(|o| *o == id) {
            self.occupants.remove(pos);
            true
        } else {
            false
        }
    }

    /// Returns the inventory, one entry per supply kind.
    #[must_use]
    pub fn supplies(&self) -> &[Supply] {
        &self.supplies
    }

    /// Returns the inventory entry for the given kind, if stocked.
    #[must_use]
    pub fn find_supply(&self, kind: &SupplyKind) -> Option<&Supply> {
        self.supplies.iter().find(|s| s.kind() == kind)
    }

    /// Adds a supply to the inventory.
    ///
    /// When an entry of the same kind exists the quantities are added
    /// together; the inventory never holds two entries of one kind.
    pub fn add_supply(&mut self, supply: Supply) {
        if let Some(existing) = self
            .supplies
            .iter_mut()
            .find(|s| s.kind() == supply.kind())
        {
            existing.adjust(i64::from(supply.quantity()));
        } else {
            self.supplies.push(supply);
        }
    }

    /// Removes up to `quantity` units of `kind` from the inventory.
    ///
    /// An entry whose quantity reaches zero is deleted. Returns the quantity
    /// actually removed, which is less than `quantity` when the inventory held
    /// fewer units, and zero when the kind is not stocked.
    pub fn remove_supply(&mut self, kind: &SupplyKind, quantity: u32) -> u32 {
        let Some(pos) = self.supplies.iter().position(|s| s.kind() == kind) else {
            return 0;
        };
        let entry = &mut self.supplies[pos];
        let taken = quantity.min(entry.quantity());
        entry.adjust(-i64::from(taken));
        if entry.quantity() == 0 {
            self.supplies.remove(pos);
        }
        taken
    }
}
