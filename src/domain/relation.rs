use std::hash::{Hash, Hasher};

use super::{ErrorKind, id::SocialId};

/// A symmetric family tie between two victims.
///
/// The relation is unordered: `(A, "sibling", B)` and `(B, "sibling", A)`
/// compare equal and hash identically. Both victims hold the relation in
/// their connection lists; removal is per-holder, so one side dropping the
/// relation does not affect the other.
#[derive(Debug, Clone, Eq)]
pub struct FamilyRelation {
    one: SocialId,
    label: String,
    two: SocialId,
}

impl FamilyRelation {
    /// Creates a relation between two distinct victims.
    ///
    /// # Errors
    ///
    /// Returns [`SelfRelationError`] when both social IDs are the same.
    pub fn new(
        one: SocialId,
        label: impl Into<String>,
        two: SocialId,
    ) -> Result<Self, SelfRelationError> {
        if one == two {
            return Err(SelfRelationError(one));
        }
        Ok(Self {
            one,
            label: label.into(),
            two,
        })
    }

    /// Returns the two participants in construction order.
    #[must_use]
    pub const fn participants(&self) -> (SocialId, SocialId) {
        (self.one, self.two)
    }

    /// Returns the relationship label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns whether `id` is one of the participants.
    #[must_use]
    pub fn involves(&self, id: SocialId) -> bool {
        self.one == id || self.two == id
    }

    /// Returns the other participant, if `id` is one of the two.
    #[must_use]
    pub fn other(&self, id: SocialId) -> Option<SocialId> {
        if id == self.one {
            Some(self.two)
        } else if id == self.two {
            Some(self.one)
        } else {
            None
        }
    }

    /// The participant pair in a fixed order, for order-independent
    /// comparison and hashing.
    fn normalized(&self) -> (SocialId, SocialId) {
        if self.one <= self.two {
            (self.one, self.two)
        } else {
            (self.two, self.one)
        }
    }
}

impl PartialEq for FamilyRelation {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.normalized() == other.normalized()
    }
}

impl Hash for FamilyRelation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
        self.normalized().hash(state);
    }
}

/// Error returned when a relation would tie a victim to themselves.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("a family relation must involve two different people (got social ID {0} twice)")]
pub struct SelfRelationError(pub SocialId);

impl SelfRelationError {
    /// The taxonomy bucket for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
