use std::{fmt, num::NonZeroUsize};

/// The social ID assigned to a victim on admission.
///
/// Issued by the registry from a monotonically increasing counter, starting at
/// 1. Once issued an ID is never reassigned, even when a later admission
/// fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SocialId(NonZeroUsize);

impl SocialId {
    /// Creates a social ID from a pre-validated non-zero value.
    #[must_use]
    pub const fn new(id: NonZeroUsize) -> Self {
        Self(id)
    }

    /// Returns the numeric value of the ID.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for SocialId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ID assigned to a location when it is registered.
///
/// Issued from its own counter, independent of social IDs, with the same
/// start-at-1 never-reuse contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationId(NonZeroUsize);

impl LocationId {
    /// Creates a location ID from a pre-validated non-zero value.
    #[must_use]
    pub const fn new(id: NonZeroUsize) -> Self {
        Self(id)
    }

    /// Returns the numeric value of the ID.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registry handle for an inquirer.
///
/// Inquirer identity for deduplication is the (first name, last name, phone)
/// tuple; the handle is how callers refer back to the deduplicated entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InquirerId(NonZeroUsize);

impl InquirerId {
    /// Creates an inquirer ID from a pre-validated non-zero value.
    #[must_use]
    pub const fn new(id: NonZeroUsize) -> Self {
        Self(id)
    }

    /// Returns the numeric value of the ID.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for InquirerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
