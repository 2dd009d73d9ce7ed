//! Domain model for disaster relief.
//!
//! This module contains the core types: victims, locations, supplies, family
//! relations, medical records, inquirers, and the registry root that owns
//! them all.

/// Registry root: arenas, ID counters, and cross-entity operations.
pub mod registry;
pub use registry::Registry;

/// Typed ID handles issued by the registry's counters.
pub mod id;
pub use id::{InquirerId, LocationId, SocialId};

pub mod date;
pub use date::EventDate;

/// Gender vocabulary configuration.
pub mod config;
pub use config::Config;

/// Dietary restriction codes and their meal descriptions.
pub mod dietary;
pub use dietary::DietaryCode;

/// Supplies and their case-normalised kinds.
pub mod supply;
pub use supply::{Supply, SupplyKind};

/// Victim records and victim-local operations.
pub mod victim;
pub use victim::Victim;

/// Relief sites with occupant lists and supply inventories.
pub mod location;
pub use location::Location;

/// Symmetric family relations between victims.
pub mod relation;
pub use relation::FamilyRelation;

/// Inquirers and the inquiries they make.
pub mod inquiry;
pub use inquiry::{Inquirer, InquiryRecord};

/// Dated medical treatment records.
pub mod medical;
pub use medical::MedicalRecord;

/// Classification of every domain error.
///
/// Each module's error type reports its kind through a `kind` method, so
/// callers can branch on the category without matching concrete variants:
/// validation failures re-prompt, state failures explain the conflict, and
/// not-found failures name the missing party.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input was malformed or out of range.
    Validation,
    /// The operation is invalid given the record's current state.
    State,
    /// A lookup by ID or identity found no match.
    NotFound,
}
