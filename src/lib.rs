//! Disaster-relief registry
//!
//! Victims, locations, supplies, and family relations live in an in-memory
//! [`Registry`]; inquirer interactions persist in a SQLite-backed
//! [`InquiryLog`].

pub mod domain;
pub use domain::{
    Config, DietaryCode, ErrorKind, EventDate, FamilyRelation, Inquirer, InquirerId,
    InquiryRecord, Location, LocationId, MedicalRecord, Registry, SocialId, Supply, SupplyKind,
    Victim,
};

/// Persistent storage for inquirer interaction logs.
pub mod storage;
pub use storage::{InquirerRow, InquiryLog, InteractionRow};
