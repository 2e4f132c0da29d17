//! Error types for availability-engine operations.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::interval::PractitionerId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A record read from a collaborator does not satisfy `start < end`.
    #[error("Invalid interval for practitioner {owner_id}: start {start} is not before end {end}")]
    InvalidInterval {
        owner_id: PractitionerId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// A read for one practitioner returned a record owned by another.
    #[error("Interval owned by practitioner {found} returned for practitioner {expected}")]
    ForeignInterval {
        expected: PractitionerId,
        found: PractitionerId,
    },

    #[error("Source failure: {0}")]
    SourceFailure(String),

    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
