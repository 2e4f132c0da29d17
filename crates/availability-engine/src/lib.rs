//! # availability-engine
//!
//! Computes a practitioner's bookable free time from declared time slots and
//! booked appointments.
//!
//! Time slots (plus any availabilities stored by an earlier run) are merged
//! into a minimal sorted cover, then every appointment is carved out of it.
//! Both stages are pure functions over in-memory intervals; reading inputs
//! and persisting results goes through the [`ScheduleStore`] trait.
//!
//! ## Modules
//!
//! - [`interval`] - The interval value type and identifiers
//! - [`merge`] - Fuse duplicated, nested, overlapping or adjacent windows
//! - [`subtract`] - Remove appointments from merged windows
//! - [`store`] - Collaborator trait and an in-memory implementation
//! - [`service`] - Read, compute and persist for one practitioner
//! - [`error`] - Error types

pub mod error;
pub mod interval;
pub mod merge;
pub mod service;
pub mod store;
pub mod subtract;

pub use error::EngineError;
pub use interval::{AvailabilityId, Interval, PractitionerId, StoredAvailability};
pub use merge::merge;
pub use service::{
    compute_availabilities, generate_availabilities, list_availabilities, merge_per_practitioner,
    subtract_per_practitioner,
};
pub use store::{InMemoryStore, ScheduleDocument, ScheduleStore};
pub use subtract::subtract;
