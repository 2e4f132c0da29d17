//! The interval value type shared by time slots, availabilities and appointments.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Identifier of the practitioner owning an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PractitionerId(pub i64);

impl fmt::Display for PractitionerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage identifier assigned by the collaborator when an availability is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityId(pub i64);

impl fmt::Display for AvailabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A half-open window `[start, end)` owned by one practitioner.
///
/// Time slots, stored availabilities and appointments all share this shape.
/// Well-formed intervals satisfy `start < end`; use [`Interval::new`] or
/// [`Interval::validate`] to enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    #[serde(rename = "practitioner_id", alias = "owner_id")]
    pub owner_id: PractitionerId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    /// Build an interval, rejecting empty or inverted bounds.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidInterval` when `start >= end`.
    pub fn new(owner_id: PractitionerId, start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        let interval = Self {
            owner_id,
            start,
            end,
        };
        interval.validate()?;
        Ok(interval)
    }

    /// Check the `start < end` invariant.
    pub fn validate(&self) -> Result<()> {
        if self.start < self.end {
            Ok(())
        } else {
            Err(EngineError::InvalidInterval {
                owner_id: self.owner_id,
                start: self.start,
                end: self.end,
            })
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Copy of this interval with new bounds and the same owner.
    pub fn with_bounds(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            owner_id: self.owner_id,
            start,
            end,
        }
    }

    /// Strict overlap. Intervals sharing only a boundary do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// `other` lies entirely within `self` (bounds included).
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// One interval ends exactly where the other starts.
    pub fn touches(&self, other: &Interval) -> bool {
        self.end == other.start || other.end == self.start
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Sort key used by the merge stage.
    pub(crate) fn sort_key(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.start, self.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}) for practitioner {}", self.start, self.end, self.owner_id)
    }
}

/// An availability as held by the collaborator after a persist call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAvailability {
    pub id: AvailabilityId,
    #[serde(flatten)]
    pub interval: Interval,
}

