//! Collaborator interface for reading schedule data and persisting results.
//!
//! [`ScheduleStore`] is the seam between the interval algebra and whatever
//! holds practitioner data. [`InMemoryStore`] is a self-contained
//! implementation loaded from a JSON schedule document.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::interval::{AvailabilityId, Interval, PractitionerId, StoredAvailability};

/// Reads and writes practitioner schedule data.
///
/// Reads return records in no particular order. Implementations report
/// read failures as `EngineError::SourceFailure` and write failures as
/// `EngineError::PersistenceFailure`.
pub trait ScheduleStore {
    /// Declared open time slots.
    fn time_slots(&self, practitioner: PractitionerId) -> Result<Vec<Interval>>;

    /// Availabilities persisted by earlier runs.
    fn availabilities(&self, practitioner: PractitionerId) -> Result<Vec<StoredAvailability>>;

    /// Booked appointments.
    fn appointments(&self, practitioner: PractitionerId) -> Result<Vec<Interval>>;

    /// Persist one computed availability and return the stored record.
    fn save_availability(&mut self, availability: &Interval) -> Result<StoredAvailability>;
}

/// A window inside a schedule document; the owner is the enclosing practitioner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    fn owned_by(&self, owner_id: PractitionerId) -> Interval {
        Interval {
            owner_id,
            start: self.start,
            end: self.end,
        }
    }
}

/// One practitioner's entry in a schedule document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PractitionerSchedule {
    pub id: PractitionerId,
    #[serde(default)]
    pub time_slots: Vec<Window>,
    #[serde(default)]
    pub availabilities: Vec<Window>,
    #[serde(default)]
    pub appointments: Vec<Window>,
}

/// JSON document describing the schedules of several practitioners.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(default)]
    pub practitioners: Vec<PractitionerSchedule>,
}

impl ScheduleDocument {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, Clone, Default)]
struct Records {
    time_slots: Vec<Interval>,
    availabilities: Vec<StoredAvailability>,
    appointments: Vec<Interval>,
}

/// In-memory [`ScheduleStore`].
///
/// Saved availabilities are appended; nothing is ever removed. Identifiers are
/// sequential per store instance, starting at 1.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: BTreeMap<PractitionerId, Records>,
    next_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding every practitioner of a schedule document.
    ///
    /// Stored availabilities in the document receive fresh identifiers.
    pub fn from_document(document: &ScheduleDocument) -> Self {
        let mut store = Self::new();
        for schedule in &document.practitioners {
            let owner = schedule.id;
            let records = store.records.entry(owner).or_default();
            records
                .time_slots
                .extend(schedule.time_slots.iter().map(|w| w.owned_by(owner)));
            records
                .appointments
                .extend(schedule.appointments.iter().map(|w| w.owned_by(owner)));
            for window in &schedule.availabilities {
                store.insert_availability(window.owned_by(owner));
            }
        }
        store
    }

    /// Practitioners known to the store, ascending.
    pub fn practitioners(&self) -> Vec<PractitionerId> {
        self.records.keys().copied().collect()
    }

    pub fn add_time_slot(&mut self, slot: Interval) {
        self.records.entry(slot.owner_id).or_default().time_slots.push(slot);
    }

    pub fn add_appointment(&mut self, appointment: Interval) {
        self.records
            .entry(appointment.owner_id)
            .or_default()
            .appointments
            .push(appointment);
    }

    /// Record a pre-existing availability, as if persisted by an earlier run.
    pub fn add_availability(&mut self, availability: Interval) -> StoredAvailability {
        self.insert_availability(availability)
    }

    fn insert_availability(&mut self, availability: Interval) -> StoredAvailability {
        self.next_id += 1;
        let stored = StoredAvailability {
            id: AvailabilityId(self.next_id),
            interval: availability,
        };
        self.records
            .entry(availability.owner_id)
            .or_default()
            .availabilities
            .push(stored);
        stored
    }
}

impl ScheduleStore for InMemoryStore {
    fn time_slots(&self, practitioner: PractitionerId) -> Result<Vec<Interval>> {
        Ok(self
            .records
            .get(&practitioner)
            .map(|r| r.time_slots.clone())
            .unwrap_or_default())
    }

    fn availabilities(&self, practitioner: PractitionerId) -> Result<Vec<StoredAvailability>> {
        Ok(self
            .records
            .get(&practitioner)
            .map(|r| r.availabilities.clone())
            .unwrap_or_default())
    }

    fn appointments(&self, practitioner: PractitionerId) -> Result<Vec<Interval>> {
        Ok(self
            .records
            .get(&practitioner)
            .map(|r| r.appointments.clone())
            .unwrap_or_default())
    }

    fn save_availability(&mut self, availability: &Interval) -> Result<StoredAvailability> {
        if availability.is_empty() {
            return Err(EngineError::PersistenceFailure(format!(
                "refusing to store empty availability {availability}"
            )));
        }
        Ok(self.insert_availability(*availability))
    }
}
