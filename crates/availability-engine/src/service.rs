//! Recompute and persist a practitioner's availabilities.
//!
//! Reads time slots, previously stored availabilities and appointments from a
//! [`ScheduleStore`], runs them through [`merge`] and [`subtract`], then saves
//! every resulting interval. The computation is recomputed from scratch on
//! every call; nothing is cached between calls.

use std::collections::BTreeMap;

use tracing::{debug, info, instrument, warn};

use crate::error::{EngineError, Result};
use crate::interval::{Interval, PractitionerId, StoredAvailability};
use crate::merge::merge;
use crate::store::ScheduleStore;
use crate::subtract::subtract;

/// Ingestion check for records read on behalf of `practitioner`.
fn ingest(practitioner: PractitionerId, records: &[Interval]) -> Result<()> {
    for record in records {
        if record.owner_id != practitioner {
            return Err(EngineError::ForeignInterval {
                expected: practitioner,
                found: record.owner_id,
            });
        }
        record.validate()?;
    }
    Ok(())
}

/// Compute free intervals without touching storage.
///
/// `windows` are time slots plus stored availabilities; `appointments` are
/// removed from their merged cover.
pub fn compute_availabilities(windows: &[Interval], appointments: &[Interval]) -> Vec<Interval> {
    let clean = merge(windows);
    subtract(&clean, appointments)
}

fn by_owner(intervals: &[Interval]) -> BTreeMap<PractitionerId, Vec<Interval>> {
    let mut groups: BTreeMap<PractitionerId, Vec<Interval>> = BTreeMap::new();
    for interval in intervals {
        groups.entry(interval.owner_id).or_default().push(*interval);
    }
    groups
}

/// [`merge`] applied separately to each practitioner's windows.
///
/// Output is ordered by practitioner, then by start.
pub fn merge_per_practitioner(windows: &[Interval]) -> Vec<Interval> {
    by_owner(windows)
        .values()
        .flat_map(|group| merge(group))
        .collect()
}

/// [`subtract`] applied separately per practitioner: each clean interval only
/// loses time to appointments of its own practitioner.
///
/// Output is ordered by practitioner, then as [`subtract`] orders it.
pub fn subtract_per_practitioner(clean: &[Interval], appointments: &[Interval]) -> Vec<Interval> {
    let booked = by_owner(appointments);
    by_owner(clean)
        .into_iter()
        .flat_map(|(owner, group)| {
            let own = booked.get(&owner).map(Vec::as_slice).unwrap_or_default();
            subtract(&group, own)
        })
        .collect()
}

/// Generate the availabilities of one practitioner and persist each of them.
///
/// Returns the stored records in the order they were saved: grouped by merged
/// window, ascending inside each window.
///
/// # Errors
/// - `EngineError::InvalidInterval` / `EngineError::ForeignInterval` when a
///   read returns a malformed record or another practitioner's record.
/// - Whatever the store reports for failed reads or writes. A failed write
///   aborts the run; availabilities saved before it stay saved.
#[instrument(skip_all, fields(practitioner = %practitioner))]
pub fn generate_availabilities<S: ScheduleStore>(
    store: &mut S,
    practitioner: PractitionerId,
) -> Result<Vec<StoredAvailability>> {
    let mut windows = store.time_slots(practitioner)?;
    let slot_count = windows.len();
    windows.extend(
        store
            .availabilities(practitioner)?
            .into_iter()
            .map(|stored| stored.interval),
    );
    let appointments = store.appointments(practitioner)?;

    ingest(practitioner, &windows)?;
    ingest(practitioner, &appointments)?;
    debug!(
        time_slots = slot_count,
        stored = windows.len() - slot_count,
        appointments = appointments.len(),
        "loaded schedule"
    );

    let free = compute_availabilities(&windows, &appointments);

    let mut saved = Vec::with_capacity(free.len());
    for availability in &free {
        match store.save_availability(availability) {
            Ok(stored) => saved.push(stored),
            Err(err) => {
                warn!(
                    saved = saved.len(),
                    remaining = free.len() - saved.len(),
                    error = %err,
                    "aborting availability persistence"
                );
                return Err(err);
            }
        }
    }

    let free_minutes: i64 = free.iter().map(Interval::duration_minutes).sum();
    info!(
        availabilities = saved.len(),
        free_minutes, "generated availabilities"
    );
    Ok(saved)
}

/// Availabilities currently stored for a practitioner.
pub fn list_availabilities<S: ScheduleStore>(
    store: &S,
    practitioner: PractitionerId,
) -> Result<Vec<StoredAvailability>> {
    store.availabilities(practitioner)
}
