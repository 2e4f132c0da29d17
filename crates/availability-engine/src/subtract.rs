//! Carve appointments out of merged availability.
//!
//! Each clean interval starts as a single fragment. Appointments are applied
//! one at a time; every application builds a fresh fragment list from the
//! previous one, so later appointments only see time that is still free.

use crate::interval::Interval;

/// The effect of one appointment on one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cut {
    Untouched,
    /// Appointment ends with the fragment: keep the head.
    TrimTail,
    /// Appointment starts inside the fragment: keep the head and whatever
    /// follows the appointment.
    Split,
    /// Appointment covers the fragment's start: keep what follows it.
    TrimHead,
}

fn classify(fragment: &Interval, appointment: &Interval) -> Cut {
    if !appointment.overlaps(fragment) {
        Cut::Untouched
    } else if appointment.start <= fragment.start {
        Cut::TrimHead
    } else if appointment.end == fragment.end {
        Cut::TrimTail
    } else {
        Cut::Split
    }
}

/// Apply one appointment to one fragment, yielding the surviving pieces in order.
///
/// Pieces that would be empty or inverted are dropped, so an appointment that
/// spills past the fragment end is clamped to it.
fn cut(fragment: Interval, appointment: &Interval) -> Vec<Interval> {
    let pieces = match classify(&fragment, appointment) {
        Cut::Untouched => return vec![fragment],
        Cut::TrimTail => vec![fragment.with_bounds(fragment.start, appointment.start)],
        Cut::Split => vec![
            fragment.with_bounds(fragment.start, appointment.start),
            fragment.with_bounds(appointment.end, fragment.end),
        ],
        Cut::TrimHead => vec![fragment.with_bounds(appointment.end, fragment.end)],
    };
    pieces.into_iter().filter(|p| !p.is_empty()).collect()
}

/// Remove every appointment from one clean interval.
fn carve(clean: Interval, appointments: &[Interval]) -> Vec<Interval> {
    appointments.iter().fold(vec![clean], |fragments, appointment| {
        fragments
            .into_iter()
            .flat_map(|fragment| cut(fragment, appointment))
            .collect()
    })
}

/// Subtract appointments from a set of clean intervals.
///
/// Output is grouped by clean interval, in input order; fragments of one
/// clean interval ascend by start. Appointments outside every clean interval
/// have no effect and an appointment equal to a clean interval consumes it.
pub fn subtract(clean: &[Interval], appointments: &[Interval]) -> Vec<Interval> {
    clean
        .iter()
        .flat_map(|interval| carve(*interval, appointments))
        .collect()
}
