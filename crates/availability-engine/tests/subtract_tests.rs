//! Tests for carving appointments out of merged availability.

use availability_engine::{subtract, Interval, PractitionerId};
use chrono::{NaiveDate, NaiveDateTime};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn at(hour: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 2, 5)
        .unwrap()
        .and_hms_opt(hour, min, 0)
        .unwrap()
}

fn iv(start: (u32, u32), end: (u32, u32)) -> Interval {
    Interval::new(PractitionerId(1), at(start.0, start.1), at(end.0, end.1)).unwrap()
}

fn bounds(intervals: &[Interval]) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    intervals.iter().map(|i| (i.start, i.end)).collect()
}

// ── Single appointment ──────────────────────────────────────────────────────

#[test]
fn no_appointments_leaves_clean_intervals() {
    let clean = vec![iv((11, 0), (12, 0)), iv((13, 0), (14, 0))];
    assert_eq!(subtract(&clean, &[]), clean);
}

#[test]
fn appointment_inside_splits_slot() {
    let result = subtract(&[iv((11, 0), (12, 0))], &[iv((11, 30), (11, 45))]);

    assert_eq!(
        bounds(&result),
        vec![(at(11, 0), at(11, 30)), (at(11, 45), at(12, 0))]
    );
}

#[test]
fn appointment_at_start_trims_head() {
    let result = subtract(&[iv((11, 0), (12, 0))], &[iv((11, 0), (11, 15))]);
    assert_eq!(bounds(&result), vec![(at(11, 15), at(12, 0))]);
}

#[test]
fn appointment_at_end_trims_tail() {
    let result = subtract(&[iv((11, 0), (12, 0))], &[iv((11, 15), (12, 0))]);
    assert_eq!(bounds(&result), vec![(at(11, 0), at(11, 15))]);
}

#[test]
fn appointment_equal_to_slot_consumes_it() {
    let result = subtract(&[iv((11, 0), (11, 15))], &[iv((11, 0), (11, 15))]);
    assert!(result.is_empty());
}

#[test]
fn appointment_outside_has_no_effect() {
    let clean = vec![iv((11, 0), (12, 0))];
    assert_eq!(subtract(&clean, &[iv((15, 0), (16, 0))]), clean);
}

#[test]
fn adjacent_appointment_has_no_effect() {
    let clean = vec![iv((11, 0), (12, 0))];
    assert_eq!(
        subtract(&clean, &[iv((10, 0), (11, 0)), iv((12, 0), (13, 0))]),
        clean
    );
}

// ── Appointments spilling past the slot ─────────────────────────────────────

#[test]
fn appointment_spilling_past_end_is_clamped() {
    let result = subtract(&[iv((11, 0), (12, 0))], &[iv((11, 30), (12, 30))]);
    assert_eq!(bounds(&result), vec![(at(11, 0), at(11, 30))]);
}

#[test]
fn appointment_starting_before_slot_trims_head() {
    let result = subtract(&[iv((11, 0), (12, 0))], &[iv((10, 30), (11, 20))]);
    assert_eq!(bounds(&result), vec![(at(11, 20), at(12, 0))]);
}

#[test]
fn appointment_covering_slot_on_both_sides_consumes_it() {
    let result = subtract(&[iv((11, 0), (12, 0))], &[iv((10, 0), (13, 0))]);
    assert!(result.is_empty());
}

#[test]
fn appointment_spanning_gap_affects_both_slots() {
    let result = subtract(
        &[iv((11, 0), (12, 0)), iv((13, 0), (14, 0))],
        &[iv((11, 30), (13, 30))],
    );

    assert_eq!(
        bounds(&result),
        vec![(at(11, 0), at(11, 30)), (at(13, 30), at(14, 0))]
    );
}

// ── Several appointments ────────────────────────────────────────────────────

#[test]
fn two_appointments_head_and_inner() {
    let result = subtract(
        &[iv((11, 0), (12, 0))],
        &[iv((11, 0), (11, 15)), iv((11, 30), (11, 45))],
    );

    assert_eq!(
        bounds(&result),
        vec![(at(11, 15), at(11, 30)), (at(11, 45), at(12, 0))]
    );
}

#[test]
fn two_appointments_inner_and_tail() {
    let result = subtract(
        &[iv((11, 0), (12, 0))],
        &[iv((11, 15), (11, 30)), iv((11, 45), (12, 0))],
    );

    assert_eq!(
        bounds(&result),
        vec![(at(11, 0), at(11, 15)), (at(11, 30), at(11, 45))]
    );
}

#[test]
fn four_appointments_leave_four_gaps() {
    let result = subtract(
        &[iv((11, 0), (12, 0))],
        &[
            iv((11, 5), (11, 10)),
            iv((11, 15), (11, 25)),
            iv((11, 30), (11, 40)),
            iv((11, 45), (12, 0)),
        ],
    );

    assert_eq!(
        bounds(&result),
        vec![
            (at(11, 0), at(11, 5)),
            (at(11, 10), at(11, 15)),
            (at(11, 25), at(11, 30)),
            (at(11, 40), at(11, 45)),
        ]
    );
}

#[test]
fn overlapping_appointments_do_not_reintroduce_time() {
    let result = subtract(
        &[iv((11, 0), (12, 0))],
        &[iv((11, 10), (11, 40)), iv((11, 20), (11, 50))],
    );

    assert_eq!(
        bounds(&result),
        vec![(at(11, 0), at(11, 10)), (at(11, 50), at(12, 0))]
    );
}

#[test]
fn appointment_order_does_not_matter() {
    let clean = [iv((11, 0), (12, 0))];
    let a = iv((11, 45), (12, 0));
    let b = iv((11, 0), (11, 15));
    let c = iv((11, 20), (11, 30));

    assert_eq!(subtract(&clean, &[a, b, c]), subtract(&clean, &[c, a, b]));
}

#[test]
fn appointments_in_two_disjoint_slots() {
    let result = subtract(
        &[iv((11, 0), (12, 0)), iv((13, 0), (14, 0))],
        &[iv((11, 10), (11, 50)), iv((13, 0), (13, 40))],
    );

    assert_eq!(
        bounds(&result),
        vec![
            (at(11, 0), at(11, 10)),
            (at(11, 50), at(12, 0)),
            (at(13, 40), at(14, 0)),
        ]
    );
}
