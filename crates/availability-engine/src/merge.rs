//! Merge time windows into a minimal sorted cover.
//!
//! Windows are sorted by start time, then folded left-to-right through a pure
//! step function that either absorbs the next window into the running
//! accumulator or emits the accumulator and starts a new one. Windows that
//! overlap, nest, duplicate each other or merely touch end up fused.

use crate::interval::Interval;

/// How a candidate window relates to the running accumulator.
///
/// Variants are tested in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    /// Identical to, or nested inside, the accumulator.
    Covered,
    /// The accumulator is nested inside the candidate (strictly shorter end).
    Covers,
    /// The candidate starts inside the accumulator and ends after it.
    LeftOverlap,
    /// The candidate ends inside the accumulator and starts before it.
    RightOverlap,
    /// The two share a boundary with no gap in between.
    Touching,
    Disjoint,
}

fn classify(acc: &Interval, candidate: &Interval) -> Relation {
    if acc.contains(candidate) {
        Relation::Covered
    } else if acc.start >= candidate.start && acc.end < candidate.end {
        Relation::Covers
    } else if acc.start < candidate.start && acc.end >= candidate.start {
        Relation::LeftOverlap
    } else if acc.end > candidate.end && acc.start <= candidate.end {
        Relation::RightOverlap
    } else if acc.touches(candidate) {
        Relation::Touching
    } else {
        Relation::Disjoint
    }
}

/// One fold step: the next accumulator, plus the finished interval if the
/// candidate did not connect to the previous accumulator.
fn step(acc: Interval, candidate: Interval) -> (Interval, Option<Interval>) {
    match classify(&acc, &candidate) {
        Relation::Covered => (acc, None),
        Relation::Covers => (acc.with_bounds(candidate.start, candidate.end), None),
        Relation::LeftOverlap => (acc.with_bounds(acc.start, candidate.end), None),
        Relation::RightOverlap => (acc.with_bounds(candidate.start, acc.end), None),
        Relation::Touching => (
            acc.with_bounds(acc.start.min(candidate.start), acc.end.max(candidate.end)),
            None,
        ),
        Relation::Disjoint => (candidate, Some(acc)),
    }
}

/// Merge possibly duplicated, nested, overlapping or adjacent windows.
///
/// Returns disjoint, non-adjacent intervals sorted by start. The result never
/// has more intervals than the input and covers exactly the same time.
/// Owners are not inspected; callers pass one practitioner's windows.
pub fn merge(windows: &[Interval]) -> Vec<Interval> {
    let mut sorted = windows.to_vec();
    sorted.sort_by_key(Interval::sort_key);

    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let (mut merged, last) = iter.fold((Vec::new(), first), |(mut out, acc), candidate| {
        let (next, emitted) = step(acc, candidate);
        out.extend(emitted);
        (out, next)
    });
    merged.push(last);
    merged
}
