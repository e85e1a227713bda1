//! Scheduling conflict detection.
//!
//! [`detect`] answers whether a single `(day, time)` cell of a snapshot holds a
//! conflict; [`scan`] runs the same check across every occupied cell.

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use utoipa::ToSchema;

use crate::ids::AssignmentId;
use crate::schedules::{ScheduleAssignment, TimeSlot, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    /// Two or more assignments share the same room.
    Room,
    /// Two or more assignments share the cell in distinct rooms.
    General,
}

/// Outcome of checking one cell. `kind` is present exactly when `has_conflict` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ConflictResult {
    pub has_conflict: bool,
    pub kind: Option<ConflictKind>,
}

impl ConflictResult {
    pub const NONE: ConflictResult = ConflictResult {
        has_conflict: false,
        kind: None,
    };

    fn of(kind: ConflictKind) -> Self {
        Self {
            has_conflict: true,
            kind: Some(kind),
        }
    }
}

/// Checks the cell at `day`/`time` of `assignments`.
///
/// A single occupant, or none, is never a conflict. With two or more, a
/// repeated room makes it a `room` conflict; distinct rooms still make it a
/// `general` one. Room names are compared exactly.
pub fn detect(assignments: &[ScheduleAssignment], day: Weekday, time: TimeSlot) -> ConflictResult {
    let matching: Vec<&ScheduleAssignment> =
        assignments.iter().filter(|a| a.occupies(day, time)).collect();

    if matching.len() < 2 {
        return ConflictResult::NONE;
    }

    let rooms: HashSet<&str> = matching.iter().map(|a| a.room.as_str()).collect();
    if rooms.len() < matching.len() {
        ConflictResult::of(ConflictKind::Room)
    } else {
        ConflictResult::of(ConflictKind::General)
    }
}

/// A conflicting cell found by [`scan`].
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SlotConflict {
    pub day: Weekday,
    pub time: TimeSlot,
    pub kind: ConflictKind,
    pub assignment_ids: Vec<AssignmentId>,
}

/// Every conflicting cell of the snapshot, ordered by day then time.
pub fn scan(assignments: &[ScheduleAssignment]) -> Vec<SlotConflict> {
    let mut cells: BTreeMap<(Weekday, TimeSlot), Vec<AssignmentId>> = BTreeMap::new();
    for assignment in assignments {
        cells
            .entry((assignment.day, assignment.time))
            .or_default()
            .push(assignment.id);
    }

    cells
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .filter_map(|((day, time), assignment_ids)| {
            detect(assignments, day, time).kind.map(|kind| SlotConflict {
                day,
                time,
                kind,
                assignment_ids,
            })
        })
        .collect()
}
