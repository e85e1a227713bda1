//! Weekly schedule models.
//!
//! A teacher's week is a grid of [`Weekday`] columns and [`TimeSlot`] rows.
//! Each occupied cell is a [`ScheduleAssignment`] naming a subject and a room
//! from the registries.

use chrono::{DateTime, Utc};
use classgrid_core::serde::deserialize_optional_from_str;
use classgrid_core::{Paginated, PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use validator::Validate;

use crate::conflicts::{ConflictResult, detect};
use crate::ids::{AssignmentId, UserId};

// ============================================================================
// Weekday
// ============================================================================

/// School days, ordered Monday first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str() == wanted)
            .ok_or_else(|| format!("unknown weekday '{}'", s))
    }
}

// ============================================================================
// TimeSlot
// ============================================================================

/// One hour-long period of the school day, identified by its label.
///
/// The set of slots is fixed; ordering follows the clock.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ToSchema)]
#[schema(value_type = String, example = "08:00-09:00")]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub const LABELS: [&'static str; 15] = [
        "07:00-08:00",
        "08:00-09:00",
        "09:00-10:00",
        "10:00-11:00",
        "11:00-12:00",
        "12:00-13:00",
        "13:00-14:00",
        "14:00-15:00",
        "15:00-16:00",
        "16:00-17:00",
        "17:00-18:00",
        "18:00-19:00",
        "19:00-20:00",
        "20:00-21:00",
        "21:00-22:00",
    ];

    /// Every slot, earliest first.
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (0..Self::LABELS.len() as u8).map(TimeSlot)
    }

    pub fn label(&self) -> &'static str {
        Self::LABELS[self.0 as usize]
    }

    /// Position in the day, `0` being the first slot.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimeSlot({})", self.label())
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::LABELS
            .iter()
            .position(|label| *label == wanted)
            .map(|i| TimeSlot(i as u8))
            .ok_or_else(|| format!("unknown time slot '{}'", s))
    }
}

impl Serialize for TimeSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Assignments
// ============================================================================

/// One occupied slot in a teacher's week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleAssignment {
    pub id: AssignmentId,
    pub teacher_id: UserId,
    pub day: Weekday,
    pub time: TimeSlot,
    pub subject: String,
    pub room: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduleAssignment {
    pub fn occupies(&self, day: Weekday, time: TimeSlot) -> bool {
        self.day == day && self.time == time
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAssignmentDto {
    pub day: Weekday,
    pub time: TimeSlot,
    #[validate(length(min = 1, max = 100, message = "subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, max = 100, message = "room is required"))]
    pub room: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAssignmentDto {
    pub day: Option<Weekday>,
    pub time: Option<TimeSlot>,
    #[validate(length(min = 1, max = 100, message = "subject cannot be empty"))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 100, message = "room cannot be empty"))]
    pub room: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScheduleFilterParams {
    /// Only this teacher's assignments (coordinators only; teachers always see their own)
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub teacher_id: Option<UserId>,
    /// Only assignments on this day
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub day: Option<Weekday>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Default, Deserialize, ToSchema, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GridParams {
    /// Restrict the grid to one teacher (coordinators only)
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub teacher_id: Option<UserId>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedAssignmentsResponse {
    pub data: Vec<ScheduleAssignment>,
    pub meta: PaginationMeta,
}

impl From<Paginated<ScheduleAssignment>> for PaginatedAssignmentsResponse {
    fn from(page: Paginated<ScheduleAssignment>) -> Self {
        Self {
            data: page.data,
            meta: page.meta,
        }
    }
}

// ============================================================================
// Grid
// ============================================================================

/// The fixed days and time slots clients render the grid with.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SlotCatalog {
    pub days: Vec<Weekday>,
    pub times: Vec<TimeSlot>,
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self {
            days: Weekday::ALL.to_vec(),
            times: TimeSlot::all().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GridCell {
    pub day: Weekday,
    pub assignments: Vec<ScheduleAssignment>,
    pub conflict: ConflictResult,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GridRow {
    pub time: TimeSlot,
    pub cells: Vec<GridCell>,
}

/// The whole week: one row per time slot, one cell per weekday.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleGrid {
    /// Teacher the grid was restricted to, if any
    pub teacher_id: Option<UserId>,
    pub rows: Vec<GridRow>,
    /// Number of cells holding a conflict
    pub conflict_count: usize,
}

impl ScheduleGrid {
    /// Lays a snapshot of assignments out on the grid, checking every cell for conflicts.
    pub fn build(assignments: &[ScheduleAssignment], teacher_id: Option<UserId>) -> Self {
        let mut conflict_count = 0;

        let rows = TimeSlot::all()
            .map(|time| {
                let cells = Weekday::ALL
                    .into_iter()
                    .map(|day| {
                        let conflict = detect(assignments, day, time);
                        if conflict.has_conflict {
                            conflict_count += 1;
                        }
                        GridCell {
                            day,
                            assignments: assignments
                                .iter()
                                .filter(|a| a.occupies(day, time))
                                .cloned()
                                .collect(),
                            conflict,
                        }
                    })
                    .collect();
                GridRow { time, cells }
            })
            .collect();

        Self {
            teacher_id,
            rows,
            conflict_count,
        }
    }

    pub fn cell(&self, day: Weekday, time: TimeSlot) -> Option<&GridCell> {
        self.rows
            .get(time.index())
            .and_then(|row| row.cells.iter().find(|cell| cell.day == day))
    }
}
