//! Assignment seeding.

use chrono::Utc;
use classgrid_db::DocumentStore;
use classgrid_db::collections::SCHEDULES;
use classgrid_models::{AssignmentId, ScheduleAssignment, TimeSlot, User, Weekday};
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::Instant;

use crate::CliResult;

/// Every `(day, time)` cell of the week.
fn week_cells() -> Vec<(Weekday, TimeSlot)> {
    Weekday::ALL
        .into_iter()
        .flat_map(|day| TimeSlot::all().map(move |time| (day, time)))
        .collect()
}

/// Books up to `per_teacher` distinct slots for each teacher, with a random
/// subject and room taken from the given registries.
///
/// Teachers never share a slot with themselves; across teachers, shared slots
/// and rooms are left to chance so the conflict views have something to show.
pub fn generate_assignments<R: Rng + ?Sized>(
    rng: &mut R,
    teachers: &[User],
    per_teacher: usize,
    subjects: &[String],
    rooms: &[String],
) -> Vec<ScheduleAssignment> {
    if subjects.is_empty() || rooms.is_empty() {
        return Vec::new();
    }

    let cells = week_cells();
    let now = Utc::now();
    let mut assignments = Vec::with_capacity(teachers.len() * per_teacher);

    for teacher in teachers {
        for &(day, time) in cells.choose_multiple(rng, per_teacher) {
            let (Some(subject), Some(room)) = (subjects.choose(rng), rooms.choose(rng)) else {
                continue;
            };
            assignments.push(ScheduleAssignment {
                id: AssignmentId::new(),
                teacher_id: teacher.id,
                day,
                time,
                subject: subject.clone(),
                room: room.clone(),
                created_at: now,
                updated_at: now,
            });
        }
    }

    assignments
}

pub async fn seed_assignments(
    store: &dyn DocumentStore,
    teachers: &[User],
    per_teacher: usize,
    subjects: &[String],
    rooms: &[String],
) -> CliResult<usize> {
    let start_time = Instant::now();
    println!(
        "🗓️  Seeding up to {} assignments per teacher for {} teachers...",
        per_teacher,
        teachers.len()
    );

    let assignments =
        generate_assignments(&mut rand::thread_rng(), teachers, per_teacher, subjects, rooms);
    for assignment in &assignments {
        SCHEDULES.put(store, &assignment.id.key(), assignment).await?;
    }

    println!(
        "   ✓ Inserted {} assignments in {:?}",
        assignments.len(),
        start_time.elapsed()
    );
    Ok(assignments.len())
}
