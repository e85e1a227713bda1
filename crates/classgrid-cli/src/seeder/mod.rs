//! Development data for Classgrid.
//!
//! Seeding adds the fixed subject and room lists to the registries, then
//! creates fake teachers and books random slots for them. Everything a seed
//! run creates can be removed again with [`clear_seed`], which leaves
//! coordinators and hand-made records alone.

pub mod models;
pub mod registries;
pub mod schedules;
pub mod users;

use classgrid_core::hash_password;
use classgrid_db::collections::{ROOMS, SCHEDULES, SUBJECTS, USERS};
use classgrid_db::{DocumentStore, Query};
use std::time::Instant;

pub use models::{ClearSummary, SEED_EMAIL_DOMAIN, SEED_PASSWORD, SeedConfig, SeedSummary};

use crate::CliResult;

pub async fn seed_all(store: &dyn DocumentStore, config: SeedConfig) -> CliResult<SeedSummary> {
    let start_time = Instant::now();
    println!("🌱 Seeding {} store...", store.backend());

    let subjects = registries::seed_subjects(store).await?;
    let rooms = registries::seed_rooms(store).await?;
    println!("   ✓ Added {} subjects and {} rooms", subjects, rooms);

    let password_hash = hash_password(SEED_PASSWORD)
        .map_err(|e| format!("Failed to hash password: {}", e.error))?;
    let teachers = users::seed_teachers(store, config.teachers, &password_hash).await?;

    let subject_names: Vec<String> = SUBJECTS
        .all(store)
        .await?
        .into_iter()
        .map(|s| s.name)
        .collect();
    let room_names: Vec<String> = ROOMS.all(store).await?.into_iter().map(|r| r.name).collect();

    let assignments = schedules::seed_assignments(
        store,
        &teachers,
        config.assignments_per_teacher,
        &subject_names,
        &room_names,
    )
    .await?;

    println!("✅ Seeding finished in {:?}", start_time.elapsed());
    Ok(SeedSummary {
        subjects,
        rooms,
        teachers: teachers.len(),
        assignments,
    })
}

/// Removes seeded teachers with their assignments, then the seed registry
/// entries nothing refers to any more.
pub async fn clear_seed(store: &dyn DocumentStore) -> CliResult<ClearSummary> {
    let suffix = format!("@{}", SEED_EMAIL_DOMAIN);
    let mut summary = ClearSummary::default();

    for record in USERS.all(store).await? {
        if !record.user.email.as_str().ends_with(&suffix) {
            continue;
        }
        let teacher_id = record.user.id;
        for assignment in SCHEDULES
            .find(store, &Query::new().eq("teacher_id", teacher_id.key()))
            .await?
        {
            if SCHEDULES.delete(store, &assignment.id.key()).await? {
                summary.assignments += 1;
            }
        }
        if USERS.delete(store, &teacher_id.key()).await? {
            summary.teachers += 1;
        }
    }

    let (subjects, rooms) = registries::clear_registries(store).await?;
    summary.subjects = subjects;
    summary.rooms = rooms;

    println!(
        "🧹 Removed {} teachers, {} assignments, {} subjects and {} rooms",
        summary.teachers, summary.assignments, summary.subjects, summary.rooms
    );
    Ok(summary)
}
