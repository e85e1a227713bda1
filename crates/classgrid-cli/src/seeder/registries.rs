//! Subject and room registry seeding.

use chrono::Utc;
use classgrid_db::DocumentStore;
use classgrid_db::collections::{ROOMS, SCHEDULES, SUBJECTS};
use classgrid_models::registry::name_key;
use classgrid_models::{Room, RoomId, Subject, SubjectId};
use std::collections::HashSet;

use super::models::{SEED_ROOMS, SEED_SUBJECTS};
use crate::CliResult;

/// Adds the seed subjects missing from the registry; returns how many were added.
pub async fn seed_subjects(store: &dyn DocumentStore) -> CliResult<usize> {
    let existing: HashSet<String> = SUBJECTS
        .all(store)
        .await?
        .iter()
        .map(|s| name_key(&s.name))
        .collect();

    let now = Utc::now();
    let mut added = 0;
    for name in SEED_SUBJECTS {
        if existing.contains(&name_key(name)) {
            continue;
        }
        let subject = Subject {
            id: SubjectId::new(),
            name: name.to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        };
        SUBJECTS.put(store, &subject.id.key(), &subject).await?;
        added += 1;
    }

    Ok(added)
}

/// Adds the seed rooms missing from the registry; returns how many were added.
pub async fn seed_rooms(store: &dyn DocumentStore) -> CliResult<usize> {
    let existing: HashSet<String> = ROOMS
        .all(store)
        .await?
        .iter()
        .map(|r| name_key(&r.name))
        .collect();

    let now = Utc::now();
    let mut added = 0;
    for (name, capacity) in SEED_ROOMS {
        if existing.contains(&name_key(name)) {
            continue;
        }
        let room = Room {
            id: RoomId::new(),
            name: name.to_string(),
            capacity: Some(*capacity),
            created_at: now,
            updated_at: now,
        };
        ROOMS.put(store, &room.id.key(), &room).await?;
        added += 1;
    }

    Ok(added)
}

/// Removes seed subjects and rooms no assignment refers to any more.
pub async fn clear_registries(store: &dyn DocumentStore) -> CliResult<(usize, usize)> {
    let assignments = SCHEDULES.all(store).await?;
    let used_subjects: HashSet<&str> = assignments.iter().map(|a| a.subject.as_str()).collect();
    let used_rooms: HashSet<&str> = assignments.iter().map(|a| a.room.as_str()).collect();

    let seed_subjects: HashSet<String> = SEED_SUBJECTS.iter().map(|n| name_key(n)).collect();
    let seed_rooms: HashSet<String> = SEED_ROOMS.iter().map(|(n, _)| name_key(n)).collect();

    let mut subjects = 0;
    for subject in SUBJECTS.all(store).await? {
        if seed_subjects.contains(&name_key(&subject.name))
            && !used_subjects.contains(subject.name.as_str())
            && SUBJECTS.delete(store, &subject.id.key()).await?
        {
            subjects += 1;
        }
    }

    let mut rooms = 0;
    for room in ROOMS.all(store).await? {
        if seed_rooms.contains(&name_key(&room.name))
            && !used_rooms.contains(room.name.as_str())
            && ROOMS.delete(store, &room.id.key()).await?
        {
            rooms += 1;
        }
    }

    Ok((subjects, rooms))
}
