use anyhow::anyhow;
use chrono::Utc;
use classgrid_core::{AppError, Paginated};
use classgrid_db::collections::SCHEDULES;
use classgrid_db::{DocumentStore, Query};
use classgrid_models::{
    AssignmentId, CreateAssignmentDto, GridParams, PaginatedAssignmentsResponse, Role,
    ScheduleAssignment, ScheduleFilterParams, ScheduleGrid, SlotConflict, TimeSlot,
    UpdateAssignmentDto, UserId, Weekday, scan,
};
use tracing::instrument;

use crate::modules::rooms::service::RoomService;
use crate::modules::subjects::service::SubjectService;

pub struct ScheduleService;

impl ScheduleService {
    /// Books a slot in the caller's own week.
    #[instrument(skip(store))]
    pub async fn create_assignment(
        store: &dyn DocumentStore,
        teacher_id: UserId,
        dto: CreateAssignmentDto,
    ) -> Result<ScheduleAssignment, AppError> {
        let subject = Self::resolve_subject(store, &dto.subject).await?;
        let room = Self::resolve_room(store, &dto.room).await?;
        Self::ensure_slot_free(store, teacher_id, dto.day, dto.time, None).await?;

        let now = Utc::now();
        let assignment = ScheduleAssignment {
            id: AssignmentId::new(),
            teacher_id,
            day: dto.day,
            time: dto.time,
            subject,
            room,
            created_at: now,
            updated_at: now,
        };

        SCHEDULES
            .put(store, &assignment.id.key(), &assignment)
            .await?;
        tracing::info!(
            assignment_id = %assignment.id,
            day = %assignment.day,
            time = %assignment.time,
            "Assignment created"
        );

        Ok(assignment)
    }

    #[instrument(skip(store))]
    pub async fn get_assignments(
        store: &dyn DocumentStore,
        caller: UserId,
        role: Role,
        filters: ScheduleFilterParams,
    ) -> Result<PaginatedAssignmentsResponse, AppError> {
        let teacher_id = Self::scope(caller, role, filters.teacher_id)?;

        let mut query = Query::new();
        if let Some(teacher_id) = teacher_id {
            query = query.eq("teacher_id", teacher_id.key());
        }
        if let Some(day) = filters.day {
            query = query.eq("day", day.as_str());
        }

        let mut assignments = SCHEDULES.find(store, &query).await?;
        assignments.sort_by_key(|a| (a.day, a.time));

        Ok(Paginated::from_vec(assignments, &filters.pagination).into())
    }

    /// Owners and coordinators may read an assignment.
    #[instrument(skip(store))]
    pub async fn get_assignment(
        store: &dyn DocumentStore,
        caller: UserId,
        role: Role,
        id: AssignmentId,
    ) -> Result<ScheduleAssignment, AppError> {
        let assignment = Self::load(store, id).await?;
        if assignment.teacher_id != caller && !role.is_coordinator() {
            return Err(AppError::not_found(anyhow!("Assignment not found")));
        }
        Ok(assignment)
    }

    #[instrument(skip(store))]
    pub async fn update_assignment(
        store: &dyn DocumentStore,
        caller: UserId,
        id: AssignmentId,
        dto: UpdateAssignmentDto,
    ) -> Result<ScheduleAssignment, AppError> {
        let mut assignment = Self::load_owned(store, caller, id).await?;

        if let Some(subject) = dto.subject {
            assignment.subject = Self::resolve_subject(store, &subject).await?;
        }
        if let Some(room) = dto.room {
            assignment.room = Self::resolve_room(store, &room).await?;
        }

        let day = dto.day.unwrap_or(assignment.day);
        let time = dto.time.unwrap_or(assignment.time);
        if !assignment.occupies(day, time) {
            Self::ensure_slot_free(store, caller, day, time, Some(id)).await?;
            assignment.day = day;
            assignment.time = time;
        }
        assignment.updated_at = Utc::now();

        SCHEDULES.put(store, &id.key(), &assignment).await?;
        Ok(assignment)
    }

    #[instrument(skip(store))]
    pub async fn delete_assignment(
        store: &dyn DocumentStore,
        caller: UserId,
        id: AssignmentId,
    ) -> Result<(), AppError> {
        Self::load_owned(store, caller, id).await?;
        SCHEDULES.delete(store, &id.key()).await?;

        tracing::info!(assignment_id = %id, "Assignment deleted");
        Ok(())
    }

    /// The week laid out as a grid with a conflict check on every cell.
    ///
    /// Teachers always get their own week. Coordinators get every teacher's
    /// assignments, or one teacher's when `teacher_id` is given.
    #[instrument(skip(store))]
    pub async fn get_grid(
        store: &dyn DocumentStore,
        caller: UserId,
        role: Role,
        params: GridParams,
    ) -> Result<ScheduleGrid, AppError> {
        let teacher_id = Self::scope(caller, role, params.teacher_id)?;

        let assignments = match teacher_id {
            Some(teacher_id) => {
                SCHEDULES
                    .find(store, &Query::new().eq("teacher_id", teacher_id.key()))
                    .await?
            }
            None => SCHEDULES.all(store).await?,
        };

        let grid = ScheduleGrid::build(&assignments, teacher_id);
        tracing::debug!(
            assignments = assignments.len(),
            conflicts = grid.conflict_count,
            "Grid built"
        );
        Ok(grid)
    }

    #[instrument(skip(store))]
    pub async fn get_conflicts(store: &dyn DocumentStore) -> Result<Vec<SlotConflict>, AppError> {
        let assignments = SCHEDULES.all(store).await?;
        Ok(scan(&assignments))
    }

    /// The teacher a listing is restricted to; `None` means everyone.
    fn scope(
        caller: UserId,
        role: Role,
        requested: Option<UserId>,
    ) -> Result<Option<UserId>, AppError> {
        if role.is_coordinator() {
            return Ok(requested);
        }
        match requested {
            Some(teacher_id) if teacher_id != caller => Err(AppError::forbidden(
                "Teachers can only view their own schedule",
            )),
            _ => Ok(Some(caller)),
        }
    }

    async fn load(store: &dyn DocumentStore, id: AssignmentId) -> Result<ScheduleAssignment, AppError> {
        SCHEDULES
            .get(store, &id.key())
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Assignment not found")))
    }

    async fn load_owned(
        store: &dyn DocumentStore,
        caller: UserId,
        id: AssignmentId,
    ) -> Result<ScheduleAssignment, AppError> {
        let assignment = Self::load(store, id).await?;
        if assignment.teacher_id != caller {
            return Err(AppError::forbidden(
                "Only the owning teacher can change this assignment",
            ));
        }
        Ok(assignment)
    }

    /// A teacher holds at most one assignment per `(day, time)`.
    async fn ensure_slot_free(
        store: &dyn DocumentStore,
        teacher_id: UserId,
        day: Weekday,
        time: TimeSlot,
        except: Option<AssignmentId>,
    ) -> Result<(), AppError> {
        let query = Query::new()
            .eq("teacher_id", teacher_id.key())
            .eq("day", day.as_str())
            .eq("time", time.label());

        let taken = SCHEDULES
            .find(store, &query)
            .await?
            .into_iter()
            .any(|a| Some(a.id) != except);

        if taken {
            return Err(AppError::conflict(anyhow!(
                "You already have a class on {} at {}",
                day,
                time
            )));
        }
        Ok(())
    }

    async fn resolve_subject(store: &dyn DocumentStore, name: &str) -> Result<String, AppError> {
        SubjectService::find_by_name(store, name)
            .await?
            .map(|s| s.name)
            .ok_or_else(|| AppError::bad_request(anyhow!("Unknown subject '{}'", name.trim())))
    }

    async fn resolve_room(store: &dyn DocumentStore, name: &str) -> Result<String, AppError> {
        RoomService::find_by_name(store, name)
            .await?
            .map(|r| r.name)
            .ok_or_else(|| AppError::bad_request(anyhow!("Unknown room '{}'", name.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use classgrid_db::MemoryStore;
    use classgrid_models::{ConflictKind, CreateRoomDto, CreateSubjectDto};

    async fn store_with_registries() -> MemoryStore {
        let store = MemoryStore::new();
        for name in ["Matemática", "História"] {
            SubjectService::create_subject(
                &store,
                CreateSubjectDto {
                    name: name.into(),
                    description: None,
                },
            )
            .await
            .unwrap();
        }
        for name in ["101", "102"] {
            RoomService::create_room(
                &store,
                CreateRoomDto {
                    name: name.into(),
                    capacity: None,
                },
            )
            .await
            .unwrap();
        }
        store
    }

    fn booking(day: Weekday, time: &str, subject: &str, room: &str) -> CreateAssignmentDto {
        CreateAssignmentDto {
            day,
            time: time.parse().unwrap(),
            subject: subject.into(),
            room: room.into(),
        }
    }

    #[tokio::test]
    async fn test_create_uses_registry_names() {
        let store = store_with_registries().await;
        let teacher = UserId::new();

        let assignment = ScheduleService::create_assignment(
            &store,
            teacher,
            booking(Weekday::Monday, "08:00-09:00", " matemática ", "101"),
        )
        .await
        .unwrap();
        assert_eq!(assignment.subject, "Matemática");
        assert_eq!(assignment.teacher_id, teacher);
    }

    #[tokio::test]
    async fn test_unknown_registry_entry_rejected() {
        let store = store_with_registries().await;

        let err = ScheduleService::create_assignment(
            &store,
            UserId::new(),
            booking(Weekday::Monday, "08:00-09:00", "Química", "101"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = ScheduleService::create_assignment(
            &store,
            UserId::new(),
            booking(Weekday::Monday, "08:00-09:00", "História", "999"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_teacher_cannot_double_book_slot() {
        let store = store_with_registries().await;
        let teacher = UserId::new();

        ScheduleService::create_assignment(
            &store,
            teacher,
            booking(Weekday::Tuesday, "10:00-11:00", "História", "101"),
        )
        .await
        .unwrap();

        let err = ScheduleService::create_assignment(
            &store,
            teacher,
            booking(Weekday::Tuesday, "10:00-11:00", "Matemática", "102"),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        // another teacher may take the same slot
        ScheduleService::create_assignment(
            &store,
            UserId::new(),
            booking(Weekday::Tuesday, "10:00-11:00", "Matemática", "102"),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_update_moves_slot_and_checks_owner() {
        let store = store_with_registries().await;
        let teacher = UserId::new();

        let first = ScheduleService::create_assignment(
            &store,
            teacher,
            booking(Weekday::Monday, "07:00-08:00", "História", "101"),
        )
        .await
        .unwrap();
        ScheduleService::create_assignment(
            &store,
            teacher,
            booking(Weekday::Monday, "08:00-09:00", "História", "101"),
        )
        .await
        .unwrap();

        let err = ScheduleService::update_assignment(
            &store,
            teacher,
            first.id,
            UpdateAssignmentDto {
                day: None,
                time: Some("08:00-09:00".parse().unwrap()),
                subject: None,
                room: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err = ScheduleService::update_assignment(
            &store,
            UserId::new(),
            first.id,
            UpdateAssignmentDto {
                day: Some(Weekday::Friday),
                time: None,
                subject: None,
                room: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        // re-saving the current slot is not a clash with itself
        let moved = ScheduleService::update_assignment(
            &store,
            teacher,
            first.id,
            UpdateAssignmentDto {
                day: Some(Weekday::Monday),
                time: None,
                subject: None,
                room: Some("102".into()),
            },
        )
        .await
        .unwrap();
        assert_eq!(moved.room, "102");
        assert_eq!(moved.day, Weekday::Monday);
    }

    #[tokio::test]
    async fn test_listing_scope_by_role() {
        let store = store_with_registries().await;
        let ana = UserId::new();
        let bia = UserId::new();

        for (teacher, day) in [
            (ana, Weekday::Wednesday),
            (ana, Weekday::Monday),
            (bia, Weekday::Monday),
        ] {
            ScheduleService::create_assignment(
                &store,
                teacher,
                booking(day, "09:00-10:00", "História", "101"),
            )
            .await
            .unwrap();
        }

        let own = ScheduleService::get_assignments(
            &store,
            ana,
            Role::Teacher,
            ScheduleFilterParams::default(),
        )
        .await
        .unwrap();
        assert_eq!(own.meta.total, 2);
        assert_eq!(own.data[0].day, Weekday::Monday);

        let err = ScheduleService::get_assignments(
            &store,
            ana,
            Role::Teacher,
            ScheduleFilterParams {
                teacher_id: Some(bia),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let everyone = ScheduleService::get_assignments(
            &store,
            UserId::new(),
            Role::Coordinator,
            ScheduleFilterParams {
                day: Some(Weekday::Monday),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(everyone.meta.total, 2);
    }

    #[tokio::test]
    async fn test_grid_and_conflicts_for_coordinator() {
        let store = store_with_registries().await;
        for subject in ["História", "Matemática"] {
            ScheduleService::create_assignment(
                &store,
                UserId::new(),
                booking(Weekday::Thursday, "14:00-15:00", subject, "101"),
            )
            .await
            .unwrap();
        }

        let grid = ScheduleService::get_grid(
            &store,
            UserId::new(),
            Role::Coordinator,
            GridParams::default(),
        )
        .await
        .unwrap();
        assert_eq!(grid.conflict_count, 1);
        let cell = grid
            .cell(Weekday::Thursday, "14:00-15:00".parse().unwrap())
            .unwrap();
        assert_eq!(cell.conflict.kind, Some(ConflictKind::Room));

        let conflicts = ScheduleService::get_conflicts(&store).await.unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].assignment_ids.len(), 2);
    }
}
