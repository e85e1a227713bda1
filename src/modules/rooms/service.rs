use anyhow::anyhow;
use chrono::Utc;
use classgrid_core::{AppError, Paginated};
use classgrid_db::collections::{ROOMS, SCHEDULES};
use classgrid_db::{DocumentStore, Query};
use classgrid_models::registry::{RegistryFilterParams, name_key};
use classgrid_models::{CreateRoomDto, PaginatedRoomsResponse, Room, RoomId, UpdateRoomDto};
use tracing::instrument;

pub struct RoomService;

impl RoomService {
    #[instrument(skip(store))]
    pub async fn create_room(store: &dyn DocumentStore, dto: CreateRoomDto) -> Result<Room, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::unprocessable(anyhow!("name cannot be blank")));
        }
        Self::ensure_name_free(store, &name, None).await?;

        let now = Utc::now();
        let room = Room {
            id: RoomId::new(),
            name,
            capacity: dto.capacity,
            created_at: now,
            updated_at: now,
        };

        ROOMS.put(store, &room.id.key(), &room).await?;
        Ok(room)
    }

    #[instrument(skip(store))]
    pub async fn get_rooms(
        store: &dyn DocumentStore,
        filters: RegistryFilterParams,
    ) -> Result<PaginatedRoomsResponse, AppError> {
        let mut rooms: Vec<Room> = ROOMS
            .all(store)
            .await?
            .into_iter()
            .filter(|r| filters.matches(&r.name))
            .collect();
        rooms.sort_by_key(|r| name_key(&r.name));

        Ok(Paginated::from_vec(rooms, &filters.pagination).into())
    }

    #[instrument(skip(store))]
    pub async fn get_room(store: &dyn DocumentStore, id: RoomId) -> Result<Room, AppError> {
        ROOMS
            .get(store, &id.key())
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Room not found")))
    }

    /// Looks a room up by name, ignoring case and surrounding whitespace.
    pub async fn find_by_name(store: &dyn DocumentStore, name: &str) -> Result<Option<Room>, AppError> {
        let wanted = name_key(name);
        Ok(ROOMS
            .all(store)
            .await?
            .into_iter()
            .find(|r| name_key(&r.name) == wanted))
    }

    #[instrument(skip(store))]
    pub async fn update_room(
        store: &dyn DocumentStore,
        id: RoomId,
        dto: UpdateRoomDto,
    ) -> Result<Room, AppError> {
        let mut room = Self::get_room(store, id).await?;

        if let Some(name) = dto.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::unprocessable(anyhow!("name cannot be blank")));
            }
            if name != room.name {
                Self::ensure_unreferenced(store, &room.name, "renamed").await?;
                Self::ensure_name_free(store, &name, Some(id)).await?;
                room.name = name;
            }
        }
        if let Some(capacity) = dto.capacity {
            room.capacity = Some(capacity);
        }
        room.updated_at = Utc::now();

        ROOMS.put(store, &id.key(), &room).await?;
        Ok(room)
    }

    #[instrument(skip(store))]
    pub async fn delete_room(store: &dyn DocumentStore, id: RoomId) -> Result<(), AppError> {
        let room = Self::get_room(store, id).await?;
        Self::ensure_unreferenced(store, &room.name, "deleted").await?;

        ROOMS.delete(store, &id.key()).await?;
        Ok(())
    }

    async fn ensure_name_free(
        store: &dyn DocumentStore,
        name: &str,
        except: Option<RoomId>,
    ) -> Result<(), AppError> {
        match Self::find_by_name(store, name).await? {
            Some(existing) if Some(existing.id) != except => Err(AppError::conflict(anyhow!(
                "A room named '{}' already exists",
                existing.name
            ))),
            _ => Ok(()),
        }
    }

    async fn ensure_unreferenced(
        store: &dyn DocumentStore,
        name: &str,
        action: &str,
    ) -> Result<(), AppError> {
        let used_by = SCHEDULES
            .find(store, &Query::new().eq("room", name))
            .await?
            .len();

        if used_by > 0 {
            return Err(AppError::bad_request(anyhow!(
                "Room '{}' is used by {} schedule assignment(s) and cannot be {}",
                name,
                used_by,
                action
            )));
        }
        Ok(())
    }
}
