use chrono::{DateTime, Utc};
use classgrid_core::{Paginated, PaginationMeta};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::RoomId;

/// A physical room assignments can be booked into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    /// Number of seats, if known
    pub capacity: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateRoomDto {
    #[validate(length(min = 1, max = 100))]
    #[schema(example = "Sala 101")]
    pub name: String,
    #[validate(range(min = 1, max = 1000))]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomDto {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 1, max = 1000))]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedRoomsResponse {
    pub data: Vec<Room>,
    pub meta: PaginationMeta,
}

impl From<Paginated<Room>> for PaginatedRoomsResponse {
    fn from(page: Paginated<Room>) -> Self {
        Self {
            data: page.data,
            meta: page.meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_capacity_range() {
        let dto = CreateRoomDto {
            name: "Lab 2".into(),
            capacity: Some(0),
        };
        assert!(dto.validate().is_err());

        let dto = CreateRoomDto {
            name: "Lab 2".into(),
            capacity: Some(30),
        };
        assert!(dto.validate().is_ok());
    }
}
