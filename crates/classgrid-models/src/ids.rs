//! Strongly-typed ID newtypes for domain entities.
//!
//! Each record kind gets its own wrapper around `Uuid`, so a `RoomId` cannot be
//! passed where a `UserId` is expected. IDs serialize as plain UUID strings,
//! which is also the document id used in the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
        #[serde(transparent)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random ID.
            #[inline]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[inline]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            #[inline]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }

            /// The store document id for this record.
            pub fn key(&self) -> String {
                self.0.to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            #[inline]
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            #[inline]
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed ID for user accounts (teachers and coordinators).
    UserId
);

define_id!(
    /// Strongly-typed ID for subject registry entries.
    SubjectId
);

define_id!(
    /// Strongly-typed ID for room registry entries.
    RoomId
);

define_id!(
    /// Strongly-typed ID for schedule assignments.
    AssignmentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_debug_and_display() {
        let id = UserId::from_uuid(Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc));
        assert_eq!(format!("{:?}", id), "UserId(12345678-1234-1234-1234-123456789abc)");
        assert_eq!(id.to_string(), "12345678-1234-1234-1234-123456789abc");
        assert_eq!(id.key(), id.to_string());
    }

    #[test]
    fn test_id_from_str() {
        let id: RoomId = "12345678-1234-1234-1234-123456789abc".parse().unwrap();
        assert_eq!(
            id.into_inner(),
            Uuid::from_u128(0x12345678_1234_1234_1234_123456789abc)
        );
        assert!("invalid-uuid".parse::<RoomId>().is_err());
    }

    #[test]
    fn test_id_serde_is_transparent() {
        let id = AssignmentId::from_uuid(Uuid::from_u128(1));
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""00000000-0000-0000-0000-000000000001""#);
        let back: AssignmentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_new_ids_are_distinct() {
        assert_ne!(SubjectId::new(), SubjectId::new());
    }
}
