//! # Classgrid Models
//!
//! Domain models and DTOs for the Classgrid API.
//!
//! # Modules
//!
//! - [`auth`]: Login request/response and the CPF check body
//! - [`conflicts`]: Per-slot conflict detection over a schedule snapshot
//! - [`ids`]: Typed record ids
//! - [`registry`]: Helpers shared by the subject and room registries
//! - [`rooms`] / [`subjects`]: Registry records and DTOs
//! - [`schedules`]: Weekdays, time slots, assignments and the weekly grid
//! - [`users`]: Accounts and profile DTOs
//! - [`value_types`]: Validated `Email` and `Cpf`
//!
//! # Example
//!
//! ```ignore
//! use classgrid_models::conflicts::{ConflictKind, detect};
//! use classgrid_models::schedules::{TimeSlot, Weekday};
//!
//! let result = detect(&assignments, Weekday::Monday, "08:00-09:00".parse()?);
//! if result.kind == Some(ConflictKind::Room) {
//!     println!("double-booked room");
//! }
//! ```

pub mod auth;
pub mod conflicts;
pub mod ids;
pub mod registry;
pub mod rooms;
pub mod schedules;
pub mod subjects;
pub mod users;
pub mod value_types;

pub use classgrid_auth::Role;

pub use auth::{Claims, CpfCheckResponse, LoginRequest, LoginResponse, MessageResponse};

pub use conflicts::{ConflictKind, ConflictResult, SlotConflict, detect, scan};

pub use ids::{AssignmentId, RoomId, SubjectId, UserId};

pub use rooms::{CreateRoomDto, PaginatedRoomsResponse, Room, UpdateRoomDto};

pub use schedules::{
    CreateAssignmentDto, GridCell, GridParams, GridRow, PaginatedAssignmentsResponse,
    ScheduleAssignment, ScheduleFilterParams, ScheduleGrid, SlotCatalog, TimeSlot,
    UpdateAssignmentDto, Weekday,
};

pub use subjects::{CreateSubjectDto, PaginatedSubjectsResponse, Subject, UpdateSubjectDto};

pub use users::{
    ChangeEmailDto, ChangePasswordDto, PaginatedUsersResponse, RegisterDto, UpdateProfileDto,
    User, UserFilterParams, UserRecord,
};

pub use value_types::{Cpf, Email, ValueTypeError};
