//! The collections the application stores its records in.

use classgrid_models::{Room, ScheduleAssignment, Subject, UserRecord};

use crate::collection::Collection;

pub const USERS: Collection<UserRecord> = Collection::new("users");
pub const SUBJECTS: Collection<Subject> = Collection::new("subjects");
pub const ROOMS: Collection<Room> = Collection::new("rooms");
pub const SCHEDULES: Collection<ScheduleAssignment> = Collection::new("schedules");
