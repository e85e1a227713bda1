use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use classgrid_core::errors::ErrorResponse;
use classgrid_core::{PaginationMeta, PaginationParams};
use classgrid_models::{
    ChangeEmailDto, ChangePasswordDto, ConflictKind, ConflictResult, CpfCheckResponse,
    CreateAssignmentDto, CreateRoomDto, CreateSubjectDto, GridCell, GridRow, LoginRequest,
    LoginResponse, MessageResponse, PaginatedAssignmentsResponse, PaginatedRoomsResponse,
    PaginatedSubjectsResponse, PaginatedUsersResponse, RegisterDto, Role, Room,
    ScheduleAssignment, ScheduleGrid, SlotCatalog, SlotConflict, Subject, TimeSlot,
    UpdateAssignmentDto, UpdateProfileDto, UpdateRoomDto, UpdateSubjectDto, User, Weekday,
};

use crate::modules::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health_check,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::change_password,
        crate::modules::users::controller::change_email,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::rooms::controller::create_room,
        crate::modules::rooms::controller::get_rooms,
        crate::modules::rooms::controller::get_room,
        crate::modules::rooms::controller::update_room,
        crate::modules::rooms::controller::delete_room,
        crate::modules::schedules::controller::get_slots,
        crate::modules::schedules::controller::create_assignment,
        crate::modules::schedules::controller::get_assignments,
        crate::modules::schedules::controller::get_grid,
        crate::modules::schedules::controller::get_conflicts,
        crate::modules::schedules::controller::get_assignment,
        crate::modules::schedules::controller::update_assignment,
        crate::modules::schedules::controller::delete_assignment,
        crate::modules::cpf::controller::check_cpf,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            MessageResponse,
            PaginationMeta,
            PaginationParams,
            Role,
            User,
            RegisterDto,
            LoginRequest,
            LoginResponse,
            UpdateProfileDto,
            ChangePasswordDto,
            ChangeEmailDto,
            PaginatedUsersResponse,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            PaginatedSubjectsResponse,
            Room,
            CreateRoomDto,
            UpdateRoomDto,
            PaginatedRoomsResponse,
            Weekday,
            TimeSlot,
            ScheduleAssignment,
            CreateAssignmentDto,
            UpdateAssignmentDto,
            PaginatedAssignmentsResponse,
            SlotCatalog,
            ScheduleGrid,
            GridRow,
            GridCell,
            ConflictKind,
            ConflictResult,
            SlotConflict,
            CpfCheckResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Teacher registration and login"),
        (name = "Users", description = "Profile and account management"),
        (name = "Subjects", description = "Subject registry"),
        (name = "Rooms", description = "Room registry"),
        (name = "Schedules", description = "Weekly timetable, grid and conflict detection"),
        (name = "CPF", description = "CPF validation and formatting")
    ),
    info(
        title = "Classgrid API",
        version = "0.1.0",
        description = "Weekly class timetables for teachers, with CPF-validated accounts and cross-teacher conflict detection.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
