use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_assignment, delete_assignment, get_assignment, get_assignments, get_conflicts,
    get_grid, get_slots, update_assignment,
};

pub fn init_schedules_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_assignments).post(create_assignment))
        .route("/slots", get(get_slots))
        .route("/grid", get(get_grid))
        .route("/conflicts", get(get_conflicts))
        .route(
            "/{id}",
            get(get_assignment)
                .put(update_assignment)
                .delete(delete_assignment),
        )
}
