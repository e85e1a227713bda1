use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_room, delete_room, get_room, get_rooms, update_room};

pub fn init_rooms_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_rooms).post(create_room))
        .route("/{id}", get(get_room).put(update_room).delete(delete_room))
}
