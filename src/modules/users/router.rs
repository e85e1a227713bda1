use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{change_email, change_password, get_profile, get_users, update_profile};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/me", get(get_profile).put(update_profile))
        .route("/me/password", post(change_password))
        .route("/me/email", post(change_email))
}
