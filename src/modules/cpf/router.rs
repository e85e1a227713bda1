use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::check_cpf;

pub fn init_cpf_router() -> Router<AppState> {
    Router::new().route("/{value}", get(check_cpf))
}
