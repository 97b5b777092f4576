use axum::{
    Router,
    routing::{delete, get},
};

use super::controller::{delete_user, get_users};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users))
        .route("/Users/{id}", delete(delete_user))
}
