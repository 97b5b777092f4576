use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{create_alumni, delete_alumni, get_alumni, get_alumni_list, update_alumni};
use crate::state::AppState;

pub fn init_alumni_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_alumni).get(get_alumni_list))
        .route(
            "/{id}",
            get(get_alumni).put(update_alumni).delete(delete_alumni),
        )
}
