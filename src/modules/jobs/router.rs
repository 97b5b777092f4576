use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::controller::{
    create_job, get_job, get_jobs, get_jobs_by_alumni, get_trash, hard_delete_job, restore_job,
    soft_delete_job, update_job,
};
use crate::state::AppState;

pub fn init_jobs_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_job).get(get_jobs))
        .route("/detail/{id}", get(get_job))
        // `{id}` is the alumni id for GET and the job id otherwise
        .route(
            "/{id}",
            get(get_jobs_by_alumni)
                .put(update_job)
                .delete(soft_delete_job),
        )
}

pub fn init_trash_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_trash))
        .route("/{id}/restore", put(restore_job))
        .route("/{id}/hard-delete", delete(hard_delete_job))
}
