use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shortcuts_jobs::task::Task;

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize)]
pub struct TaskPath {
    task_id: String,
}

pub async fn poll_handler<P>(
    Path(path): Path<TaskPath>,
    State(state): State<Arc<AppState<P>>>,
) -> Result<Json<Task>, ApiError>
where
    P: Send + Sync + 'static,
{
    state
        .engine
        .task(&path.task_id)
        .map(Json)
        .ok_or_else(|| {
            ApiError::NotFound(format!("404 Could not find Task with ID {}", path.task_id))
        })
}
