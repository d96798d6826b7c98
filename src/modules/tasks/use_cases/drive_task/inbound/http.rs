use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::tasks::core::decide::ActOnTask;
use crate::modules::tasks::core::status::TaskAction;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize, Default)]
pub struct ActOnTaskBody {
    pub notes: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> impl IntoResponse {
    match state.task_lifecycle.list_for_employee(&employee_id).await {
        Ok(tasks) => Json(tasks).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn get_one(
    State(state): State<AppState>,
    Path((employee_id, task_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.task_lifecycle.get(&task_id, &employee_id).await {
        Ok(task) => Json(task).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn act(
    State(state): State<AppState>,
    path: Result<Path<(String, String, TaskAction)>, PathRejection>,
    body: Option<Json<ActOnTaskBody>>,
) -> impl IntoResponse {
    let Path((employee_id, task_id, action)) = match path {
        Ok(p) => p,
        Err(rejection) => {
            return ApplicationError::Validation(rejection.body_text()).into_response();
        }
    };
    let Json(body) = body.unwrap_or_default();
    let command = ActOnTask {
        task_id,
        employee_id,
        action,
        notes: body.notes,
    };
    match state.task_lifecycle.act(command).await {
        Ok(acted) => Json(acted).into_response(),
        Err(error) => error.into_response(),
    }
}
