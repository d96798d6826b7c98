use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct AssignEmployeesBody {
    pub employee_ids: Vec<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
    body: Result<Json<AssignEmployeesBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return ApplicationError::Validation(rejection.body_text()).into_response();
        }
    };
    match state
        .assign_employees
        .handle(&appointment_id, body.employee_ids)
        .await
    {
        Ok(appointment) => Json(appointment).into_response(),
        Err(error) => error.into_response(),
    }
}
