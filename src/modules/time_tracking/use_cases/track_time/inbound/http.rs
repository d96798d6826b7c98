use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::modules::time_tracking::core::state::TimeLog;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct StartTimerBody {
    pub task_id: String,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct StopTimerBody {
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ListTimersParams {
    pub task_id: Option<String>,
}

#[derive(Serialize)]
pub struct TimeLogResponse {
    #[serde(flatten)]
    pub time_log: TimeLog,
    pub hours_worked: f64,
}

impl From<TimeLog> for TimeLogResponse {
    fn from(time_log: TimeLog) -> Self {
        let hours_worked = time_log.hours_worked();
        Self {
            time_log,
            hours_worked,
        }
    }
}

pub async fn start(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    body: Result<Json<StartTimerBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return ApplicationError::Validation(rejection.body_text()).into_response();
        }
    };
    match state
        .time_tracking
        .start(&employee_id, &body.task_id, body.notes)
        .await
    {
        Ok(log) => (StatusCode::CREATED, Json(TimeLogResponse::from(log))).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn pause(
    State(state): State<AppState>,
    Path((employee_id, time_log_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.time_tracking.pause(&employee_id, &time_log_id).await {
        Ok(log) => Json(TimeLogResponse::from(log)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn resume(
    State(state): State<AppState>,
    Path((employee_id, time_log_id)): Path<(String, String)>,
) -> impl IntoResponse {
    match state.time_tracking.resume(&employee_id, &time_log_id).await {
        Ok(log) => Json(TimeLogResponse::from(log)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn stop(
    State(state): State<AppState>,
    Path((employee_id, time_log_id)): Path<(String, String)>,
    body: Option<Json<StopTimerBody>>,
) -> impl IntoResponse {
    let notes = body.and_then(|Json(b)| b.notes);
    match state
        .time_tracking
        .stop(&employee_id, &time_log_id, notes)
        .await
    {
        Ok(log) => Json(TimeLogResponse::from(log)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn active(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> impl IntoResponse {
    match state.time_tracking.active_for(&employee_id).await {
        Ok(log) => Json(log.map(TimeLogResponse::from)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(params): Query<ListTimersParams>,
) -> impl IntoResponse {
    let listed = match params.task_id {
        Some(task_id) => state.time_tracking.list_for_task(&employee_id, &task_id).await,
        None => state.time_tracking.list_for_employee(&employee_id).await,
    };
    match listed {
        Ok(logs) => Json(
            logs.into_iter()
                .map(TimeLogResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(error) => error.into_response(),
    }
}
