use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::modules::appointments::use_cases::book_appointment::handler::BookAppointment;
use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<BookAppointment>, JsonRejection>,
) -> impl IntoResponse {
    let Json(command) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return ApplicationError::Validation(rejection.body_text()).into_response();
        }
    };
    match state.book_appointment.handle(command).await {
        Ok(appointment) => (StatusCode::CREATED, Json(appointment)).into_response(),
        Err(error) => error.into_response(),
    }
}
