use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::NaiveDate;

use crate::shell::state::AppState;

pub async fn service_slots(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> impl IntoResponse {
    match state.availability.available_slots(date).await {
        Ok(availability) => Json(availability).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn modification_day(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> impl IntoResponse {
    match state.availability.modification_availability(date).await {
        Ok(availability) => Json(availability).into_response(),
        Err(error) => error.into_response(),
    }
}
