use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct OpenDatesParams {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

pub async fn open_dates(
    State(state): State<AppState>,
    Query(params): Query<OpenDatesParams>,
) -> impl IntoResponse {
    match state.calendar.open_dates(params.from, params.to).await {
        Ok(dates) => Json(dates).into_response(),
        Err(error) => error.into_response(),
    }
}
