use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CancelAppointmentBody {
    pub reason: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
    body: Option<Json<CancelAppointmentBody>>,
) -> impl IntoResponse {
    let reason = body.and_then(|Json(b)| b.reason);
    match state
        .cancel_appointment
        .handle(&appointment_id, reason)
        .await
    {
        Ok(appointment) => Json(appointment).into_response(),
        Err(error) => error.into_response(),
    }
}
