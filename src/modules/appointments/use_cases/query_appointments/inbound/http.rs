use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ListAppointmentsParams {
    pub customer_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(appointment_id): Path<String>,
) -> impl IntoResponse {
    match state.appointment_queries.get(&appointment_id).await {
        Ok(appointment) => Json(appointment).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListAppointmentsParams>,
) -> impl IntoResponse {
    let listed = match (params.customer_id, params.from, params.to) {
        (Some(customer_id), None, None) => {
            state.appointment_queries.list_by_customer(&customer_id).await
        }
        (None, Some(from), Some(to)) => {
            state.appointment_queries.list_by_date_range(from, to).await
        }
        _ => Err(ApplicationError::Validation(
            "filter by customer_id, or by from and to".into(),
        )),
    };
    match listed {
        Ok(appointments) => Json(appointments).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod query_appointments_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::shell::state::AppState;
    use crate::tests::fixtures::app_state::{book_service, make_test_state};

    use super::{get_one, list};

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/appointments", get(list))
            .route("/appointments/{appointment_id}", get(get_one))
            .with_state(state)
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn it_should_list_by_customer_and_by_range() {
        let state = make_test_state().state;
        let booked = book_service(&state, "2026-10-20#1").await;
        let app = app(state);

        let (status, body) = call(app.clone(), "/appointments?customer_id=c-1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], booked.id.as_str());

        let (_, body) = call(app.clone(), "/appointments?from=2026-10-19&to=2026-10-21").await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = call(app, "/appointments/a-404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn it_should_require_a_filter() {
        let (status, body) = call(app(make_test_state().state), "/appointments").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
