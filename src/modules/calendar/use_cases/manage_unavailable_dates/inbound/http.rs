use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::shared::core::errors::ApplicationError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct AddUnavailableDateBody {
    pub date: NaiveDate,
    pub reason: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct RangeParams {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub async fn add(
    State(state): State<AppState>,
    body: Result<Json<AddUnavailableDateBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return ApplicationError::Validation(rejection.body_text()).into_response();
        }
    };
    match state
        .unavailable_dates
        .add(body.date, body.reason, body.description)
        .await
    {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.unavailable_dates.remove(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> impl IntoResponse {
    match state.unavailable_dates.list(params.from, params.to).await {
        Ok(entries) => Json(entries).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod manage_unavailable_dates_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::{delete, post},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::shell::state::AppState;
    use crate::tests::fixtures::app_state::make_test_state;

    use super::{add, list, remove};

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/calendar/unavailable-dates", post(add).get(list))
            .route("/calendar/unavailable-dates/{id}", delete(remove))
            .with_state(state)
    }

    fn add_request(body: &str) -> Request<Body> {
        Request::post("/calendar/unavailable-dates")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn it_should_add_then_remove_a_closure() {
        let app = app(make_test_state().state);
        let response = app
            .clone()
            .oneshot(add_request(r#"{"date":"2026-10-21","reason":"Holiday"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let id = body["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/calendar/unavailable-dates/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::delete(format!("/calendar/unavailable-dates/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn it_should_return_422_without_a_reason() {
        let response = app(make_test_state().state)
            .oneshot(add_request(r#"{"date":"2026-10-21","reason":" "}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
