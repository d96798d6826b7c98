use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Extension, Json, Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::appointments::use_cases::assign_employees::inbound::http as assign_http;
use crate::modules::appointments::use_cases::book_appointment::inbound::http as book_http;
use crate::modules::appointments::use_cases::cancel_appointment::inbound::http as cancel_http;
use crate::modules::appointments::use_cases::query_appointments::inbound::http as appointments_http;
use crate::modules::calendar::use_cases::check_date::inbound::http as calendar_http;
use crate::modules::calendar::use_cases::manage_unavailable_dates::inbound::http as unavailable_http;
use crate::modules::slots::use_cases::available_slots::inbound::http as availability_http;
use crate::modules::tasks::use_cases::drive_task::inbound::http as tasks_http;
use crate::modules::time_tracking::use_cases::track_time::inbound::http as timers_http;
use crate::shared::core::errors::ApplicationError;
use crate::shell::graphql::{AppSchema, build_schema};
use crate::shell::state::AppState;

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApplicationError::Validation(_) | ApplicationError::NoEmployeesSelected => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApplicationError::InvalidSlot(_) => StatusCode::BAD_REQUEST,
            ApplicationError::SlotConflict { .. }
            | ApplicationError::TimerAlreadyOpen { .. }
            | ApplicationError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApplicationError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApplicationError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        if status.is_server_error() {
            tracing::warn!(error = %self, "request failed");
        }
        let body = json!({ "code": self.code(), "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let schema = build_schema(state.clone());
    Router::new()
        .route("/calendar/open-dates", get(calendar_http::open_dates))
        .route(
            "/calendar/unavailable-dates",
            post(unavailable_http::add).get(unavailable_http::list),
        )
        .route(
            "/calendar/unavailable-dates/{id}",
            delete(unavailable_http::remove),
        )
        .route("/availability/{date}", get(availability_http::service_slots))
        .route(
            "/availability/{date}/modification",
            get(availability_http::modification_day),
        )
        .route(
            "/appointments",
            post(book_http::handle).get(appointments_http::list),
        )
        .route("/appointments/{appointment_id}", get(appointments_http::get_one))
        .route(
            "/appointments/{appointment_id}/assignments",
            post(assign_http::handle),
        )
        .route(
            "/appointments/{appointment_id}/cancel",
            post(cancel_http::handle),
        )
        .route("/employees/{employee_id}/tasks", get(tasks_http::list))
        .route(
            "/employees/{employee_id}/tasks/{task_id}",
            get(tasks_http::get_one),
        )
        .route(
            "/employees/{employee_id}/tasks/{task_id}/{action}",
            post(tasks_http::act),
        )
        .route(
            "/employees/{employee_id}/timers",
            post(timers_http::start).get(timers_http::list),
        )
        .route("/employees/{employee_id}/timers/active", get(timers_http::active))
        .route(
            "/employees/{employee_id}/timers/{time_log_id}/pause",
            post(timers_http::pause),
        )
        .route(
            "/employees/{employee_id}/timers/{time_log_id}/resume",
            post(timers_http::resume),
        )
        .route(
            "/employees/{employee_id}/timers/{time_log_id}/stop",
            post(timers_http::stop),
        )
        .route("/gql", get(graphiql).post(graphql))
        .layer(Extension(schema))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn graphql(Extension(schema): Extension<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/gql").finish())
}
