use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult};
use chrono::NaiveDate;

use crate::modules::appointments::core::state::Appointment;
use crate::shell::state::AppState;

#[derive(Default)]
pub struct AppointmentQuery;

#[Object]
impl AppointmentQuery {
    async fn appointment(&self, context: &Context<'_>, id: String) -> GqlResult<Appointment> {
        let state = context.data_unchecked::<AppState>();
        state
            .appointment_queries
            .get(&id)
            .await
            .map_err(|e| e.extend())
    }

    async fn appointments_by_customer(
        &self,
        context: &Context<'_>,
        customer_id: String,
    ) -> GqlResult<Vec<Appointment>> {
        let state = context.data_unchecked::<AppState>();
        state
            .appointment_queries
            .list_by_customer(&customer_id)
            .await
            .map_err(|e| e.extend())
    }

    async fn appointments_between(
        &self,
        context: &Context<'_>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> GqlResult<Vec<Appointment>> {
        let state = context.data_unchecked::<AppState>();
        state
            .appointment_queries
            .list_by_date_range(from, to)
            .await
            .map_err(|e| e.extend())
    }
}
