use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult};
use chrono::NaiveDate;

use crate::modules::appointments::core::state::Appointment;
use crate::modules::appointments::use_cases::book_appointment::handler::BookAppointment;
use crate::shared::core::primitives::ServiceType;
use crate::shell::state::AppState;

#[derive(Default)]
pub struct BookAppointmentMutation;

#[Object]
impl BookAppointmentMutation {
    #[allow(clippy::too_many_arguments)]
    async fn book_appointment(
        &self,
        context: &Context<'_>,
        customer_id: String,
        service_type: ServiceType,
        date: NaiveDate,
        slot_id: Option<String>,
        modification_item_ids: Option<Vec<String>>,
        vehicle_id: Option<String>,
        instructions: Option<String>,
    ) -> GqlResult<Appointment> {
        let state = context.data_unchecked::<AppState>();
        let command = BookAppointment {
            customer_id,
            service_type,
            date,
            slot_id,
            modification_item_ids: modification_item_ids.unwrap_or_default(),
            vehicle_id,
            instructions,
        };
        state
            .book_appointment
            .handle(command)
            .await
            .map_err(|e| e.extend())
    }
}
