use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult};

use crate::modules::appointments::core::state::Appointment;
use crate::shell::state::AppState;

#[derive(Default)]
pub struct CancelAppointmentMutation;

#[Object]
impl CancelAppointmentMutation {
    async fn cancel_appointment(
        &self,
        context: &Context<'_>,
        appointment_id: String,
        reason: Option<String>,
    ) -> GqlResult<Appointment> {
        let state = context.data_unchecked::<AppState>();
        state
            .cancel_appointment
            .handle(&appointment_id, reason)
            .await
            .map_err(|e| e.extend())
    }
}
