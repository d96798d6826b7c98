use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult};

use crate::modules::appointments::core::state::Appointment;
use crate::shell::state::AppState;

#[derive(Default)]
pub struct AssignEmployeesMutation;

#[Object]
impl AssignEmployeesMutation {
    async fn assign_employees(
        &self,
        context: &Context<'_>,
        appointment_id: String,
        employee_ids: Vec<String>,
    ) -> GqlResult<Appointment> {
        let state = context.data_unchecked::<AppState>();
        state
            .assign_employees
            .handle(&appointment_id, employee_ids)
            .await
            .map_err(|e| e.extend())
    }
}
