use async_graphql::{EmptySubscription, ErrorExtensions, MergedObject, Schema};

use crate::modules::appointments::use_cases::assign_employees::inbound::graphql::AssignEmployeesMutation;
use crate::modules::appointments::use_cases::book_appointment::inbound::graphql::BookAppointmentMutation;
use crate::modules::appointments::use_cases::cancel_appointment::inbound::graphql::CancelAppointmentMutation;
use crate::modules::appointments::use_cases::query_appointments::inbound::graphql::AppointmentQuery;
use crate::modules::slots::use_cases::available_slots::inbound::graphql::AvailabilityQuery;
use crate::shared::core::errors::ApplicationError;
pub use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(AvailabilityQuery, AppointmentQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    BookAppointmentMutation,
    AssignEmployeesMutation,
    CancelAppointmentMutation,
);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(state)
        .finish()
}

impl ErrorExtensions for ApplicationError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}
