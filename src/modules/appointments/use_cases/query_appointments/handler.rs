use crate::modules::appointments::adapters::outbound::appointment_stream::AppointmentStream;
use crate::modules::appointments::adapters::outbound::projections::AppointmentQueries;
use crate::modules::appointments::core::events::AppointmentEvent;
use crate::modules::appointments::core::state::Appointment;
use crate::shared::core::errors::ApplicationError;
use crate::shared::infrastructure::event_store::EventStore;
use chrono::NaiveDate;
use std::sync::Arc;

/// Single appointments come from their stream; lists come from the projection.
pub struct QueryAppointmentsHandler<TEventStore>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
{
    stream: Arc<AppointmentStream<TEventStore>>,
    queries: Arc<dyn AppointmentQueries>,
}

impl<TEventStore> QueryAppointmentsHandler<TEventStore>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
{
    pub fn new(stream: Arc<AppointmentStream<TEventStore>>, queries: Arc<dyn AppointmentQueries>) -> Self {
        Self { stream, queries }
    }

    pub async fn get(&self, appointment_id: &str) -> Result<Appointment, ApplicationError> {
        self.stream.get(appointment_id).await
    }

    pub async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Appointment>, ApplicationError> {
        Ok(self.queries.list_by_customer(customer_id).await?)
    }

    pub async fn list_by_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Appointment>, ApplicationError> {
        if to < from {
            return Err(ApplicationError::Validation(
                "range end must not precede its start".into(),
            ));
        }
        tracing::debug!(%from, %to, "listing appointments");
        Ok(self.queries.list_by_date_range(from, to).await?)
    }
}
