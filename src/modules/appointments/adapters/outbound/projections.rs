use crate::modules::appointments::core::state::Appointment;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait AppointmentProjectionRepository: Send + Sync {
    async fn upsert(&self, appointment: Appointment) -> anyhow::Result<()>;
}

#[async_trait]
pub trait AppointmentQueries: Send + Sync {
    async fn get(&self, appointment_id: &str) -> anyhow::Result<Option<Appointment>>;

    /// Newest first.
    async fn list_by_customer(&self, customer_id: &str) -> anyhow::Result<Vec<Appointment>>;

    /// Inclusive on both ends, ordered by date then creation.
    async fn list_by_date_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<Appointment>>;
}
