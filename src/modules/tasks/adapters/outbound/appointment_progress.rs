use crate::modules::tasks::core::status::TaskStatus;
use crate::shared::core::errors::ApplicationError;
use async_trait::async_trait;

/// Receives task status changes so the owning appointment can recompute its status.
#[async_trait]
pub trait AppointmentProgress: Send + Sync {
    /// Idempotent. Returns whether the appointment had not seen `status` yet.
    async fn task_progressed(
        &self,
        appointment_id: &str,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<bool, ApplicationError>;
}
