use crate::modules::tasks::core::decide::OpenTask;
use crate::shared::core::errors::ApplicationError;
use async_trait::async_trait;

/// Task side of an assignment. Both calls must be idempotent: the appointment handlers
/// re-run them to reconcile after a partial failure.
#[async_trait]
pub trait AssignmentTasks: Send + Sync {
    async fn open(&self, task: OpenTask) -> Result<(), ApplicationError>;

    /// Void the task and stop any timer still running on it.
    async fn void(&self, task_id: &str, reason: &str) -> Result<(), ApplicationError>;
}
