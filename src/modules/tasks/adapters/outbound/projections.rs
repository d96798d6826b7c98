use crate::modules::tasks::core::state::Task;
use async_trait::async_trait;

#[async_trait]
pub trait TaskProjectionRepository: Send + Sync {
    async fn upsert(&self, task: Task) -> anyhow::Result<()>;
}

#[async_trait]
pub trait TaskQueries: Send + Sync {
    /// Tasks of one employee, voided ones excluded, oldest first.
    async fn list_by_employee(&self, employee_id: &str) -> anyhow::Result<Vec<Task>>;

    async fn list_by_appointment(&self, appointment_id: &str) -> anyhow::Result<Vec<Task>>;
}
