use crate::modules::tasks::core::status::TaskStatus;
use crate::shared::core::primitives::ServiceType;
use chrono::NaiveDate;
use serde::Serialize;

/// One line of a task's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    pub status: TaskStatus,
    pub message: String,
    pub at: i64,
    pub by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: String,
    pub appointment_id: String,
    pub employee_id: String,
    pub customer_id: String,
    pub service_type: ServiceType,
    pub status: TaskStatus,
    pub estimated_hours: i64,
    pub due_date: NaiveDate,
    pub voided: bool,
    pub history: Vec<TaskUpdate>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Task {
    /// Counts toward the appointment status: not voided and not rejected.
    pub fn is_active(&self) -> bool {
        !self.voided && self.status != TaskStatus::Rejected
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskState {
    #[default]
    None,
    Existing(Task),
}

impl TaskState {
    pub fn task(&self) -> Option<&Task> {
        match self {
            TaskState::None => None,
            TaskState::Existing(task) => Some(task),
        }
    }
}
