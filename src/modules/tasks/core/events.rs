pub mod v1 {
    use crate::modules::tasks::core::status::{TaskAction, TaskStatus};
    use crate::shared::core::primitives::ServiceType;
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct TaskAssignedV1 {
        pub task_id: String,
        pub appointment_id: String,
        pub employee_id: String,
        pub customer_id: String,
        pub service_type: ServiceType,
        pub estimated_hours: i64,
        pub due_date: NaiveDate,
        pub assigned_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct TaskTransitionedV1 {
        pub task_id: String,
        pub action: TaskAction,
        pub from: TaskStatus,
        pub to: TaskStatus,
        pub notes: Option<String>,
        pub by: String,
        pub at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct TaskVoidedV1 {
        pub task_id: String,
        pub reason: String,
        pub at: i64,
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum TaskEvent {
    TaskAssignedV1(v1::TaskAssignedV1),
    TaskTransitionedV1(v1::TaskTransitionedV1),
    TaskVoidedV1(v1::TaskVoidedV1),
}

pub fn task_stream_id(task_id: &str) -> String {
    format!("Task-{task_id}")
}
