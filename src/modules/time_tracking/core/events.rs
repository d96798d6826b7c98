pub mod v1 {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct TimerStartedV1 {
        pub time_log_id: String,
        pub employee_id: String,
        pub task_id: String,
        pub started_at: i64,
        pub notes: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct TimerPausedV1 {
        pub time_log_id: String,
        pub paused_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct TimerResumedV1 {
        pub time_log_id: String,
        pub resumed_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct TimerStoppedV1 {
        pub time_log_id: String,
        pub stopped_at: i64,
        pub notes: Option<String>,
    }
}

/// Events of the `EmployeeTimer-{employeeId}` stream. Every time log of one employee
/// lives in that single stream.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum TimerEvent {
    TimerStartedV1(v1::TimerStartedV1),
    TimerPausedV1(v1::TimerPausedV1),
    TimerResumedV1(v1::TimerResumedV1),
    TimerStoppedV1(v1::TimerStoppedV1),
}

pub fn timer_stream_id(employee_id: &str) -> String {
    format!("EmployeeTimer-{employee_id}")
}
