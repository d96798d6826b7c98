use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeLogStatus {
    Active,
    Paused,
    Completed,
}

impl fmt::Display for TimeLogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimeLogStatus::Active => "Active",
            TimeLogStatus::Paused => "Paused",
            TimeLogStatus::Completed => "Completed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub start: i64,
    pub end: Option<i64>,
}

impl Interval {
    pub fn seconds(&self) -> i64 {
        self.end
            .map(|end| (end - self.start).max(0) / 1000)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeLog {
    pub id: String,
    pub employee_id: String,
    pub task_id: String,
    pub status: TimeLogStatus,
    pub start_time: i64,
    pub end_time: Option<i64>,
    pub intervals: Vec<Interval>,
    /// Sum of closed intervals only; an open interval is not counted until it closes.
    pub duration_seconds: i64,
    pub notes: Option<String>,
}

impl TimeLog {
    pub fn is_open(&self) -> bool {
        matches!(self.status, TimeLogStatus::Active | TimeLogStatus::Paused)
    }

    /// Presentation value, rounded to two decimals. The stored duration stays in whole seconds.
    pub fn hours_worked(&self) -> f64 {
        hours_worked(self.duration_seconds)
    }
}

pub fn hours_worked(seconds: i64) -> f64 {
    (seconds as f64 / 36.0).round() / 100.0
}

/// All time logs of one employee in the order they were started.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeTimers {
    pub logs: Vec<TimeLog>,
}

impl EmployeeTimers {
    pub fn open(&self) -> Option<&TimeLog> {
        self.logs.iter().find(|log| log.is_open())
    }

    pub fn find(&self, time_log_id: &str) -> Option<&TimeLog> {
        self.logs.iter().find(|log| log.id == time_log_id)
    }

    pub fn for_task<'a>(&'a self, task_id: &'a str) -> impl Iterator<Item = &'a TimeLog> + 'a {
        self.logs.iter().filter(move |log| log.task_id == task_id)
    }
}
