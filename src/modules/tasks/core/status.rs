// Task lifecycle table.
//
//   Assigned   --accept-->   Accepted
//   Assigned   --reject-->   Rejected   (terminal)
//   Accepted   --start--->   InProgress
//   InProgress --complete--> Completed
//   Completed  --deliver-->  Delivered  (terminal)

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, async_graphql::Enum,
)]
pub enum TaskStatus {
    Assigned,
    Accepted,
    Rejected,
    InProgress,
    Completed,
    Delivered,
}

impl TaskStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Rejected | TaskStatus::Delivered)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskStatus::Assigned => "Assigned",
            TaskStatus::Accepted => "Accepted",
            TaskStatus::Rejected => "Rejected",
            TaskStatus::InProgress => "InProgress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Delivered => "Delivered",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskAction {
    Accept,
    Reject,
    Start,
    Complete,
    Deliver,
}

impl fmt::Display for TaskAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskAction::Accept => "accept",
            TaskAction::Reject => "reject",
            TaskAction::Start => "start",
            TaskAction::Complete => "complete",
            TaskAction::Deliver => "deliver",
        };
        f.write_str(label)
    }
}

impl TaskAction {
    /// The status every legal use of this action leads to.
    pub fn target(self) -> TaskStatus {
        match self {
            TaskAction::Accept => TaskStatus::Accepted,
            TaskAction::Reject => TaskStatus::Rejected,
            TaskAction::Start => TaskStatus::InProgress,
            TaskAction::Complete => TaskStatus::Completed,
            TaskAction::Deliver => TaskStatus::Delivered,
        }
    }
}

pub fn transition(from: TaskStatus, action: TaskAction) -> Option<TaskStatus> {
    use TaskAction::*;
    use TaskStatus::*;
    match (from, action) {
        (Assigned, Accept) => Some(Accepted),
        (Assigned, Reject) => Some(Rejected),
        (Accepted, Start) => Some(InProgress),
        (InProgress, Complete) => Some(Completed),
        (Completed, Deliver) => Some(Delivered),
        _ => None,
    }
}
