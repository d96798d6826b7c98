// Pure decisions for the task lifecycle.
//
// Responsibilities
// - Enforce the transition table; anything else is InvalidTransition with no events.
// - A task is only visible to the employee it is assigned to.
// - Tell the admin about reject, complete and deliver. The customer hears from the
//   appointment, which waits for every assigned employee.
// - `start` on an InProgress task is accepted with no events: the caller resumes the timer.

use crate::modules::tasks::core::events::{
    TaskEvent,
    v1::{TaskAssignedV1, TaskTransitionedV1, TaskVoidedV1},
};
use crate::modules::tasks::core::state::{Task, TaskState};
use crate::modules::tasks::core::status::{TaskAction, TaskStatus, transition};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::notifications::{Notification, NotificationKind, Recipient};
use crate::shared::core::primitives::{Decision, ServiceType};
use chrono::NaiveDate;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TaskDecideError {
    #[error("task {task_id} not found")]
    UnknownTask { task_id: String },

    #[error("cannot {action} a task that is {state}")]
    InvalidTransition { state: String, action: TaskAction },
}

pub type TaskDecision = Decision<TaskEvent, Notification, TaskDecideError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTask {
    pub task_id: String,
    pub appointment_id: String,
    pub employee_id: String,
    pub customer_id: String,
    pub service_type: ServiceType,
    pub estimated_hours: i64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActOnTask {
    pub task_id: String,
    pub employee_id: String,
    pub action: TaskAction,
    pub notes: Option<String>,
}

/// Opening a task that already exists is a no-op, so assignment retries can reconcile.
pub fn decide_open(state: &TaskState, command: OpenTask, now: i64) -> TaskDecision {
    match state {
        TaskState::Existing(_) => Decision::accept(Vec::new()),
        TaskState::None => Decision::accept(vec![TaskEvent::TaskAssignedV1(TaskAssignedV1 {
            task_id: command.task_id,
            appointment_id: command.appointment_id,
            employee_id: command.employee_id,
            customer_id: command.customer_id,
            service_type: command.service_type,
            estimated_hours: command.estimated_hours,
            due_date: command.due_date,
            assigned_at: now,
        })]),
    }
}

pub fn decide_act(state: &TaskState, command: ActOnTask, now: i64) -> TaskDecision {
    let task = match state.task() {
        Some(task) if task.employee_id == command.employee_id => task,
        _ => {
            return Decision::reject(TaskDecideError::UnknownTask {
                task_id: command.task_id,
            });
        }
    };
    if task.voided {
        return Decision::reject(TaskDecideError::InvalidTransition {
            state: "voided".into(),
            action: command.action,
        });
    }
    if task.status == TaskStatus::InProgress && command.action == TaskAction::Start {
        return Decision::accept(Vec::new());
    }
    let Some(to) = transition(task.status, command.action) else {
        return Decision::reject(TaskDecideError::InvalidTransition {
            state: task.status.to_string(),
            action: command.action,
        });
    };
    let intents = notifications_for(task, command.action, &command.employee_id, now);
    Decision::Accepted {
        events: vec![TaskEvent::TaskTransitionedV1(TaskTransitionedV1 {
            task_id: task.id.clone(),
            action: command.action,
            from: task.status,
            to,
            notes: command.notes.filter(|n| !n.trim().is_empty()),
            by: command.employee_id,
            at: now,
        })],
        intents,
    }
}

/// Voiding skips tasks that are already voided or terminal.
pub fn decide_void(state: &TaskState, task_id: &str, reason: &str, now: i64) -> TaskDecision {
    match state.task() {
        None => Decision::reject(TaskDecideError::UnknownTask {
            task_id: task_id.to_string(),
        }),
        Some(task) if task.voided || task.status.is_terminal() => Decision::accept(Vec::new()),
        Some(task) => Decision::accept(vec![TaskEvent::TaskVoidedV1(TaskVoidedV1 {
            task_id: task.id.clone(),
            reason: reason.to_string(),
            at: now,
        })]),
    }
}

impl From<TaskDecideError> for ApplicationError {
    fn from(error: TaskDecideError) -> Self {
        match error {
            TaskDecideError::UnknownTask { task_id } => ApplicationError::not_found("task", task_id),
            TaskDecideError::InvalidTransition { state, action } => {
                ApplicationError::invalid_transition(state, action)
            }
        }
    }
}

fn notifications_for(task: &Task, action: TaskAction, employee_id: &str, now: i64) -> Vec<Notification> {
    let notify = |event_type: &str, recipient: Recipient, kind, title: &str, message: String| {
        Notification {
            event_type: event_type.to_string(),
            recipient,
            kind,
            title: title.to_string(),
            message,
            appointment_id: Some(task.appointment_id.clone()),
            task_id: Some(task.id.clone()),
            occurred_at: now,
        }
    };
    match action {
        TaskAction::Reject => vec![notify(
            "TaskRejected",
            Recipient::Admin,
            NotificationKind::Warning,
            "Task Rejected - Reassignment Required",
            format!(
                "Employee {employee_id} rejected the {} task for appointment {}. Please reassign.",
                task.service_type, task.appointment_id
            ),
        )],
        TaskAction::Complete => vec![notify(
            "TaskCompleted",
            Recipient::Admin,
            NotificationKind::Success,
            "Task Completed",
            format!(
                "Employee {employee_id} completed the {} task for appointment {}.",
                task.service_type, task.appointment_id
            ),
        )],
        TaskAction::Deliver => vec![notify(
            "TaskDelivered",
            Recipient::Admin,
            NotificationKind::Success,
            "Vehicle Delivered",
            format!(
                "Employee {employee_id} delivered the vehicle for appointment {}.",
                task.appointment_id
            ),
        )],
        TaskAction::Accept | TaskAction::Start => Vec::new(),
    }
}
