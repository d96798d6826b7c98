use crate::modules::tasks::core::events::TaskEvent;
use crate::modules::tasks::core::state::{Task, TaskState, TaskUpdate};
use crate::modules::tasks::core::status::TaskStatus;

pub fn evolve(state: TaskState, event: TaskEvent) -> TaskState {
    match (state, event) {
        (TaskState::None, TaskEvent::TaskAssignedV1(e)) => TaskState::Existing(Task {
            id: e.task_id,
            appointment_id: e.appointment_id,
            employee_id: e.employee_id,
            customer_id: e.customer_id,
            service_type: e.service_type,
            status: TaskStatus::Assigned,
            estimated_hours: e.estimated_hours,
            due_date: e.due_date,
            voided: false,
            history: vec![TaskUpdate {
                status: TaskStatus::Assigned,
                message: "Task assigned".into(),
                at: e.assigned_at,
                by: "admin".into(),
            }],
            created_at: e.assigned_at,
            updated_at: e.assigned_at,
        }),
        (TaskState::Existing(mut task), TaskEvent::TaskTransitionedV1(e)) if task.status == e.from => {
            task.status = e.to;
            task.updated_at = e.at;
            task.history.push(TaskUpdate {
                status: e.to,
                message: e
                    .notes
                    .unwrap_or_else(|| format!("Task {}", past_tense(e.to))),
                at: e.at,
                by: e.by,
            });
            TaskState::Existing(task)
        }
        (TaskState::Existing(mut task), TaskEvent::TaskVoidedV1(e)) => {
            task.voided = true;
            task.updated_at = e.at;
            task.history.push(TaskUpdate {
                status: task.status,
                message: e.reason,
                at: e.at,
                by: "system".into(),
            });
            TaskState::Existing(task)
        }
        (state, _) => state,
    }
}

fn past_tense(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Assigned => "assigned",
        TaskStatus::Accepted => "accepted",
        TaskStatus::Rejected => "rejected",
        TaskStatus::InProgress => "started",
        TaskStatus::Completed => "completed",
        TaskStatus::Delivered => "delivered",
    }
}
