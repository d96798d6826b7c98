use crate::modules::tasks::core::status::TaskStatus;
use crate::shared::core::primitives::ServiceType;
use async_graphql::SimpleObject;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declaration order is lifecycle order; `Cancelled` sits outside the progression.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, async_graphql::Enum,
)]
pub enum AppointmentStatus {
    Pending,
    Approved,
    InProgress,
    Completed,
    Delivered,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Approved => "Approved",
            AppointmentStatus::InProgress => "InProgress",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Delivered => "Delivered",
            AppointmentStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

impl From<TaskStatus> for AppointmentStatus {
    /// Where a single task puts the appointment. Rejected tasks do not count, so their
    /// mapping is only a placeholder.
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Assigned | TaskStatus::Accepted | TaskStatus::Rejected => {
                AppointmentStatus::Approved
            }
            TaskStatus::InProgress => AppointmentStatus::InProgress,
            TaskStatus::Completed => AppointmentStatus::Completed,
            TaskStatus::Delivered => AppointmentStatus::Delivered,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct Assignment {
    pub employee_id: String,
    pub task_id: String,
    pub task_status: TaskStatus,
    pub voided: bool,
}

impl Assignment {
    pub fn is_active(&self) -> bool {
        !self.voided && self.task_status != TaskStatus::Rejected
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct Appointment {
    pub id: String,
    pub customer_id: String,
    pub service_type: ServiceType,
    pub date: NaiveDate,
    pub slot_id: Option<String>,
    pub modification_item_ids: Vec<String>,
    pub vehicle_id: Option<String>,
    pub instructions: Option<String>,
    pub status: AppointmentStatus,
    pub assignments: Vec<Assignment>,
    pub estimated_cost: i64,
    pub estimated_hours: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Appointment {
    /// Employees holding an open task, in assignment order.
    pub fn assigned_employee_ids(&self) -> Vec<String> {
        self.assignments
            .iter()
            .filter(|a| a.is_active())
            .map(|a| a.employee_id.clone())
            .collect()
    }

    pub fn active_assignment_of(&self, employee_id: &str) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|a| a.is_active() && a.employee_id == employee_id)
    }

    /// Least advanced active task decides; the status never moves backwards and stays put
    /// while no task is active.
    pub fn aggregate_status(&self) -> AppointmentStatus {
        if matches!(
            self.status,
            AppointmentStatus::Pending | AppointmentStatus::Cancelled
        ) {
            return self.status;
        }
        self.assignments
            .iter()
            .filter(|a| a.is_active())
            .map(|a| AppointmentStatus::from(a.task_status))
            .min()
            .map_or(self.status, |least| least.max(self.status))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppointmentState {
    #[default]
    None,
    Existing(Appointment),
}

impl AppointmentState {
    pub fn appointment(&self) -> Option<&Appointment> {
        match self {
            AppointmentState::None => None,
            AppointmentState::Existing(appointment) => Some(appointment),
        }
    }
}

#[cfg(test)]
mod appointment_state_tests {
    use super::*;
    use crate::tests::fixtures::appointments::approved_appointment;
    use rstest::rstest;

    fn with_tasks(statuses: &[(TaskStatus, bool)]) -> Appointment {
        let mut appointment = approved_appointment();
        appointment.assignments = statuses
            .iter()
            .enumerate()
            .map(|(i, (status, voided))| Assignment {
                employee_id: format!("E{i}"),
                task_id: format!("t-{i}"),
                task_status: *status,
                voided: *voided,
            })
            .collect();
        appointment
    }

    #[rstest]
    #[case(&[(TaskStatus::Completed, false), (TaskStatus::InProgress, false)], AppointmentStatus::InProgress)]
    #[case(&[(TaskStatus::Completed, false), (TaskStatus::Completed, false)], AppointmentStatus::Completed)]
    #[case(&[(TaskStatus::Completed, false), (TaskStatus::Rejected, false)], AppointmentStatus::Completed)]
    #[case(&[(TaskStatus::Delivered, false), (TaskStatus::Accepted, true)], AppointmentStatus::Delivered)]
    #[case(&[(TaskStatus::Delivered, false), (TaskStatus::Completed, false)], AppointmentStatus::Completed)]
    #[case(&[(TaskStatus::Rejected, false)], AppointmentStatus::Approved)]
    fn it_should_follow_the_least_advanced_active_task(
        #[case] tasks: &[(TaskStatus, bool)],
        #[case] expected: AppointmentStatus,
    ) {
        assert_eq!(with_tasks(tasks).aggregate_status(), expected);
    }

    #[rstest]
    fn it_should_never_move_backwards() {
        let mut appointment = with_tasks(&[(TaskStatus::Assigned, false)]);
        appointment.status = AppointmentStatus::InProgress;
        assert_eq!(appointment.aggregate_status(), AppointmentStatus::InProgress);
    }

    #[rstest]
    fn it_should_list_only_employees_with_open_tasks() {
        let appointment = with_tasks(&[
            (TaskStatus::Accepted, false),
            (TaskStatus::Rejected, false),
            (TaskStatus::Assigned, true),
        ]);
        assert_eq!(appointment.assigned_employee_ids(), vec!["E0".to_string()]);
    }
}
