pub mod v1 {
    use crate::modules::appointments::core::state::AppointmentStatus;
    use crate::modules::tasks::core::status::TaskStatus;
    use crate::shared::core::primitives::ServiceType;
    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct AppointmentRequestedV1 {
        pub appointment_id: String,
        pub customer_id: String,
        pub service_type: ServiceType,
        pub date: NaiveDate,
        pub slot_id: Option<String>,
        pub modification_item_ids: Vec<String>,
        pub vehicle_id: Option<String>,
        pub instructions: Option<String>,
        pub estimated_cost: i64,
        pub estimated_hours: i64,
        pub requested_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct AssignmentRef {
        pub employee_id: String,
        pub task_id: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct EmployeesAssignedV1 {
        pub appointment_id: String,
        pub added: Vec<AssignmentRef>,
        pub removed: Vec<AssignmentRef>,
        pub slot_id: Option<String>,
        pub assigned_at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct AssignmentProgressedV1 {
        pub appointment_id: String,
        pub task_id: String,
        pub task_status: TaskStatus,
        pub at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct AppointmentStatusChangedV1 {
        pub appointment_id: String,
        pub from: AppointmentStatus,
        pub to: AppointmentStatus,
        pub at: i64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    pub struct AppointmentCancelledV1 {
        pub appointment_id: String,
        pub reason: Option<String>,
        pub cancelled_at: i64,
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum AppointmentEvent {
    AppointmentRequestedV1(v1::AppointmentRequestedV1),
    EmployeesAssignedV1(v1::EmployeesAssignedV1),
    AssignmentProgressedV1(v1::AssignmentProgressedV1),
    AppointmentStatusChangedV1(v1::AppointmentStatusChangedV1),
    AppointmentCancelledV1(v1::AppointmentCancelledV1),
}

pub fn appointment_stream_id(appointment_id: &str) -> String {
    format!("Appointment-{appointment_id}")
}
