use crate::modules::tasks::core::events::v1::TaskAssignedV1;
use crate::shared::core::primitives::ServiceType;
use chrono::NaiveDate;

/// Task t-1 of appointment a-1, assigned to E7.
pub fn make_task_assigned_v1_event() -> TaskAssignedV1 {
    TaskAssignedV1 {
        task_id: "t-1".into(),
        appointment_id: "a-1".into(),
        employee_id: "E7".into(),
        customer_id: "c-1".into(),
        service_type: ServiceType::Service,
        estimated_hours: 3,
        due_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        assigned_at: 2_000,
    }
}
