use crate::modules::appointments::core::state::{Appointment, AppointmentStatus, Assignment};
use crate::modules::tasks::core::status::TaskStatus;
use crate::shared::core::primitives::ServiceType;
use chrono::NaiveDate;

/// Appointment a-1 for customer c-1, approved with E7 holding task t-1.
pub fn approved_appointment() -> Appointment {
    Appointment {
        id: "a-1".into(),
        customer_id: "c-1".into(),
        service_type: ServiceType::Service,
        date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        slot_id: Some("2026-10-20#2".into()),
        modification_item_ids: Vec::new(),
        vehicle_id: Some("v-1".into()),
        instructions: None,
        status: AppointmentStatus::Approved,
        assignments: vec![Assignment {
            employee_id: "E7".into(),
            task_id: "t-1".into(),
            task_status: TaskStatus::Assigned,
            voided: false,
        }],
        estimated_cost: 5000,
        estimated_hours: 3,
        created_at: 1_000,
        updated_at: 5_000,
    }
}
