use crate::modules::appointments::core::events::v1::AppointmentRequestedV1;
use crate::shared::core::primitives::ServiceType;
use chrono::NaiveDate;

pub fn make_appointment_requested_v1_event() -> AppointmentRequestedV1 {
    AppointmentRequestedV1 {
        appointment_id: "a-1".into(),
        customer_id: "c-1".into(),
        service_type: ServiceType::Service,
        date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
        slot_id: Some("2026-10-20#2".into()),
        modification_item_ids: Vec::new(),
        vehicle_id: Some("v-1".into()),
        instructions: None,
        estimated_cost: 5000,
        estimated_hours: 3,
        requested_at: 1_000,
    }
}
