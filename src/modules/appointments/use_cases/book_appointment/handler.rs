// Customer booking request.
//
// Responsibilities
// - Check the date against the calendar and, for a Service, that the chosen slot is free
//   right now. Nothing is reserved here; the slot is claimed when employees are assigned.
// - Resolve modification items from the catalog and compute the estimate.
// - Start a new appointment stream in Pending.

use crate::modules::appointments::adapters::outbound::appointment_stream::AppointmentStream;
use crate::modules::appointments::adapters::outbound::catalog::ModificationCatalog;
use crate::modules::appointments::core::decide::{RequestAppointment, decide_request};
use crate::modules::appointments::core::estimates::{
    Estimate, ModificationItem, modification_estimate, service_estimate,
};
use crate::modules::appointments::core::events::AppointmentEvent;
use crate::modules::appointments::core::state::{Appointment, AppointmentState};
use crate::modules::calendar::adapters::outbound::unavailable_dates::UnavailableDateRepository;
use crate::modules::slots::core::events::SlotEvent;
use crate::modules::slots::core::slot_id::SlotId;
use crate::modules::slots::use_cases::available_slots::handler::AvailabilityResolver;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{Clock, Decision, ServiceType};
use crate::shared::infrastructure::event_store::EventStore;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookAppointment {
    pub customer_id: String,
    pub service_type: ServiceType,
    pub date: NaiveDate,
    pub slot_id: Option<String>,
    #[serde(default)]
    pub modification_item_ids: Vec<String>,
    pub vehicle_id: Option<String>,
    pub instructions: Option<String>,
}

pub struct BookAppointmentHandler<TEventStore, TRepository, TSlotStore>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
    TRepository: UnavailableDateRepository + 'static,
    TSlotStore: EventStore<SlotEvent> + 'static,
{
    stream: Arc<AppointmentStream<TEventStore>>,
    availability: Arc<AvailabilityResolver<TRepository, TSlotStore>>,
    catalog: Arc<dyn ModificationCatalog>,
    service_price: i64,
    clock: Arc<dyn Clock>,
}

impl<TEventStore, TRepository, TSlotStore> BookAppointmentHandler<TEventStore, TRepository, TSlotStore>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
    TRepository: UnavailableDateRepository + 'static,
    TSlotStore: EventStore<SlotEvent> + 'static,
{
    pub fn new(
        stream: Arc<AppointmentStream<TEventStore>>,
        availability: Arc<AvailabilityResolver<TRepository, TSlotStore>>,
        catalog: Arc<dyn ModificationCatalog>,
        service_price: i64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            stream,
            availability,
            catalog,
            service_price,
            clock,
        }
    }

    pub async fn handle(&self, command: BookAppointment) -> Result<Appointment, ApplicationError> {
        let (slot_id, modification_item_ids, estimate) = match command.service_type {
            ServiceType::Service => {
                let slot_id = self.free_slot(&command).await?;
                (Some(slot_id), command.modification_item_ids.clone(), service_estimate(self.service_price))
            }
            ServiceType::Modification => {
                let (ids, estimate) = self.modification_items(&command).await?;
                (command.slot_id.clone(), ids, estimate)
            }
        };

        let appointment_id = Uuid::now_v7().to_string();
        let request = RequestAppointment {
            appointment_id: appointment_id.clone(),
            customer_id: command.customer_id,
            service_type: command.service_type,
            date: command.date,
            slot_id,
            modification_item_ids,
            vehicle_id: command.vehicle_id,
            instructions: command.instructions,
            estimated_cost: estimate.cost,
            estimated_hours: estimate.hours,
        };
        let now = self.clock.now().timestamp_millis();
        let events = match decide_request(&AppointmentState::None, request, now) {
            Decision::Accepted { events, .. } => events,
            Decision::Rejected { reason } => return Err(reason.into()),
        };
        let state = self
            .stream
            .commit(&appointment_id, AppointmentState::None, 0, events)
            .await?;
        let appointment = state
            .appointment()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("appointment", &appointment_id))?;
        tracing::info!(
            appointment_id = %appointment.id,
            customer_id = %appointment.customer_id,
            service_type = %appointment.service_type,
            date = %appointment.date,
            "appointment requested"
        );
        Ok(appointment)
    }

    /// Canonical id of the requested slot, provided the date is open and the slot free.
    async fn free_slot(&self, command: &BookAppointment) -> Result<String, ApplicationError> {
        let raw = command.slot_id.as_deref().ok_or_else(|| {
            ApplicationError::Validation("a slot is required for a Service appointment".into())
        })?;
        let slot_id = SlotId::parse_for(raw, command.date)?.to_string();
        let availability = self.availability.available_slots(command.date).await?;
        if !availability.is_open {
            return Err(ApplicationError::Validation(closed_message(
                command.date,
                availability.reason,
            )));
        }
        if !availability.slots.iter().any(|slot| slot.slot_id == slot_id) {
            return Err(ApplicationError::Validation(format!(
                "slot {slot_id} is already booked, please choose another slot"
            )));
        }
        Ok(slot_id)
    }

    async fn modification_items(
        &self,
        command: &BookAppointment,
    ) -> Result<(Vec<String>, Estimate), ApplicationError> {
        let availability = self
            .availability
            .modification_availability(command.date)
            .await?;
        if !availability.is_open {
            return Err(ApplicationError::Validation(closed_message(
                command.date,
                availability.reason,
            )));
        }
        let mut items: Vec<ModificationItem> = Vec::new();
        for id in &command.modification_item_ids {
            if items.iter().any(|item| item.id == *id) {
                continue;
            }
            let item = self.catalog.find(id).await?.ok_or_else(|| {
                ApplicationError::Validation(format!("unknown modification item {id}"))
            })?;
            items.push(item);
        }
        let estimate = modification_estimate(&items);
        Ok((items.into_iter().map(|item| item.id).collect(), estimate))
    }
}

fn closed_message(date: NaiveDate, reason: Option<String>) -> String {
    match reason {
        Some(reason) => format!("{date} is not bookable: {reason}"),
        None => format!("{date} is not bookable"),
    }
}

#[cfg(test)]
mod book_appointment_handler_tests {
    use super::*;
    use crate::modules::appointments::core::state::AppointmentStatus;
    use crate::tests::fixtures::app_state::{TestState, make_test_state};
    use rstest::rstest;

    fn service(date: &str, slot_id: Option<&str>) -> BookAppointment {
        BookAppointment {
            customer_id: "c-1".into(),
            service_type: ServiceType::Service,
            date: date.parse().unwrap(),
            slot_id: slot_id.map(str::to_string),
            modification_item_ids: Vec::new(),
            vehicle_id: Some("v-1".into()),
            instructions: None,
        }
    }

    fn modification(items: &[&str]) -> BookAppointment {
        BookAppointment {
            customer_id: "c-1".into(),
            service_type: ServiceType::Modification,
            date: "2026-10-21".parse().unwrap(),
            slot_id: None,
            modification_item_ids: items.iter().map(|i| i.to_string()).collect(),
            vehicle_id: None,
            instructions: Some("matte wrap".into()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_book_a_service_as_pending_without_holding_the_slot() {
        let TestState { state, .. } = make_test_state();
        let appointment = state
            .book_appointment
            .handle(service("2026-10-20", Some("2026-10-20#2")))
            .await
            .unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Pending);
        assert_eq!(appointment.estimated_cost, 5000);
        assert_eq!(appointment.estimated_hours, 3);

        let availability = state
            .availability
            .available_slots("2026-10-20".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(availability.slots_remaining, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_estimate_a_modification_from_the_catalog() {
        let TestState { state, .. } = make_test_state();
        let appointment = state
            .book_appointment
            .handle(modification(&["m-1", "m-2", "m-1"]))
            .await
            .unwrap();
        assert_eq!(appointment.modification_item_ids, vec!["m-1", "m-2"]);
        assert_eq!(appointment.estimated_cost, 23000);
        assert_eq!(appointment.estimated_hours, 6);
    }

    #[rstest]
    #[case(service("2026-10-20", None), "VALIDATION_ERROR")]
    #[case(service("2026-10-20", Some("2026-10-21#2")), "INVALID_SLOT")]
    #[case(service("2026-10-20", Some("2026-10-20#4")), "INVALID_SLOT")]
    #[case(service("2026-10-25", Some("2026-10-25#1")), "VALIDATION_ERROR")]
    #[case(service("2026-10-15", Some("2026-10-15#1")), "VALIDATION_ERROR")]
    #[case(modification(&["m-404"]), "VALIDATION_ERROR")]
    #[tokio::test]
    async fn it_should_refuse_invalid_bookings(
        #[case] command: BookAppointment,
        #[case] code: &str,
    ) {
        let TestState { state, .. } = make_test_state();
        let error = state.book_appointment.handle(command).await.unwrap_err();
        assert_eq!(error.code(), code);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_a_slot_that_is_already_taken() {
        let TestState { state, .. } = make_test_state();
        state
            .slot_ledger
            .reserve_slot("2026-10-20".parse().unwrap(), "2026-10-20#2", "a-other")
            .await
            .unwrap();
        let error = state
            .book_appointment
            .handle(service("2026-10-20", Some("2026-10-20#2")))
            .await
            .unwrap_err();
        assert!(error.to_string().contains("please choose another slot"));
    }
}
