// The full in-memory service as the HTTP and GraphQL adapters see it, pinned to
// Friday 2026-10-16 09:00 UTC.

use crate::modules::appointments::adapters::outbound::catalog_in_memory::InMemoryModificationCatalog;
use crate::modules::appointments::adapters::outbound::employee_directory_in_memory::InMemoryEmployeeDirectory;
use crate::modules::appointments::core::estimates::ModificationItem;
use crate::modules::appointments::core::state::Appointment;
use crate::shared::core::primitives::FixedClock;
use crate::shell::config::Config;
use crate::shell::state::{
    AppState, AppointmentStore, InMemoryAdapters, Outbox, SlotStore, TaskStore, TimerStore,
};
use crate::tests::fixtures::commands::book_appointment::BookAppointmentBuilder;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

pub struct TestState {
    pub state: AppState,
    pub clock: Arc<FixedClock>,
    pub outbox: Arc<Outbox>,
    pub appointment_store: Arc<AppointmentStore>,
    pub slot_store: Arc<SlotStore>,
    pub task_store: Arc<TaskStore>,
    pub timer_store: Arc<TimerStore>,
    pub directory: Arc<InMemoryEmployeeDirectory>,
}

pub fn catalog() -> InMemoryModificationCatalog {
    InMemoryModificationCatalog::with_items([
        ModificationItem {
            id: "m-1".into(),
            name: "Roof rack".into(),
            estimated_hours: 2.0,
            unit_price: 15000,
        },
        ModificationItem {
            id: "m-2".into(),
            name: "Tow bar".into(),
            estimated_hours: 3.0,
            unit_price: 8000,
        },
    ])
}

pub fn make_test_state() -> TestState {
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
    ));
    let adapters = InMemoryAdapters::new(
        catalog(),
        InMemoryEmployeeDirectory::with_employees(["E7", "E8", "E9"]),
    );
    let state = AppState::in_memory(&Config::default(), clock.clone(), &adapters);
    TestState {
        state,
        clock,
        outbox: adapters.outbox,
        appointment_store: adapters.appointment_store,
        slot_store: adapters.slot_store,
        task_store: adapters.task_store,
        timer_store: adapters.timer_store,
        directory: adapters.directory,
    }
}

/// Books a Service appointment for customer c-1 on 2026-10-20.
pub async fn book_service(state: &AppState, slot_id: &str) -> Appointment {
    state
        .book_appointment
        .handle(BookAppointmentBuilder::new().slot_id(slot_id).build())
        .await
        .unwrap()
}
