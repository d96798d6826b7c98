// Wires the in-memory adapters into the use case handlers.

use crate::modules::appointments::adapters::outbound::appointment_stream::AppointmentStream;
use crate::modules::appointments::adapters::outbound::assignment_tasks::AssignmentTasks;
use crate::modules::appointments::adapters::outbound::catalog_in_memory::InMemoryModificationCatalog;
use crate::modules::appointments::adapters::outbound::employee_directory_in_memory::InMemoryEmployeeDirectory;
use crate::modules::appointments::adapters::outbound::projections_in_memory::InMemoryAppointmentProjections;
use crate::modules::appointments::core::events::AppointmentEvent;
use crate::modules::appointments::use_cases::assign_employees::handler::AssignEmployeesHandler;
use crate::modules::appointments::use_cases::book_appointment::handler::BookAppointmentHandler;
use crate::modules::appointments::use_cases::cancel_appointment::handler::CancelAppointmentHandler;
use crate::modules::appointments::use_cases::query_appointments::handler::QueryAppointmentsHandler;
use crate::modules::appointments::use_cases::record_task_progress::handler::RecordTaskProgressHandler;
use crate::modules::calendar::adapters::outbound::unavailable_dates_in_memory::InMemoryUnavailableDates;
use crate::modules::calendar::use_cases::check_date::handler::CalendarPolicy;
use crate::modules::calendar::use_cases::manage_unavailable_dates::handler::ManageUnavailableDatesHandler;
use crate::modules::slots::core::events::SlotEvent;
use crate::modules::slots::use_cases::available_slots::handler::AvailabilityResolver;
use crate::modules::slots::use_cases::slot_ledger::handler::SlotLedger;
use crate::modules::tasks::adapters::outbound::appointment_progress::AppointmentProgress;
use crate::modules::tasks::adapters::outbound::projections_in_memory::InMemoryTaskProjections;
use crate::modules::tasks::core::events::TaskEvent;
use crate::modules::tasks::use_cases::drive_task::handler::TaskLifecycle;
use crate::modules::tasks::use_cases::open_tasks::handler::TaskAssignments;
use crate::modules::time_tracking::core::events::TimerEvent;
use crate::modules::time_tracking::use_cases::track_time::handler::TimeTrackingEngine;
use crate::shared::core::primitives::Clock;
use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
use crate::shared::infrastructure::intent_outbox::in_memory::InMemoryDomainOutbox;
use crate::shared::infrastructure::keyed_lock::KeyedLocks;
use crate::shell::config::Config;
use std::sync::Arc;

pub type AppointmentStore = InMemoryEventStore<AppointmentEvent>;
pub type SlotStore = InMemoryEventStore<SlotEvent>;
pub type TaskStore = InMemoryEventStore<TaskEvent>;
pub type TimerStore = InMemoryEventStore<TimerEvent>;
pub type Outbox = InMemoryDomainOutbox;
pub type UnavailableDates = InMemoryUnavailableDates;

/// Every in-memory backend the service runs on. Kept apart from `AppState` so tests can reach
/// the stores directly to seed data or simulate outages.
pub struct InMemoryAdapters {
    pub appointment_store: Arc<AppointmentStore>,
    pub slot_store: Arc<SlotStore>,
    pub task_store: Arc<TaskStore>,
    pub timer_store: Arc<TimerStore>,
    pub outbox: Arc<Outbox>,
    pub unavailable_dates: Arc<UnavailableDates>,
    pub appointment_projections: Arc<InMemoryAppointmentProjections>,
    pub task_projections: Arc<InMemoryTaskProjections>,
    pub catalog: Arc<InMemoryModificationCatalog>,
    pub directory: Arc<InMemoryEmployeeDirectory>,
}

impl InMemoryAdapters {
    pub fn new(catalog: InMemoryModificationCatalog, directory: InMemoryEmployeeDirectory) -> Self {
        Self {
            appointment_store: Arc::new(AppointmentStore::new()),
            slot_store: Arc::new(SlotStore::new()),
            task_store: Arc::new(TaskStore::new()),
            timer_store: Arc::new(TimerStore::new()),
            outbox: Arc::new(Outbox::new()),
            unavailable_dates: Arc::new(UnavailableDates::new()),
            appointment_projections: Arc::new(InMemoryAppointmentProjections::new()),
            task_projections: Arc::new(InMemoryTaskProjections::new()),
            catalog: Arc::new(catalog),
            directory: Arc::new(directory),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub calendar: Arc<CalendarPolicy<UnavailableDates>>,
    pub unavailable_dates: Arc<ManageUnavailableDatesHandler<UnavailableDates>>,
    pub slot_ledger: Arc<SlotLedger<SlotStore>>,
    pub availability: Arc<AvailabilityResolver<UnavailableDates, SlotStore>>,
    pub book_appointment: Arc<BookAppointmentHandler<AppointmentStore, UnavailableDates, SlotStore>>,
    pub assign_employees: Arc<AssignEmployeesHandler<AppointmentStore, SlotStore, Outbox>>,
    pub cancel_appointment: Arc<CancelAppointmentHandler<AppointmentStore, SlotStore, Outbox>>,
    pub appointment_queries: Arc<QueryAppointmentsHandler<AppointmentStore>>,
    pub task_lifecycle: Arc<TaskLifecycle<TaskStore, TimerStore, Outbox>>,
    pub time_tracking: Arc<TimeTrackingEngine<TimerStore>>,
}

impl AppState {
    pub fn in_memory(config: &Config, clock: Arc<dyn Clock>, adapters: &InMemoryAdapters) -> Self {
        let locks = Arc::new(KeyedLocks::new(config.lock_wait));
        let topic = config.notification_topic.clone();

        let calendar = Arc::new(CalendarPolicy::new(
            adapters.unavailable_dates.clone(),
            clock.clone(),
        ));
        let unavailable_dates = Arc::new(ManageUnavailableDatesHandler::new(
            adapters.unavailable_dates.clone(),
            clock.clone(),
        ));
        let slot_ledger = Arc::new(SlotLedger::new(adapters.slot_store.clone(), clock.clone()));
        let availability = Arc::new(AvailabilityResolver::new(
            calendar.clone(),
            slot_ledger.clone(),
        ));

        let time_tracking = Arc::new(TimeTrackingEngine::new(
            adapters.timer_store.clone(),
            locks.clone(),
            clock.clone(),
        ));
        let assignment_tasks: Arc<dyn AssignmentTasks> = Arc::new(TaskAssignments::new(
            adapters.task_store.clone(),
            adapters.task_projections.clone(),
            time_tracking.clone(),
            clock.clone(),
        ));

        let stream = Arc::new(AppointmentStream::new(
            adapters.appointment_store.clone(),
            adapters.appointment_projections.clone(),
        ));
        let progress: Arc<dyn AppointmentProgress> = Arc::new(RecordTaskProgressHandler::new(
            topic.clone(),
            stream.clone(),
            adapters.outbox.clone(),
            locks.clone(),
            clock.clone(),
        ));
        let book_appointment = Arc::new(BookAppointmentHandler::new(
            stream.clone(),
            availability.clone(),
            adapters.catalog.clone(),
            config.service_price,
            clock.clone(),
        ));
        let assign_employees = Arc::new(AssignEmployeesHandler::new(
            topic.clone(),
            stream.clone(),
            slot_ledger.clone(),
            adapters.directory.clone(),
            assignment_tasks.clone(),
            adapters.outbox.clone(),
            locks.clone(),
            clock.clone(),
        ));
        let cancel_appointment = Arc::new(CancelAppointmentHandler::new(
            topic.clone(),
            stream.clone(),
            slot_ledger.clone(),
            assignment_tasks,
            adapters.outbox.clone(),
            locks.clone(),
            clock.clone(),
        ));
        let appointment_queries = Arc::new(QueryAppointmentsHandler::new(
            stream,
            adapters.appointment_projections.clone(),
        ));

        let task_lifecycle = Arc::new(TaskLifecycle::new(
            topic,
            adapters.task_store.clone(),
            adapters.outbox.clone(),
            time_tracking.clone(),
            adapters.task_projections.clone(),
            adapters.task_projections.clone(),
            progress,
            locks,
            clock,
        ));

        Self {
            calendar,
            unavailable_dates,
            slot_ledger,
            availability,
            book_appointment,
            assign_employees,
            cancel_appointment,
            appointment_queries,
            task_lifecycle,
            time_tracking,
        }
    }
}
