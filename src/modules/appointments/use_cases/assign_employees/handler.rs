// Admin assignment of employees to an appointment.
//
// Responsibilities
// - Serialize per appointment so an assignment never races a cancellation.
// - Claim the slot before recording the assignment. A lost slot leaves the appointment
//   exactly as it was; a failed append gives back a slot claimed by this call.
// - Reconcile tasks with the assignments: every active assignment has an open task, every
//   voided one a voided task. Safe to re-run after a partial failure.

use crate::modules::appointments::adapters::outbound::appointment_stream::AppointmentStream;
use crate::modules::appointments::adapters::outbound::assignment_tasks::AssignmentTasks;
use crate::modules::appointments::adapters::outbound::employee_directory::EmployeeDirectory;
use crate::modules::appointments::core::decide::{AssignEmployees, decide_assign};
use crate::modules::appointments::core::events::{AppointmentEvent, appointment_stream_id};
use crate::modules::appointments::core::state::Appointment;
use crate::modules::slots::core::events::SlotEvent;
use crate::modules::slots::use_cases::slot_ledger::handler::{Reservation, SlotLedger};
use crate::modules::tasks::core::decide::OpenTask;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{Clock, Decision};
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::intent_outbox::dispatch::dispatch_notifications;
use crate::shared::infrastructure::keyed_lock::KeyedLocks;
use std::sync::Arc;
use uuid::Uuid;

const REASSIGNED: &str = "Employee unassigned";

pub struct AssignEmployeesHandler<TEventStore, TSlotStore, TOutbox>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
    TSlotStore: EventStore<SlotEvent> + 'static,
    TOutbox: DomainOutbox + 'static,
{
    topic: String,
    stream: Arc<AppointmentStream<TEventStore>>,
    ledger: Arc<SlotLedger<TSlotStore>>,
    directory: Arc<dyn EmployeeDirectory>,
    tasks: Arc<dyn AssignmentTasks>,
    outbox: Arc<TOutbox>,
    locks: Arc<KeyedLocks>,
    clock: Arc<dyn Clock>,
}

impl<TEventStore, TSlotStore, TOutbox> AssignEmployeesHandler<TEventStore, TSlotStore, TOutbox>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
    TSlotStore: EventStore<SlotEvent> + 'static,
    TOutbox: DomainOutbox + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        topic: impl Into<String>,
        stream: Arc<AppointmentStream<TEventStore>>,
        ledger: Arc<SlotLedger<TSlotStore>>,
        directory: Arc<dyn EmployeeDirectory>,
        tasks: Arc<dyn AssignmentTasks>,
        outbox: Arc<TOutbox>,
        locks: Arc<KeyedLocks>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            topic: topic.into(),
            stream,
            ledger,
            directory,
            tasks,
            outbox,
            locks,
            clock,
        }
    }

    pub async fn handle(
        &self,
        appointment_id: &str,
        employee_ids: Vec<String>,
    ) -> Result<Appointment, ApplicationError> {
        let stream_id = appointment_stream_id(appointment_id);
        let _guard = self.locks.acquire(&stream_id).await?;
        let (state, version) = self.stream.load(appointment_id).await?;
        let Some(current) = state.appointment().cloned() else {
            return Err(ApplicationError::not_found("appointment", appointment_id));
        };

        for employee_id in &employee_ids {
            let employee_id = employee_id.trim();
            if !employee_id.is_empty() && !self.directory.exists(employee_id).await? {
                return Err(ApplicationError::not_found("employee", employee_id));
            }
        }

        let command = AssignEmployees {
            appointment_id: appointment_id.to_string(),
            candidate_task_ids: employee_ids
                .iter()
                .map(|_| Uuid::now_v7().to_string())
                .collect(),
            employee_ids,
        };
        let now = self.clock.now().timestamp_millis();
        let (events, intents) = match decide_assign(&state, command, now) {
            Decision::Accepted { events, intents } => (events, intents),
            Decision::Rejected { reason } => {
                tracing::info!(appointment_id, %reason, "assignment refused");
                return Err(reason.into());
            }
        };

        let reservation = match current.slot_id.as_deref() {
            Some(slot_id) => Some(
                self.ledger
                    .reserve_slot(current.date, slot_id, appointment_id)
                    .await?,
            ),
            None => None,
        };

        let appended = events.len() as i64;
        let state = match self.stream.commit(appointment_id, state, version, events).await {
            Ok(state) => state,
            Err(error) => {
                self.give_back(reservation, appointment_id).await;
                return Err(error);
            }
        };
        let appointment = state
            .appointment()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("appointment", appointment_id))?;
        if appended > 0 {
            tracing::info!(
                appointment_id,
                status = %appointment.status,
                employees = ?appointment.assigned_employee_ids(),
                "employees assigned"
            );
        }
        dispatch_notifications(
            &*self.outbox,
            &self.topic,
            &stream_id,
            version + appended,
            intents,
        )
        .await;

        self.reconcile(&appointment).await?;
        Ok(appointment)
    }

    async fn reconcile(&self, appointment: &Appointment) -> Result<(), ApplicationError> {
        for assignment in &appointment.assignments {
            if assignment.voided {
                self.tasks.void(&assignment.task_id, REASSIGNED).await?;
            } else if assignment.is_active() {
                self.tasks
                    .open(OpenTask {
                        task_id: assignment.task_id.clone(),
                        appointment_id: appointment.id.clone(),
                        employee_id: assignment.employee_id.clone(),
                        customer_id: appointment.customer_id.clone(),
                        service_type: appointment.service_type,
                        estimated_hours: appointment.estimated_hours,
                        due_date: appointment.date,
                    })
                    .await?;
            }
        }
        Ok(())
    }

    async fn give_back(&self, reservation: Option<Reservation>, appointment_id: &str) {
        let Some(reservation) = reservation.filter(|r| r.newly_reserved) else {
            return;
        };
        match self.ledger.release(reservation.slot_id, appointment_id).await {
            Ok(()) => tracing::warn!(
                appointment_id,
                slot_id = %reservation.slot_id,
                "slot released after a failed assignment"
            ),
            Err(error) => tracing::warn!(
                %error,
                appointment_id,
                slot_id = %reservation.slot_id,
                "slot claimed by a failed assignment is still held"
            ),
        }
    }
}
