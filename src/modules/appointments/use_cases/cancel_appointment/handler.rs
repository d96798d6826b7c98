// Appointment cancellation.
//
// The cancellation is recorded first, then its consequences are applied: the slot goes back
// to the ledger when this appointment still holds it, and every voided assignment gets a
// voided task with its timer stopped. Cancelling again re-applies the consequences, so a
// caller that saw Unavailable halfway can simply retry.

use crate::modules::appointments::adapters::outbound::appointment_stream::AppointmentStream;
use crate::modules::appointments::adapters::outbound::assignment_tasks::AssignmentTasks;
use crate::modules::appointments::core::decide::decide_cancel;
use crate::modules::appointments::core::events::{AppointmentEvent, appointment_stream_id};
use crate::modules::appointments::core::state::Appointment;
use crate::modules::slots::core::events::SlotEvent;
use crate::modules::slots::core::slot_id::SlotId;
use crate::modules::slots::use_cases::slot_ledger::handler::SlotLedger;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{Clock, Decision};
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::intent_outbox::dispatch::dispatch_notifications;
use crate::shared::infrastructure::keyed_lock::KeyedLocks;
use std::sync::Arc;

const CANCELLED: &str = "Appointment cancelled";

pub struct CancelAppointmentHandler<TEventStore, TSlotStore, TOutbox>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
    TSlotStore: EventStore<SlotEvent> + 'static,
    TOutbox: DomainOutbox + 'static,
{
    topic: String,
    stream: Arc<AppointmentStream<TEventStore>>,
    ledger: Arc<SlotLedger<TSlotStore>>,
    tasks: Arc<dyn AssignmentTasks>,
    outbox: Arc<TOutbox>,
    locks: Arc<KeyedLocks>,
    clock: Arc<dyn Clock>,
}

impl<TEventStore, TSlotStore, TOutbox> CancelAppointmentHandler<TEventStore, TSlotStore, TOutbox>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
    TSlotStore: EventStore<SlotEvent> + 'static,
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(
        topic: impl Into<String>,
        stream: Arc<AppointmentStream<TEventStore>>,
        ledger: Arc<SlotLedger<TSlotStore>>,
        tasks: Arc<dyn AssignmentTasks>,
        outbox: Arc<TOutbox>,
        locks: Arc<KeyedLocks>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            topic: topic.into(),
            stream,
            ledger,
            tasks,
            outbox,
            locks,
            clock,
        }
    }

    pub async fn handle(
        &self,
        appointment_id: &str,
        reason: Option<String>,
    ) -> Result<Appointment, ApplicationError> {
        let stream_id = appointment_stream_id(appointment_id);
        let _guard = self.locks.acquire(&stream_id).await?;
        let (state, version) = self.stream.load(appointment_id).await?;
        let now = self.clock.now().timestamp_millis();
        let (events, intents) = match decide_cancel(&state, appointment_id, reason, now) {
            Decision::Accepted { events, intents } => (events, intents),
            Decision::Rejected { reason } => {
                tracing::info!(appointment_id, %reason, "cancellation refused");
                return Err(reason.into());
            }
        };

        let appended = events.len() as i64;
        let state = self
            .stream
            .commit(appointment_id, state, version, events)
            .await?;
        let appointment = state
            .appointment()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("appointment", appointment_id))?;
        if appended > 0 {
            tracing::info!(appointment_id, "appointment cancelled");
            dispatch_notifications(
                &*self.outbox,
                &self.topic,
                &stream_id,
                version + appended,
                intents,
            )
            .await;
        }

        self.release_slot(&appointment).await?;
        for assignment in appointment.assignments.iter().filter(|a| a.voided) {
            self.tasks.void(&assignment.task_id, CANCELLED).await?;
        }
        Ok(appointment)
    }

    /// Only a slot still held by this appointment is released; a Pending appointment never
    /// claimed one.
    async fn release_slot(&self, appointment: &Appointment) -> Result<(), ApplicationError> {
        let Some(raw) = appointment.slot_id.as_deref() else {
            return Ok(());
        };
        let slot_id = SlotId::parse_for(raw, appointment.date)?;
        let slot = self.ledger.state_of(slot_id).await?;
        if slot.holder() == Some(appointment.id.as_str()) {
            self.ledger.release(slot_id, &appointment.id).await?;
        }
        Ok(())
    }
}
