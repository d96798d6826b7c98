// Mirrors task status changes onto the owning appointment and advances its status.

use crate::modules::appointments::adapters::outbound::appointment_stream::AppointmentStream;
use crate::modules::appointments::core::decide::decide_progress;
use crate::modules::appointments::core::events::{AppointmentEvent, appointment_stream_id};
use crate::modules::tasks::adapters::outbound::appointment_progress::AppointmentProgress;
use crate::modules::tasks::core::status::TaskStatus;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{Clock, Decision};
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::intent_outbox::dispatch::dispatch_notifications;
use crate::shared::infrastructure::keyed_lock::KeyedLocks;
use async_trait::async_trait;
use std::sync::Arc;

pub struct RecordTaskProgressHandler<TEventStore, TOutbox>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
    TOutbox: DomainOutbox + 'static,
{
    topic: String,
    stream: Arc<AppointmentStream<TEventStore>>,
    outbox: Arc<TOutbox>,
    locks: Arc<KeyedLocks>,
    clock: Arc<dyn Clock>,
}

impl<TEventStore, TOutbox> RecordTaskProgressHandler<TEventStore, TOutbox>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
    TOutbox: DomainOutbox + 'static,
{
    pub fn new(
        topic: impl Into<String>,
        stream: Arc<AppointmentStream<TEventStore>>,
        outbox: Arc<TOutbox>,
        locks: Arc<KeyedLocks>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            topic: topic.into(),
            stream,
            outbox,
            locks,
            clock,
        }
    }
}

#[async_trait]
impl<TEventStore, TOutbox> AppointmentProgress for RecordTaskProgressHandler<TEventStore, TOutbox>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
    TOutbox: DomainOutbox + 'static,
{
    async fn task_progressed(
        &self,
        appointment_id: &str,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<bool, ApplicationError> {
        let stream_id = appointment_stream_id(appointment_id);
        let _guard = self.locks.acquire(&stream_id).await?;
        let (state, version) = self.stream.load(appointment_id).await?;
        let before = state.appointment().map(|a| a.status);
        let now = self.clock.now().timestamp_millis();
        let (events, intents) = match decide_progress(&state, appointment_id, task_id, status, now) {
            Decision::Accepted { events, intents } => (events, intents),
            Decision::Rejected { reason } => return Err(reason.into()),
        };
        if events.is_empty() {
            return Ok(false);
        }

        let appended = events.len() as i64;
        let state = self
            .stream
            .commit(appointment_id, state, version, events)
            .await?;
        if let Some(appointment) = state.appointment() {
            if before != Some(appointment.status) {
                tracing::info!(
                    appointment_id,
                    task_id,
                    status = %appointment.status,
                    "appointment status advanced"
                );
            }
        }
        dispatch_notifications(
            &*self.outbox,
            &self.topic,
            &stream_id,
            version + appended,
            intents,
        )
        .await;
        Ok(true)
    }
}
