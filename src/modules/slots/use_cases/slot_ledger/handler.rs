// Slot ledger: the only writer of slot streams.
//
// Responsibilities
// - Load the slot stream, fold it, decide, append with the loaded version.
// - Turn a lost compare-and-set into SlotConflict so exactly one racing
//   reservation for the same (date, slot) wins.

use crate::modules::slots::core::decide::{SlotDecision, decide_release, decide_reserve};
use crate::modules::slots::core::events::SlotEvent;
use crate::modules::slots::core::evolve::evolve;
use crate::modules::slots::core::slot_id::SlotId;
use crate::modules::slots::core::state::SlotState;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{Clock, Decision};
use crate::shared::infrastructure::event_store::{EventStore, EventStoreError};
use chrono::NaiveDate;
use std::sync::Arc;

const RELEASE_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub slot_id: SlotId,
    /// False when the appointment already held the slot.
    pub newly_reserved: bool,
}

pub struct SlotLedger<TEventStore>
where
    TEventStore: EventStore<SlotEvent> + 'static,
{
    event_store: Arc<TEventStore>,
    clock: Arc<dyn Clock>,
}

impl<TEventStore> SlotLedger<TEventStore>
where
    TEventStore: EventStore<SlotEvent> + 'static,
{
    pub fn new(event_store: Arc<TEventStore>, clock: Arc<dyn Clock>) -> Self {
        Self { event_store, clock }
    }

    pub async fn state_of(&self, slot_id: SlotId) -> Result<SlotState, ApplicationError> {
        Ok(self.load(slot_id).await?.0)
    }

    pub async fn reserve_slot(
        &self,
        date: NaiveDate,
        slot_id: &str,
        appointment_id: &str,
    ) -> Result<Reservation, ApplicationError> {
        let slot_id = SlotId::parse_for(slot_id, date)?;
        self.reserve(slot_id, appointment_id).await
    }

    pub async fn reserve(
        &self,
        slot_id: SlotId,
        appointment_id: &str,
    ) -> Result<Reservation, ApplicationError> {
        let (state, version) = self.load(slot_id).await?;
        let now = self.clock.now().timestamp_millis();
        let events = accepted(decide_reserve(&state, slot_id, appointment_id, now), slot_id)?;
        if events.is_empty() {
            return Ok(Reservation {
                slot_id,
                newly_reserved: false,
            });
        }
        match self
            .event_store
            .append(&slot_id.stream_id(), version, &events)
            .await
        {
            Ok(()) => {
                tracing::info!(%slot_id, appointment_id, "slot reserved");
                Ok(Reservation {
                    slot_id,
                    newly_reserved: true,
                })
            }
            Err(EventStoreError::VersionMismatch { .. }) => {
                tracing::info!(%slot_id, appointment_id, "slot reservation lost the race");
                Err(ApplicationError::SlotConflict {
                    slot_id: slot_id.to_string(),
                })
            }
            Err(error) => Err(error.into()),
        }
    }

    pub async fn release_slot(
        &self,
        date: NaiveDate,
        slot_id: &str,
        appointment_id: &str,
    ) -> Result<(), ApplicationError> {
        let slot_id = SlotId::parse_for(slot_id, date)?;
        self.release(slot_id, appointment_id).await
    }

    pub async fn release(&self, slot_id: SlotId, appointment_id: &str) -> Result<(), ApplicationError> {
        for _ in 0..RELEASE_ATTEMPTS {
            let (state, version) = self.load(slot_id).await?;
            let now = self.clock.now().timestamp_millis();
            let events = accepted(decide_release(&state, slot_id, appointment_id, now), slot_id)?;
            if events.is_empty() {
                return Ok(());
            }
            match self
                .event_store
                .append(&slot_id.stream_id(), version, &events)
                .await
            {
                Ok(()) => {
                    tracing::info!(%slot_id, appointment_id, "slot released");
                    return Ok(());
                }
                Err(EventStoreError::VersionMismatch { .. }) => continue,
                Err(error) => return Err(error.into()),
            }
        }
        Err(ApplicationError::Unavailable(format!(
            "slot {slot_id} kept changing while releasing"
        )))
    }

    async fn load(&self, slot_id: SlotId) -> Result<(SlotState, i64), ApplicationError> {
        let stream = self.event_store.load(&slot_id.stream_id()).await?;
        let state = stream.events.into_iter().fold(SlotState::Free, evolve);
        Ok((state, stream.version))
    }
}

fn accepted(decision: SlotDecision, slot_id: SlotId) -> Result<Vec<SlotEvent>, ApplicationError> {
    match decision {
        Decision::Accepted { events, .. } => Ok(events),
        Decision::Rejected { .. } => Err(ApplicationError::SlotConflict {
            slot_id: slot_id.to_string(),
        }),
    }
}
