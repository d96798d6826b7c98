// Load, append and project for the appointment stream.
//
// Every appointment handler goes through here so the read model is refreshed inline after
// each successful append. A failed projection write is logged; the next write repairs it.

use crate::modules::appointments::adapters::outbound::projections::AppointmentProjectionRepository;
use crate::modules::appointments::core::events::{AppointmentEvent, appointment_stream_id};
use crate::modules::appointments::core::evolve::evolve;
use crate::modules::appointments::core::state::{Appointment, AppointmentState};
use crate::shared::core::errors::ApplicationError;
use crate::shared::infrastructure::event_store::{EventStore, EventStoreError};
use std::sync::Arc;

pub struct AppointmentStream<TEventStore>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
{
    event_store: Arc<TEventStore>,
    projections: Arc<dyn AppointmentProjectionRepository>,
}

impl<TEventStore> AppointmentStream<TEventStore>
where
    TEventStore: EventStore<AppointmentEvent> + 'static,
{
    pub fn new(
        event_store: Arc<TEventStore>,
        projections: Arc<dyn AppointmentProjectionRepository>,
    ) -> Self {
        Self {
            event_store,
            projections,
        }
    }

    pub async fn load(&self, appointment_id: &str) -> Result<(AppointmentState, i64), ApplicationError> {
        let stream = self
            .event_store
            .load(&appointment_stream_id(appointment_id))
            .await?;
        let state = stream
            .events
            .into_iter()
            .fold(AppointmentState::None, evolve);
        Ok((state, stream.version))
    }

    pub async fn get(&self, appointment_id: &str) -> Result<Appointment, ApplicationError> {
        let (state, _) = self.load(appointment_id).await?;
        state
            .appointment()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("appointment", appointment_id))
    }

    /// Append `events` at `version` and return the folded state. Nothing is written when
    /// `events` is empty.
    pub async fn commit(
        &self,
        appointment_id: &str,
        state: AppointmentState,
        version: i64,
        events: Vec<AppointmentEvent>,
    ) -> Result<AppointmentState, ApplicationError> {
        if events.is_empty() {
            return Ok(state);
        }
        let stream_id = appointment_stream_id(appointment_id);
        self.event_store
            .append(&stream_id, version, &events)
            .await
            .map_err(|error| match error {
                EventStoreError::VersionMismatch { .. } => {
                    ApplicationError::Unavailable(format!("{stream_id} changed concurrently, retry"))
                }
                other => other.into(),
            })?;
        let state = events.into_iter().fold(state, evolve);
        if let Some(appointment) = state.appointment() {
            self.project(appointment).await;
        }
        Ok(state)
    }

    pub async fn project(&self, appointment: &Appointment) {
        if let Err(error) = self.projections.upsert(appointment.clone()).await {
            tracing::warn!(%error, appointment_id = %appointment.id, "appointment projection not refreshed");
        }
    }
}
