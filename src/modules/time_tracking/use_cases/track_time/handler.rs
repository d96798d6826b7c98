// Time tracking engine: the only writer of employee timer streams.
//
// Responsibilities
// - Serialize every timer operation of one employee on the employee key.
// - Append with the loaded version; a lost compare-and-set during `start` means another
//   start won, which surfaces as TimerAlreadyOpen.
// - Offer the reconciling helpers the task lifecycle needs (`ensure_running`, `stop_for_task`).

use crate::modules::time_tracking::core::decide::{
    StartTimer, TimerDecideError, TimerDecision, decide_pause, decide_resume, decide_start,
    decide_stop,
};
use crate::modules::time_tracking::core::events::{TimerEvent, timer_stream_id};
use crate::modules::time_tracking::core::evolve::evolve;
use crate::modules::time_tracking::core::state::{EmployeeTimers, TimeLog, TimeLogStatus};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{Clock, Decision};
use crate::shared::infrastructure::event_store::{EventStore, EventStoreError};
use crate::shared::infrastructure::keyed_lock::KeyedLocks;
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of `ensure_running`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningTimer {
    pub time_log: TimeLog,
    /// True when this call opened a fresh time log.
    pub opened: bool,
}

pub struct TimeTrackingEngine<TEventStore>
where
    TEventStore: EventStore<TimerEvent> + 'static,
{
    event_store: Arc<TEventStore>,
    locks: Arc<KeyedLocks>,
    clock: Arc<dyn Clock>,
}

impl<TEventStore> TimeTrackingEngine<TEventStore>
where
    TEventStore: EventStore<TimerEvent> + 'static,
{
    pub fn new(event_store: Arc<TEventStore>, locks: Arc<KeyedLocks>, clock: Arc<dyn Clock>) -> Self {
        Self {
            event_store,
            locks,
            clock,
        }
    }

    pub async fn start(
        &self,
        employee_id: &str,
        task_id: &str,
        notes: Option<String>,
    ) -> Result<TimeLog, ApplicationError> {
        let stream_id = timer_stream_id(employee_id);
        let _guard = self.locks.acquire(&stream_id).await?;
        self.start_locked(&stream_id, employee_id, task_id, notes).await
    }

    pub async fn pause(&self, employee_id: &str, time_log_id: &str) -> Result<TimeLog, ApplicationError> {
        self.transition(employee_id, time_log_id, |state, now| {
            decide_pause(state, time_log_id, now)
        })
        .await
    }

    pub async fn resume(&self, employee_id: &str, time_log_id: &str) -> Result<TimeLog, ApplicationError> {
        self.transition(employee_id, time_log_id, |state, now| {
            decide_resume(state, time_log_id, now)
        })
        .await
    }

    pub async fn stop(
        &self,
        employee_id: &str,
        time_log_id: &str,
        notes: Option<String>,
    ) -> Result<TimeLog, ApplicationError> {
        self.transition(employee_id, time_log_id, move |state, now| {
            decide_stop(state, time_log_id, notes, now)
        })
        .await
    }

    pub async fn active_for(&self, employee_id: &str) -> Result<Option<TimeLog>, ApplicationError> {
        let (state, _) = self.load(&timer_stream_id(employee_id)).await?;
        Ok(state.open().cloned())
    }

    pub async fn list_for_employee(&self, employee_id: &str) -> Result<Vec<TimeLog>, ApplicationError> {
        let (state, _) = self.load(&timer_stream_id(employee_id)).await?;
        Ok(state.logs)
    }

    pub async fn list_for_task(
        &self,
        employee_id: &str,
        task_id: &str,
    ) -> Result<Vec<TimeLog>, ApplicationError> {
        let (state, _) = self.load(&timer_stream_id(employee_id)).await?;
        Ok(state.for_task(task_id).cloned().collect())
    }

    /// Make sure the employee's open timer runs for `task_id`: resume it when paused, leave it
    /// when active, open a new one when none is open. A timer open for another task is refused.
    pub async fn ensure_running(
        &self,
        employee_id: &str,
        task_id: &str,
    ) -> Result<RunningTimer, ApplicationError> {
        let stream_id = timer_stream_id(employee_id);
        let _guard = self.locks.acquire(&stream_id).await?;
        let (state, version) = self.load(&stream_id).await?;
        match state.open() {
            Some(log) if log.task_id != task_id => Err(ApplicationError::TimerAlreadyOpen {
                time_log_id: log.id.clone(),
            }),
            Some(log) if log.status == TimeLogStatus::Active => Ok(RunningTimer {
                time_log: log.clone(),
                opened: false,
            }),
            Some(log) => {
                let time_log_id = log.id.clone();
                let decision = decide_resume(&state, &time_log_id, self.now());
                let time_log = self
                    .commit(&stream_id, state, version, &time_log_id, decision)
                    .await?;
                Ok(RunningTimer {
                    time_log,
                    opened: false,
                })
            }
            None => {
                let time_log = self.start_locked(&stream_id, employee_id, task_id, None).await?;
                Ok(RunningTimer {
                    time_log,
                    opened: true,
                })
            }
        }
    }

    /// Stop the open timer of `task_id`, if there is one.
    pub async fn stop_for_task(
        &self,
        employee_id: &str,
        task_id: &str,
        notes: Option<String>,
    ) -> Result<Option<TimeLog>, ApplicationError> {
        let stream_id = timer_stream_id(employee_id);
        let _guard = self.locks.acquire(&stream_id).await?;
        let (state, version) = self.load(&stream_id).await?;
        let Some(time_log_id) = state
            .open()
            .filter(|log| log.task_id == task_id)
            .map(|log| log.id.clone())
        else {
            return Ok(None);
        };
        let decision = decide_stop(&state, &time_log_id, notes, self.now());
        let stopped = self
            .commit(&stream_id, state, version, &time_log_id, decision)
            .await?;
        Ok(Some(stopped))
    }

    async fn start_locked(
        &self,
        stream_id: &str,
        employee_id: &str,
        task_id: &str,
        notes: Option<String>,
    ) -> Result<TimeLog, ApplicationError> {
        let (state, version) = self.load(stream_id).await?;
        let time_log_id = Uuid::now_v7().to_string();
        let command = StartTimer {
            time_log_id: time_log_id.clone(),
            employee_id: employee_id.to_string(),
            task_id: task_id.to_string(),
            notes,
        };
        let decision = decide_start(&state, command, self.now());
        match self
            .commit(stream_id, state, version, &time_log_id, decision)
            .await
        {
            Err(ApplicationError::Unavailable(reason)) => {
                // A concurrent writer may have opened a timer between our load and append.
                match self.load(stream_id).await {
                    Ok((current, _)) if current.open().is_some() => {
                        let open = current.open().map(|log| log.id.clone()).unwrap_or_default();
                        Err(ApplicationError::TimerAlreadyOpen { time_log_id: open })
                    }
                    _ => Err(ApplicationError::Unavailable(reason)),
                }
            }
            other => {
                if let Ok(log) = &other {
                    tracing::info!(employee_id, task_id, time_log_id = %log.id, "timer started");
                }
                other
            }
        }
    }

    async fn transition<F>(
        &self,
        employee_id: &str,
        time_log_id: &str,
        decide: F,
    ) -> Result<TimeLog, ApplicationError>
    where
        F: FnOnce(&EmployeeTimers, i64) -> TimerDecision,
    {
        let stream_id = timer_stream_id(employee_id);
        let _guard = self.locks.acquire(&stream_id).await?;
        let (state, version) = self.load(&stream_id).await?;
        // Read after the lock so intervals follow the order the operations were serialized in.
        let decision = decide(&state, self.now());
        let log = self
            .commit(&stream_id, state, version, time_log_id, decision)
            .await?;
        tracing::info!(employee_id, time_log_id, status = %log.status, "timer updated");
        Ok(log)
    }

    async fn commit(
        &self,
        stream_id: &str,
        state: EmployeeTimers,
        version: i64,
        time_log_id: &str,
        decision: TimerDecision,
    ) -> Result<TimeLog, ApplicationError> {
        let events = match decision {
            Decision::Accepted { events, .. } => events,
            Decision::Rejected { reason } => return Err(reason.into()),
        };
        match self.event_store.append(stream_id, version, &events).await {
            Ok(()) => {}
            Err(EventStoreError::VersionMismatch { .. }) => {
                return Err(ApplicationError::Unavailable(format!(
                    "{stream_id} changed concurrently, retry"
                )));
            }
            Err(error) => return Err(error.into()),
        }
        let state = events.into_iter().fold(state, evolve);
        state
            .find(time_log_id)
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("time log", time_log_id))
    }

    async fn load(&self, stream_id: &str) -> Result<(EmployeeTimers, i64), ApplicationError> {
        let stream = self.event_store.load(stream_id).await?;
        let state = stream.events.into_iter().fold(EmployeeTimers::default(), evolve);
        Ok((state, stream.version))
    }

    fn now(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }
}

impl From<TimerDecideError> for ApplicationError {
    fn from(error: TimerDecideError) -> Self {
        match error {
            TimerDecideError::TimerAlreadyOpen { time_log_id } => {
                ApplicationError::TimerAlreadyOpen { time_log_id }
            }
            TimerDecideError::UnknownTimeLog { time_log_id } => {
                ApplicationError::not_found("time log", time_log_id)
            }
            TimerDecideError::InvalidTransition { status, action } => {
                ApplicationError::invalid_transition(status, action)
            }
        }
    }
}
