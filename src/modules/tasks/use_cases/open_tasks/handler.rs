// Task creation and voiding, driven by appointment assignment and cancellation.
//
// Both operations are idempotent so the appointment side can simply re-run them after
// a partial failure. The projection is refreshed even when nothing was appended, and a
// voided task never keeps a timer running.

use crate::modules::appointments::adapters::outbound::assignment_tasks::AssignmentTasks;
use crate::modules::tasks::adapters::outbound::projections::TaskProjectionRepository;
use crate::modules::tasks::core::decide::{OpenTask, TaskDecision, decide_open, decide_void};
use crate::modules::tasks::core::events::{TaskEvent, task_stream_id};
use crate::modules::tasks::core::evolve::evolve;
use crate::modules::tasks::core::state::{Task, TaskState};
use crate::modules::time_tracking::core::events::TimerEvent;
use crate::modules::time_tracking::use_cases::track_time::handler::TimeTrackingEngine;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{Clock, Decision};
use crate::shared::infrastructure::event_store::{EventStore, EventStoreError};
use async_trait::async_trait;
use std::sync::Arc;

const ATTEMPTS: usize = 3;

pub struct TaskAssignments<TEventStore, TTimerStore>
where
    TEventStore: EventStore<TaskEvent> + 'static,
    TTimerStore: EventStore<TimerEvent> + 'static,
{
    event_store: Arc<TEventStore>,
    projections: Arc<dyn TaskProjectionRepository>,
    time_tracking: Arc<TimeTrackingEngine<TTimerStore>>,
    clock: Arc<dyn Clock>,
}

impl<TEventStore, TTimerStore> TaskAssignments<TEventStore, TTimerStore>
where
    TEventStore: EventStore<TaskEvent> + 'static,
    TTimerStore: EventStore<TimerEvent> + 'static,
{
    pub fn new(
        event_store: Arc<TEventStore>,
        projections: Arc<dyn TaskProjectionRepository>,
        time_tracking: Arc<TimeTrackingEngine<TTimerStore>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            event_store,
            projections,
            time_tracking,
            clock,
        }
    }

    pub async fn get(&self, task_id: &str) -> Result<Option<Task>, ApplicationError> {
        let (state, _) = self.load(task_id).await?;
        Ok(state.task().cloned())
    }

    pub async fn open(&self, command: OpenTask) -> Result<Task, ApplicationError> {
        let task_id = command.task_id.clone();
        let task = self
            .apply(&task_id, |state, now| decide_open(state, command.clone(), now))
            .await?;
        task.ok_or_else(|| ApplicationError::not_found("task", task_id))
    }

    /// Void a task. Missing, terminal or already voided tasks are left as they are.
    pub async fn void(&self, task_id: &str, reason: &str) -> Result<Option<Task>, ApplicationError> {
        if self.get(task_id).await?.is_none() {
            return Ok(None);
        }
        let task = self
            .apply(task_id, |state, now| decide_void(state, task_id, reason, now))
            .await?;
        if let Some(task) = task.as_ref().filter(|task| task.voided) {
            if let Some(time_log) = self
                .time_tracking
                .stop_for_task(&task.employee_id, &task.id, Some(reason.to_string()))
                .await?
            {
                tracing::info!(
                    task_id,
                    time_log_id = %time_log.id,
                    "timer stopped on voided task"
                );
            }
        }
        Ok(task)
    }

    async fn apply<F>(&self, task_id: &str, decide: F) -> Result<Option<Task>, ApplicationError>
    where
        F: Fn(&TaskState, i64) -> TaskDecision,
    {
        let stream_id = task_stream_id(task_id);
        for _ in 0..ATTEMPTS {
            let (state, version) = self.load(task_id).await?;
            let events = match decide(&state, self.clock.now().timestamp_millis()) {
                Decision::Accepted { events, .. } => events,
                Decision::Rejected { reason } => return Err(reason.into()),
            };
            if !events.is_empty() {
                match self.event_store.append(&stream_id, version, &events).await {
                    Ok(()) => {}
                    Err(EventStoreError::VersionMismatch { .. }) => continue,
                    Err(error) => return Err(error.into()),
                }
            }
            let state = events.into_iter().fold(state, evolve);
            if let Some(task) = state.task() {
                self.projections.upsert(task.clone()).await?;
                tracing::info!(
                    task_id,
                    employee_id = %task.employee_id,
                    voided = task.voided,
                    "task assignment recorded"
                );
            }
            return Ok(state.task().cloned());
        }
        Err(ApplicationError::Unavailable(format!(
            "{stream_id} kept changing, retry"
        )))
    }

    async fn load(&self, task_id: &str) -> Result<(TaskState, i64), ApplicationError> {
        let stream = self.event_store.load(&task_stream_id(task_id)).await?;
        let state = stream.events.into_iter().fold(TaskState::None, evolve);
        Ok((state, stream.version))
    }
}

#[async_trait]
impl<TEventStore, TTimerStore> AssignmentTasks for TaskAssignments<TEventStore, TTimerStore>
where
    TEventStore: EventStore<TaskEvent> + 'static,
    TTimerStore: EventStore<TimerEvent> + 'static,
{
    async fn open(&self, task: OpenTask) -> Result<(), ApplicationError> {
        TaskAssignments::open(self, task).await.map(|_| ())
    }

    async fn void(&self, task_id: &str, reason: &str) -> Result<(), ApplicationError> {
        TaskAssignments::void(self, task_id, reason).await.map(|_| ())
    }
}
