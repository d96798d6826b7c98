// Task lifecycle: the employee-facing actions on a task.
//
// Responsibilities
// - Serialize actions per task, decide, append with the loaded version.
// - Couple `start` and `complete` to the employee's timer. The timer step runs first so a
//   refused timer leaves the task untouched.
// - After the append: refresh the projection, enqueue notifications, mirror the new status
//   onto the appointment. None of these undo the transition. A failed mirror is reported as
//   the action's error; repeating the action then only brings the appointment up to date.

use crate::modules::tasks::adapters::outbound::appointment_progress::AppointmentProgress;
use crate::modules::tasks::adapters::outbound::projections::{TaskProjectionRepository, TaskQueries};
use crate::modules::tasks::core::decide::{ActOnTask, decide_act};
use crate::modules::tasks::core::events::{TaskEvent, task_stream_id};
use crate::modules::tasks::core::evolve::evolve;
use crate::modules::tasks::core::state::{Task, TaskState};
use crate::modules::tasks::core::status::TaskAction;
use crate::modules::time_tracking::core::events::TimerEvent;
use crate::modules::time_tracking::core::state::TimeLog;
use crate::modules::time_tracking::use_cases::track_time::handler::TimeTrackingEngine;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::{Clock, Decision};
use crate::shared::infrastructure::event_store::{EventStore, EventStoreError};
use crate::shared::infrastructure::intent_outbox::DomainOutbox;
use crate::shared::infrastructure::intent_outbox::dispatch::dispatch_notifications;
use crate::shared::infrastructure::keyed_lock::KeyedLocks;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskActed {
    pub task: Task,
    /// The timer touched by `start` or `complete`, if any.
    pub time_log: Option<TimeLog>,
}

pub struct TaskLifecycle<TEventStore, TTimerStore, TOutbox>
where
    TEventStore: EventStore<TaskEvent> + 'static,
    TTimerStore: EventStore<TimerEvent> + 'static,
    TOutbox: DomainOutbox + 'static,
{
    topic: String,
    event_store: Arc<TEventStore>,
    outbox: Arc<TOutbox>,
    time_tracking: Arc<TimeTrackingEngine<TTimerStore>>,
    projections: Arc<dyn TaskProjectionRepository>,
    queries: Arc<dyn TaskQueries>,
    progress: Arc<dyn AppointmentProgress>,
    locks: Arc<KeyedLocks>,
    clock: Arc<dyn Clock>,
}

impl<TEventStore, TTimerStore, TOutbox> TaskLifecycle<TEventStore, TTimerStore, TOutbox>
where
    TEventStore: EventStore<TaskEvent> + 'static,
    TTimerStore: EventStore<TimerEvent> + 'static,
    TOutbox: DomainOutbox + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        topic: impl Into<String>,
        event_store: Arc<TEventStore>,
        outbox: Arc<TOutbox>,
        time_tracking: Arc<TimeTrackingEngine<TTimerStore>>,
        projections: Arc<dyn TaskProjectionRepository>,
        queries: Arc<dyn TaskQueries>,
        progress: Arc<dyn AppointmentProgress>,
        locks: Arc<KeyedLocks>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            topic: topic.into(),
            event_store,
            outbox,
            time_tracking,
            projections,
            queries,
            progress,
            locks,
            clock,
        }
    }

    pub async fn get(&self, task_id: &str, employee_id: &str) -> Result<Task, ApplicationError> {
        let (state, _) = self.load(task_id).await?;
        state
            .task()
            .filter(|task| task.employee_id == employee_id)
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("task", task_id))
    }

    pub async fn list_for_employee(&self, employee_id: &str) -> Result<Vec<Task>, ApplicationError> {
        Ok(self.queries.list_by_employee(employee_id).await?)
    }

    pub async fn act(&self, command: ActOnTask) -> Result<TaskActed, ApplicationError> {
        let stream_id = task_stream_id(&command.task_id);
        let guard = self.locks.acquire(&stream_id).await?;
        let (state, version) = self.load(&command.task_id).await?;
        let now = self.clock.now().timestamp_millis();

        let (events, intents) = match decide_act(&state, command.clone(), now) {
            Decision::Accepted { events, intents } => (events, intents),
            Decision::Rejected { reason } => {
                drop(guard);
                if let Some(task) = state.task().filter(|task| is_repeat(task, &command)) {
                    if self.mirror(task).await? {
                        tracing::info!(task_id = %task.id, action = %command.action, "appointment caught up with a repeated action");
                        return Ok(TaskActed {
                            task: task.clone(),
                            time_log: None,
                        });
                    }
                }
                tracing::info!(task_id = %command.task_id, action = %command.action, %reason, "task action refused");
                return Err(reason.into());
            }
        };

        let mut time_log = None;
        let mut opened_timer = false;
        match command.action {
            TaskAction::Start => {
                let running = self
                    .time_tracking
                    .ensure_running(&command.employee_id, &command.task_id)
                    .await?;
                opened_timer = running.opened;
                time_log = Some(running.time_log);
            }
            TaskAction::Complete => {
                time_log = self
                    .time_tracking
                    .stop_for_task(&command.employee_id, &command.task_id, command.notes.clone())
                    .await?;
            }
            _ => {}
        }

        if events.is_empty() {
            drop(guard);
            let task = state
                .task()
                .cloned()
                .ok_or_else(|| ApplicationError::not_found("task", &command.task_id))?;
            self.mirror(&task).await?;
            return Ok(TaskActed { task, time_log });
        }

        if let Err(error) = self.event_store.append(&stream_id, version, &events).await {
            if opened_timer {
                self.discard_timer(&command).await;
            }
            return Err(match error {
                EventStoreError::VersionMismatch { .. } => {
                    ApplicationError::Unavailable(format!("{stream_id} changed concurrently, retry"))
                }
                other => other.into(),
            });
        }
        drop(guard);

        let stream_version = version + events.len() as i64;
        let state = events.into_iter().fold(state, evolve);
        let task = state
            .task()
            .cloned()
            .ok_or_else(|| ApplicationError::not_found("task", &command.task_id))?;
        tracing::info!(
            task_id = %task.id,
            employee_id = %task.employee_id,
            status = %task.status,
            "task transitioned"
        );

        if let Err(error) = self.projections.upsert(task.clone()).await {
            tracing::warn!(%error, task_id = %task.id, "task projection not refreshed");
        }
        dispatch_notifications(&*self.outbox, &self.topic, &stream_id, stream_version, intents).await;
        self.mirror(&task).await?;

        Ok(TaskActed { task, time_log })
    }

    /// Returns whether the appointment was behind.
    async fn mirror(&self, task: &Task) -> Result<bool, ApplicationError> {
        self.progress
            .task_progressed(&task.appointment_id, &task.id, task.status)
            .await
            .inspect_err(|error| {
                tracing::warn!(%error, task_id = %task.id, status = %task.status, "appointment progress not recorded");
            })
    }

    async fn discard_timer(&self, command: &ActOnTask) {
        if let Err(error) = self
            .time_tracking
            .stop_for_task(&command.employee_id, &command.task_id, None)
            .await
        {
            tracing::warn!(%error, task_id = %command.task_id, "timer opened for a failed start left running");
        }
    }

    async fn load(&self, task_id: &str) -> Result<(TaskState, i64), ApplicationError> {
        let stream = self.event_store.load(&task_stream_id(task_id)).await?;
        let state = stream.events.into_iter().fold(TaskState::None, evolve);
        Ok((state, stream.version))
    }
}

/// The action already happened: same employee, and the task sits at the action's target.
fn is_repeat(task: &Task, command: &ActOnTask) -> bool {
    task.employee_id == command.employee_id && !task.voided && task.status == command.action.target()
}
