// A task lifecycle over in-memory stores, seeded with task t-1 assigned to E7. Appointment
// progress is recorded instead of applied.

use crate::modules::tasks::adapters::outbound::appointment_progress::AppointmentProgress;
use crate::modules::tasks::adapters::outbound::projections::TaskProjectionRepository;
use crate::modules::tasks::adapters::outbound::projections_in_memory::InMemoryTaskProjections;
use crate::modules::tasks::core::events::{TaskEvent, task_stream_id};
use crate::modules::tasks::core::evolve::evolve;
use crate::modules::tasks::core::state::TaskState;
use crate::modules::tasks::core::status::TaskStatus;
use crate::modules::tasks::use_cases::drive_task::handler::TaskLifecycle;
use crate::modules::time_tracking::use_cases::track_time::handler::TimeTrackingEngine;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::FixedClock;
use crate::shared::infrastructure::event_store::EventStore;
use crate::shared::infrastructure::keyed_lock::KeyedLocks;
use crate::shell::state::{Outbox, TaskStore, TimerStore};
use crate::tests::fixtures::events::task_assigned_v1::make_task_assigned_v1_event;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rstest::fixture;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct RecordingProgress {
    statuses: Mutex<Vec<TaskStatus>>,
    fail_next: AtomicBool,
}

impl RecordingProgress {
    pub async fn recorded(&self) -> Vec<TaskStatus> {
        self.statuses.lock().await.clone()
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl AppointmentProgress for RecordingProgress {
    async fn task_progressed(
        &self,
        _appointment_id: &str,
        _task_id: &str,
        status: TaskStatus,
    ) -> Result<bool, ApplicationError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(ApplicationError::Unavailable("appointment store offline".into()));
        }
        let mut statuses = self.statuses.lock().await;
        if statuses.last() == Some(&status) {
            return Ok(false);
        }
        statuses.push(status);
        Ok(true)
    }
}

pub struct TaskHarness {
    pub lifecycle: TaskLifecycle<TaskStore, TimerStore, Outbox>,
    pub clock: Arc<FixedClock>,
    pub progress: Arc<RecordingProgress>,
    pub outbox: Arc<Outbox>,
    pub time_tracking: Arc<TimeTrackingEngine<TimerStore>>,
    pub task_store: Arc<TaskStore>,
}

#[fixture]
pub async fn task_harness() -> TaskHarness {
    seeded_task_harness().await
}

pub async fn seeded_task_harness() -> TaskHarness {
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 10, 20, 8, 0, 0).unwrap(),
    ));
    let locks = Arc::new(KeyedLocks::new(Duration::from_millis(250)));
    let task_store = Arc::new(TaskStore::new());
    let outbox = Arc::new(Outbox::new());
    let projections = Arc::new(InMemoryTaskProjections::new());
    let progress = Arc::new(RecordingProgress::default());
    let time_tracking = Arc::new(TimeTrackingEngine::new(
        Arc::new(TimerStore::new()),
        locks.clone(),
        clock.clone(),
    ));

    let assigned = TaskEvent::TaskAssignedV1(make_task_assigned_v1_event());
    task_store
        .append(&task_stream_id("t-1"), 0, &[assigned.clone()])
        .await
        .unwrap();
    if let TaskState::Existing(task) = evolve(TaskState::None, assigned) {
        projections.upsert(task).await.unwrap();
    }

    let lifecycle = TaskLifecycle::new(
        "workshop.notifications.test",
        task_store.clone(),
        outbox.clone(),
        time_tracking.clone(),
        projections.clone(),
        projections,
        progress.clone(),
        locks,
        clock.clone(),
    );
    TaskHarness {
        lifecycle,
        clock,
        progress,
        outbox,
        time_tracking,
        task_store,
    }
}
