// Pure decisions for an employee's timers.
//
// Responsibilities
// - At most one open (Active or Paused) time log per employee.
// - pause: Active only. resume: Paused only. stop: Active or Paused.

use crate::modules::time_tracking::core::events::{
    TimerEvent,
    v1::{TimerPausedV1, TimerResumedV1, TimerStartedV1, TimerStoppedV1},
};
use crate::modules::time_tracking::core::state::{EmployeeTimers, TimeLog, TimeLogStatus};
use crate::shared::core::primitives::Decision;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TimerDecideError {
    #[error("time log {time_log_id} is still open")]
    TimerAlreadyOpen { time_log_id: String },

    #[error("time log {time_log_id} not found")]
    UnknownTimeLog { time_log_id: String },

    #[error("cannot {action} a {status} time log")]
    InvalidTransition {
        status: TimeLogStatus,
        action: &'static str,
    },
}

pub type TimerDecision = Decision<TimerEvent, (), TimerDecideError>;

pub struct StartTimer {
    pub time_log_id: String,
    pub employee_id: String,
    pub task_id: String,
    pub notes: Option<String>,
}

pub fn decide_start(state: &EmployeeTimers, command: StartTimer, now: i64) -> TimerDecision {
    if let Some(open) = state.open() {
        return Decision::reject(TimerDecideError::TimerAlreadyOpen {
            time_log_id: open.id.clone(),
        });
    }
    Decision::accept(vec![TimerEvent::TimerStartedV1(TimerStartedV1 {
        time_log_id: command.time_log_id,
        employee_id: command.employee_id,
        task_id: command.task_id,
        started_at: now,
        notes: command.notes,
    })])
}

pub fn decide_pause(state: &EmployeeTimers, time_log_id: &str, now: i64) -> TimerDecision {
    match require(state, time_log_id, "pause", &[TimeLogStatus::Active]) {
        Ok(log) => Decision::accept(vec![TimerEvent::TimerPausedV1(TimerPausedV1 {
            time_log_id: log.id.clone(),
            paused_at: now,
        })]),
        Err(reason) => Decision::reject(reason),
    }
}

pub fn decide_resume(state: &EmployeeTimers, time_log_id: &str, now: i64) -> TimerDecision {
    match require(state, time_log_id, "resume", &[TimeLogStatus::Paused]) {
        Ok(log) => Decision::accept(vec![TimerEvent::TimerResumedV1(TimerResumedV1 {
            time_log_id: log.id.clone(),
            resumed_at: now,
        })]),
        Err(reason) => Decision::reject(reason),
    }
}

pub fn decide_stop(
    state: &EmployeeTimers,
    time_log_id: &str,
    notes: Option<String>,
    now: i64,
) -> TimerDecision {
    let open = [TimeLogStatus::Active, TimeLogStatus::Paused];
    match require(state, time_log_id, "stop", &open) {
        Ok(log) => Decision::accept(vec![TimerEvent::TimerStoppedV1(TimerStoppedV1 {
            time_log_id: log.id.clone(),
            stopped_at: now,
            notes,
        })]),
        Err(reason) => Decision::reject(reason),
    }
}

fn require<'a>(
    state: &'a EmployeeTimers,
    time_log_id: &str,
    action: &'static str,
    allowed: &[TimeLogStatus],
) -> Result<&'a TimeLog, TimerDecideError> {
    let log = state
        .find(time_log_id)
        .ok_or_else(|| TimerDecideError::UnknownTimeLog {
            time_log_id: time_log_id.to_string(),
        })?;
    if !allowed.contains(&log.status) {
        return Err(TimerDecideError::InvalidTransition {
            status: log.status,
            action,
        });
    }
    Ok(log)
}
