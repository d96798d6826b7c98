use crate::modules::time_tracking::core::events::TimerEvent;
use crate::modules::time_tracking::core::state::{EmployeeTimers, Interval, TimeLog, TimeLogStatus};

pub fn evolve(mut state: EmployeeTimers, event: TimerEvent) -> EmployeeTimers {
    match event {
        TimerEvent::TimerStartedV1(e) => {
            if state.find(&e.time_log_id).is_none() {
                state.logs.push(TimeLog {
                    id: e.time_log_id,
                    employee_id: e.employee_id,
                    task_id: e.task_id,
                    status: TimeLogStatus::Active,
                    start_time: e.started_at,
                    end_time: None,
                    intervals: vec![Interval {
                        start: e.started_at,
                        end: None,
                    }],
                    duration_seconds: 0,
                    notes: e.notes,
                });
            }
        }
        TimerEvent::TimerPausedV1(e) => {
            if let Some(log) = find_mut(&mut state, &e.time_log_id, TimeLogStatus::Active) {
                close_interval(log, e.paused_at);
                log.status = TimeLogStatus::Paused;
            }
        }
        TimerEvent::TimerResumedV1(e) => {
            if let Some(log) = find_mut(&mut state, &e.time_log_id, TimeLogStatus::Paused) {
                log.intervals.push(Interval {
                    start: e.resumed_at,
                    end: None,
                });
                log.status = TimeLogStatus::Active;
            }
        }
        TimerEvent::TimerStoppedV1(e) => {
            if let Some(log) = state
                .logs
                .iter_mut()
                .find(|log| log.id == e.time_log_id && log.is_open())
            {
                close_interval(log, e.stopped_at);
                log.status = TimeLogStatus::Completed;
                log.end_time = Some(e.stopped_at);
                if e.notes.is_some() {
                    log.notes = e.notes;
                }
            }
        }
    }
    state
}

fn find_mut<'a>(
    state: &'a mut EmployeeTimers,
    time_log_id: &str,
    status: TimeLogStatus,
) -> Option<&'a mut TimeLog> {
    state
        .logs
        .iter_mut()
        .find(|log| log.id == time_log_id && log.status == status)
}

fn close_interval(log: &mut TimeLog, at: i64) {
    if let Some(open) = log.intervals.iter_mut().find(|i| i.end.is_none()) {
        open.end = Some(at);
        log.duration_seconds += open.seconds();
    }
}
