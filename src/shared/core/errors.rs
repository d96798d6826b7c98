use crate::shared::infrastructure::event_store::EventStoreError;
use crate::shared::infrastructure::keyed_lock::LockTimeout;
use thiserror::Error;

/// Typed failures returned by every use case handler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("slot {slot_id} is already booked, please choose another slot")]
    SlotConflict { slot_id: String },

    #[error("invalid slot: {0}")]
    InvalidSlot(String),

    #[error("no employees selected")]
    NoEmployeesSelected,

    #[error("cannot {action} while {state}")]
    InvalidTransition { state: String, action: String },

    #[error("you already have an active task timer ({time_log_id})")]
    TimerAlreadyOpen { time_log_id: String },

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("temporarily unavailable: {0}")]
    Unavailable(String),
}

impl ApplicationError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        ApplicationError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn invalid_transition(state: impl ToString, action: impl ToString) -> Self {
        ApplicationError::InvalidTransition {
            state: state.to_string(),
            action: action.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApplicationError::Validation(_) => "VALIDATION_ERROR",
            ApplicationError::SlotConflict { .. } => "SLOT_CONFLICT",
            ApplicationError::InvalidSlot(_) => "INVALID_SLOT",
            ApplicationError::NoEmployeesSelected => "NO_EMPLOYEES_SELECTED",
            ApplicationError::InvalidTransition { .. } => "INVALID_TRANSITION",
            ApplicationError::TimerAlreadyOpen { .. } => "TIMER_ALREADY_OPEN",
            ApplicationError::NotFound { .. } => "NOT_FOUND",
            ApplicationError::Unavailable(_) => "UNAVAILABLE",
        }
    }
}

// Version mismatches carry aggregate-specific meaning, so callers translate them
// before falling back to this conversion.
impl From<EventStoreError> for ApplicationError {
    fn from(error: EventStoreError) -> Self {
        ApplicationError::Unavailable(error.to_string())
    }
}

impl From<LockTimeout> for ApplicationError {
    fn from(error: LockTimeout) -> Self {
        ApplicationError::Unavailable(error.to_string())
    }
}

impl From<anyhow::Error> for ApplicationError {
    fn from(error: anyhow::Error) -> Self {
        ApplicationError::Unavailable(error.to_string())
    }
}
