// Primitives shared by every module: time source, service type and decision shape.
//
// Purpose
// - Keep the core deterministic by injecting the current time through a Clock.
// - Give deciders one result shape: accepted events plus side-effect intents, or a rejection.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to an instant that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    current: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(at),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.current.lock().unwrap_or_else(|p| p.into_inner());
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, async_graphql::Enum)]
pub enum ServiceType {
    Service,
    Modification,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Service => f.write_str("Service"),
            ServiceType::Modification => f.write_str("Modification"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decision<TEvent, TIntent, TReason> {
    Accepted {
        events: Vec<TEvent>,
        intents: Vec<TIntent>,
    },
    Rejected {
        reason: TReason,
    },
}

impl<TEvent, TIntent, TReason> Decision<TEvent, TIntent, TReason> {
    pub fn accept(events: Vec<TEvent>) -> Self {
        Decision::Accepted {
            events,
            intents: Vec::new(),
        }
    }

    pub fn reject(reason: TReason) -> Self {
        Decision::Rejected { reason }
    }
}
