// Calendar policy: is the shop open on a date, and which windows can be booked.
//
// Boundaries
// - Pure. "today" and declared closures are passed in; no input or output here.

use crate::modules::calendar::core::unavailable_date::UnavailableDate;
use crate::shared::core::primitives::ServiceType;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotWindow {
    pub index: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl SlotWindow {
    pub fn hours(&self) -> i64 {
        (self.end_time - self.start_time).num_hours()
    }
}

fn hm(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Three 3-hour windows starting 08:00.
pub fn service_slots() -> [SlotWindow; 3] {
    [
        SlotWindow {
            index: 1,
            start_time: hm(8),
            end_time: hm(11),
        },
        SlotWindow {
            index: 2,
            start_time: hm(11),
            end_time: hm(14),
        },
        SlotWindow {
            index: 3,
            start_time: hm(14),
            end_time: hm(17),
        },
    ]
}

pub fn modification_window() -> SlotWindow {
    SlotWindow {
        index: 1,
        start_time: hm(8),
        end_time: hm(17),
    }
}

pub fn slot_template(service_type: ServiceType) -> Vec<SlotWindow> {
    match service_type {
        ServiceType::Service => service_slots().to_vec(),
        ServiceType::Modification => vec![modification_window()],
    }
}

pub fn service_slot(index: u8) -> Option<SlotWindow> {
    service_slots().into_iter().find(|w| w.index == index)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClosedReason {
    PastDate,
    Sunday,
    Declared {
        reason: String,
        description: Option<String>,
    },
}

impl ClosedReason {
    pub fn message(&self) -> String {
        match self {
            ClosedReason::PastDate => "past date".to_string(),
            ClosedReason::Sunday => "shop closed".to_string(),
            ClosedReason::Declared { reason, .. } => reason.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bookability {
    Open,
    Closed(ClosedReason),
}

impl Bookability {
    pub fn is_open(&self) -> bool {
        matches!(self, Bookability::Open)
    }

    pub fn is_explicitly_blocked(&self) -> bool {
        matches!(self, Bookability::Closed(ClosedReason::Declared { .. }))
    }

    pub fn reason(&self) -> Option<String> {
        match self {
            Bookability::Open => None,
            Bookability::Closed(reason) => Some(reason.message()),
        }
    }
}

/// Rules in order: past date, Sunday, declared closure.
pub fn is_bookable(
    date: NaiveDate,
    today: NaiveDate,
    declared: Option<&UnavailableDate>,
) -> Bookability {
    if date < today {
        return Bookability::Closed(ClosedReason::PastDate);
    }
    if date.weekday() == Weekday::Sun {
        return Bookability::Closed(ClosedReason::Sunday);
    }
    if let Some(closure) = declared.filter(|d| d.date == date) {
        return Bookability::Closed(ClosedReason::Declared {
            reason: closure.reason.clone(),
            description: closure.description.clone(),
        });
    }
    Bookability::Open
}
