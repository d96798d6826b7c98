// Slot identity: a date plus the index of a Service window on that date.
//
// Textual form is "YYYY-MM-DD#N", which is what customers send back when booking.

use crate::modules::calendar::core::policy::service_slot;
use crate::shared::core::errors::ApplicationError;
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    pub date: NaiveDate,
    pub index: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotIdError {
    #[error("malformed slot id '{0}'")]
    Malformed(String),
    #[error("slot {slot_id} is not part of the service template")]
    OutsideTemplate { slot_id: String },
    #[error("slot {slot_id} does not belong to {date}")]
    DateMismatch { slot_id: String, date: NaiveDate },
}

impl SlotId {
    pub fn new(date: NaiveDate, index: u8) -> Result<Self, SlotIdError> {
        let slot_id = Self { date, index };
        if service_slot(index).is_none() {
            return Err(SlotIdError::OutsideTemplate {
                slot_id: slot_id.to_string(),
            });
        }
        Ok(slot_id)
    }

    pub fn parse(raw: &str) -> Result<Self, SlotIdError> {
        let malformed = || SlotIdError::Malformed(raw.to_string());
        let (date, index) = raw.trim().split_once('#').ok_or_else(malformed)?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| malformed())?;
        let index = index.parse::<u8>().map_err(|_| malformed())?;
        Self::new(date, index)
    }

    /// Parse and require the slot to sit on `date`.
    pub fn parse_for(raw: &str, date: NaiveDate) -> Result<Self, SlotIdError> {
        let slot_id = Self::parse(raw)?;
        if slot_id.date != date {
            return Err(SlotIdError::DateMismatch {
                slot_id: slot_id.to_string(),
                date,
            });
        }
        Ok(slot_id)
    }

    pub fn stream_id(&self) -> String {
        format!("Slot-{}-{}", self.date.format("%Y-%m-%d"), self.index)
    }
}

impl From<SlotIdError> for ApplicationError {
    fn from(error: SlotIdError) -> Self {
        ApplicationError::InvalidSlot(error.to_string())
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.date.format("%Y-%m-%d"), self.index)
    }
}
