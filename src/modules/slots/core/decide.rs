// Pure decisions for the slot ledger.
//
// Responsibilities
// - A free slot can be reserved; a slot held by someone else cannot.
// - Re-reserving a slot the appointment already holds emits nothing.
// - Only the holder can release; releasing a free slot emits nothing.

use crate::modules::slots::core::events::{
    SlotEvent,
    v1::{SlotReleasedV1, SlotReservedV1},
};
use crate::modules::slots::core::slot_id::SlotId;
use crate::modules::slots::core::state::SlotState;
use crate::shared::core::primitives::Decision;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SlotDecideError {
    #[error("slot {slot_id} is held by appointment {holder}")]
    HeldByOther { slot_id: String, holder: String },
}

pub type SlotDecision = Decision<SlotEvent, (), SlotDecideError>;

pub fn decide_reserve(
    state: &SlotState,
    slot_id: SlotId,
    appointment_id: &str,
    now: i64,
) -> SlotDecision {
    match state {
        SlotState::Free => Decision::accept(vec![SlotEvent::SlotReservedV1(SlotReservedV1 {
            slot_id: slot_id.to_string(),
            appointment_id: appointment_id.to_string(),
            reserved_at: now,
        })]),
        SlotState::Reserved { appointment_id: holder } if holder == appointment_id => {
            Decision::accept(Vec::new())
        }
        SlotState::Reserved { appointment_id: holder } => {
            Decision::reject(SlotDecideError::HeldByOther {
                slot_id: slot_id.to_string(),
                holder: holder.clone(),
            })
        }
    }
}

pub fn decide_release(
    state: &SlotState,
    slot_id: SlotId,
    appointment_id: &str,
    now: i64,
) -> SlotDecision {
    match state {
        SlotState::Free => Decision::accept(Vec::new()),
        SlotState::Reserved { appointment_id: holder } if holder == appointment_id => {
            Decision::accept(vec![SlotEvent::SlotReleasedV1(SlotReleasedV1 {
                slot_id: slot_id.to_string(),
                appointment_id: appointment_id.to_string(),
                released_at: now,
            })])
        }
        SlotState::Reserved { appointment_id: holder } => {
            Decision::reject(SlotDecideError::HeldByOther {
                slot_id: slot_id.to_string(),
                holder: holder.clone(),
            })
        }
    }
}
