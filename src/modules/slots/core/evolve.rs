use crate::modules::slots::core::events::SlotEvent;
use crate::modules::slots::core::state::SlotState;

pub fn evolve(state: SlotState, event: SlotEvent) -> SlotState {
    match (state, event) {
        (SlotState::Free, SlotEvent::SlotReservedV1(e)) => SlotState::Reserved {
            appointment_id: e.appointment_id,
        },
        (SlotState::Reserved { appointment_id }, SlotEvent::SlotReleasedV1(e))
            if appointment_id == e.appointment_id =>
        {
            SlotState::Free
        }
        (state, _) => state,
    }
}

#[cfg(test)]
mod slot_evolve_tests {
    use super::*;
    use crate::modules::slots::core::events::v1::{SlotReleasedV1, SlotReservedV1};
    use rstest::rstest;

    fn reserved(appointment_id: &str) -> SlotEvent {
        SlotEvent::SlotReservedV1(SlotReservedV1 {
            slot_id: "2026-10-20#2".into(),
            appointment_id: appointment_id.into(),
            reserved_at: 0,
        })
    }

    fn released(appointment_id: &str) -> SlotEvent {
        SlotEvent::SlotReleasedV1(SlotReleasedV1 {
            slot_id: "2026-10-20#2".into(),
            appointment_id: appointment_id.into(),
            released_at: 0,
        })
    }

    #[rstest]
    fn it_should_fold_reserve_release_reserve() {
        let state = [reserved("a-1"), released("a-1"), reserved("a-2")]
            .into_iter()
            .fold(SlotState::Free, evolve);
        assert_eq!(state.holder(), Some("a-2"));
    }

    #[rstest]
    fn it_should_ignore_a_release_by_a_non_holder() {
        let state = evolve(evolve(SlotState::Free, reserved("a-1")), released("a-2"));
        assert_eq!(state.holder(), Some("a-1"));
    }
}
