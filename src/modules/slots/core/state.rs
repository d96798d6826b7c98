#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Free,
    Reserved {
        appointment_id: String,
    },
}

impl SlotState {
    pub fn holder(&self) -> Option<&str> {
        match self {
            SlotState::Free => None,
            SlotState::Reserved { appointment_id } => Some(appointment_id),
        }
    }
}
