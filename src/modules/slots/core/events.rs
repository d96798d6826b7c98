// Slot ledger events. One stream per (date, slot index).
//
// Timestamps are epoch milliseconds.

pub mod v1 {
    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
    pub struct SlotReservedV1 {
        pub slot_id: String,
        pub appointment_id: String,
        pub reserved_at: i64,
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
    pub struct SlotReleasedV1 {
        pub slot_id: String,
        pub appointment_id: String,
        pub released_at: i64,
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum SlotEvent {
    SlotReservedV1(v1::SlotReservedV1),
    SlotReleasedV1(v1::SlotReleasedV1),
}
