// Shared test fixture for the BookAppointment command, parsed from its JSON transport shape.

use crate::modules::appointments::use_cases::book_appointment::handler::BookAppointment;
use crate::shared::core::primitives::ServiceType;
use chrono::NaiveDate;

pub struct BookAppointmentBuilder {
    inner: BookAppointment,
}

impl Default for BookAppointmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl BookAppointmentBuilder {
    pub fn new() -> Self {
        let inner = serde_json::from_str(include_str!("json/book_appointment.json")).unwrap();
        Self { inner }
    }

    pub fn customer_id(mut self, v: impl Into<String>) -> Self {
        self.inner.customer_id = v.into();
        self
    }

    pub fn date(mut self, v: NaiveDate) -> Self {
        self.inner.date = v;
        self
    }

    pub fn slot_id(mut self, v: impl Into<String>) -> Self {
        self.inner.slot_id = Some(v.into());
        self
    }

    /// A modification request: no slot, the given catalog items.
    pub fn modification(mut self, item_ids: &[&str]) -> Self {
        self.inner.service_type = ServiceType::Modification;
        self.inner.slot_id = None;
        self.inner.modification_item_ids = item_ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn build(self) -> BookAppointment {
        self.inner
    }
}

#[cfg(test)]
mod book_appointment_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_parse_the_json_fixture() {
        let built = BookAppointmentBuilder::default().build();
        assert_eq!(built.customer_id, "c-1");
        assert_eq!(built.service_type, ServiceType::Service);
        assert_eq!(built.slot_id.as_deref(), Some("2026-10-20#2"));
        assert!(built.modification_item_ids.is_empty());
    }

    #[rstest]
    fn it_should_drop_the_slot_for_a_modification() {
        let built = BookAppointmentBuilder::new().modification(&["m-1"]).build();
        assert_eq!(built.service_type, ServiceType::Modification);
        assert_eq!(built.slot_id, None);
        assert_eq!(built.modification_item_ids, vec!["m-1"]);
    }
}
