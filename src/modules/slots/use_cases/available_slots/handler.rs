// Availability resolver: calendar policy combined with live slot state.
//
// Nothing here is cached. Every call re-reads the declared closures and each slot
// stream, so a slot freed by a cancellation shows up on the very next read.

use crate::modules::calendar::adapters::outbound::unavailable_dates::UnavailableDateRepository;
use crate::modules::calendar::core::policy::{modification_window, service_slots};
use crate::modules::calendar::use_cases::check_date::handler::CalendarPolicy;
use crate::modules::slots::core::events::SlotEvent;
use crate::modules::slots::core::slot_id::SlotId;
use crate::modules::slots::use_cases::slot_ledger::handler::SlotLedger;
use crate::shared::core::errors::ApplicationError;
use crate::shared::infrastructure::event_store::EventStore;
use async_graphql::SimpleObject;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct Slot {
    pub slot_id: String,
    pub index: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub reserved_by_appointment_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct DateAvailability {
    pub date: NaiveDate,
    pub is_open: bool,
    pub is_explicitly_blocked: bool,
    pub reason: Option<String>,
    /// Free slots only.
    pub slots: Vec<Slot>,
    pub slots_remaining: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
pub struct ModificationAvailability {
    pub date: NaiveDate,
    pub is_open: bool,
    pub reason: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

pub struct AvailabilityResolver<TRepository, TEventStore>
where
    TRepository: UnavailableDateRepository + 'static,
    TEventStore: EventStore<SlotEvent> + 'static,
{
    calendar: Arc<CalendarPolicy<TRepository>>,
    ledger: Arc<SlotLedger<TEventStore>>,
}

impl<TRepository, TEventStore> AvailabilityResolver<TRepository, TEventStore>
where
    TRepository: UnavailableDateRepository + 'static,
    TEventStore: EventStore<SlotEvent> + 'static,
{
    pub fn new(calendar: Arc<CalendarPolicy<TRepository>>, ledger: Arc<SlotLedger<TEventStore>>) -> Self {
        Self { calendar, ledger }
    }

    /// Every template slot with its current holder, regardless of whether the date is open.
    pub async fn day_schedule(&self, date: NaiveDate) -> Result<Vec<Slot>, ApplicationError> {
        let mut slots = Vec::with_capacity(3);
        for window in service_slots() {
            let slot_id = SlotId::new(date, window.index)?;
            let state = self.ledger.state_of(slot_id).await?;
            slots.push(Slot {
                slot_id: slot_id.to_string(),
                index: window.index,
                start_time: window.start_time,
                end_time: window.end_time,
                reserved_by_appointment_id: state.holder().map(str::to_string),
            });
        }
        Ok(slots)
    }

    pub async fn available_slots(&self, date: NaiveDate) -> Result<DateAvailability, ApplicationError> {
        let bookability = self.calendar.check(date).await?;
        let slots = if bookability.is_open() {
            self.day_schedule(date)
                .await?
                .into_iter()
                .filter(|slot| slot.reserved_by_appointment_id.is_none())
                .collect()
        } else {
            Vec::new()
        };
        tracing::debug!(%date, free = slots.len(), "availability resolved");
        Ok(DateAvailability {
            date,
            is_open: bookability.is_open(),
            is_explicitly_blocked: bookability.is_explicitly_blocked(),
            reason: bookability.reason(),
            slots_remaining: slots.len(),
            slots,
        })
    }

    /// Modification work takes the whole day and may overlap, so only the day itself matters.
    pub async fn modification_availability(
        &self,
        date: NaiveDate,
    ) -> Result<ModificationAvailability, ApplicationError> {
        let bookability = self.calendar.check(date).await?;
        let window = modification_window();
        Ok(ModificationAvailability {
            date,
            is_open: bookability.is_open(),
            reason: bookability.reason(),
            start_time: window.start_time,
            end_time: window.end_time,
        })
    }
}

#[cfg(test)]
mod availability_resolver_tests {
    use super::*;
    use crate::modules::calendar::adapters::outbound::unavailable_dates_in_memory::InMemoryUnavailableDates;
    use crate::modules::calendar::core::unavailable_date::UnavailableDate;
    use crate::shared::core::primitives::FixedClock;
    use crate::shared::infrastructure::event_store::in_memory::InMemoryEventStore;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    type Resolver = AvailabilityResolver<InMemoryUnavailableDates, InMemoryEventStore<SlotEvent>>;

    struct Context {
        dates: Arc<InMemoryUnavailableDates>,
        ledger: Arc<SlotLedger<InMemoryEventStore<SlotEvent>>>,
        resolver: Resolver,
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[fixture]
    fn context() -> Context {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
        ));
        let dates = Arc::new(InMemoryUnavailableDates::new());
        let calendar = Arc::new(CalendarPolicy::new(dates.clone(), clock.clone()));
        let ledger = Arc::new(SlotLedger::new(
            Arc::new(InMemoryEventStore::<SlotEvent>::new()),
            clock,
        ));
        let resolver = AvailabilityResolver::new(calendar, ledger.clone());
        Context {
            dates,
            ledger,
            resolver,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_all_three_slots_on_an_empty_tuesday(context: Context) {
        let availability = context.resolver.available_slots(day(20)).await.unwrap();
        assert!(availability.is_open);
        assert_eq!(availability.slots_remaining, 3);
        let ids: Vec<_> = availability.slots.iter().map(|s| s.slot_id.as_str()).collect();
        assert_eq!(ids, vec!["2026-10-20#1", "2026-10-20#2", "2026-10-20#3"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_hide_reserved_slots_and_show_them_again_once_released(context: Context) {
        context.ledger.reserve_slot(day(20), "2026-10-20#2", "a-1").await.unwrap();
        let availability = context.resolver.available_slots(day(20)).await.unwrap();
        assert_eq!(availability.slots_remaining, 2);
        assert!(availability.slots.iter().all(|s| s.index != 2));

        context.ledger.release_slot(day(20), "2026-10-20#2", "a-1").await.unwrap();
        let availability = context.resolver.available_slots(day(20)).await.unwrap();
        assert_eq!(availability.slots_remaining, 3);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_a_declared_closure_with_its_reason(context: Context) {
        context
            .dates
            .upsert(UnavailableDate {
                id: "ud-1".into(),
                date: day(21),
                reason: "Holiday".into(),
                description: None,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        let availability = context.resolver.available_slots(day(21)).await.unwrap();
        assert!(!availability.is_open);
        assert!(availability.is_explicitly_blocked);
        assert_eq!(availability.reason.as_deref(), Some("Holiday"));
        assert!(availability.slots.is_empty());
    }

    #[rstest]
    #[case(18, "shop closed")]
    #[case(15, "past date")]
    #[tokio::test]
    async fn it_should_close_the_modification_day_by_calendar_rules(
        context: Context,
        #[case] d: u32,
        #[case] reason: &str,
    ) {
        let availability = context.resolver.modification_availability(day(d)).await.unwrap();
        assert!(!availability.is_open);
        assert_eq!(availability.reason.as_deref(), Some(reason));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_modification_days_open_when_service_slots_are_full(context: Context) {
        for index in 1..=3 {
            let slot = format!("2026-10-20#{index}");
            context.ledger.reserve_slot(day(20), &slot, &format!("a-{index}")).await.unwrap();
        }
        assert_eq!(context.resolver.available_slots(day(20)).await.unwrap().slots_remaining, 0);
        assert!(context.resolver.modification_availability(day(20)).await.unwrap().is_open);
    }
}
