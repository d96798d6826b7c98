use async_graphql::{Context, ErrorExtensions, Object, Result as GqlResult};
use chrono::NaiveDate;

use crate::modules::slots::use_cases::available_slots::handler::{
    DateAvailability, ModificationAvailability,
};
use crate::shell::state::AppState;

#[derive(Default)]
pub struct AvailabilityQuery;

#[Object]
impl AvailabilityQuery {
    async fn available_slots(
        &self,
        context: &Context<'_>,
        date: NaiveDate,
    ) -> GqlResult<DateAvailability> {
        let state = context.data_unchecked::<AppState>();
        state
            .availability
            .available_slots(date)
            .await
            .map_err(|e| e.extend())
    }

    async fn modification_availability(
        &self,
        context: &Context<'_>,
        date: NaiveDate,
    ) -> GqlResult<ModificationAvailability> {
        let state = context.data_unchecked::<AppState>();
        state
            .availability
            .modification_availability(date)
            .await
            .map_err(|e| e.extend())
    }

    async fn open_dates(
        &self,
        context: &Context<'_>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> GqlResult<Vec<NaiveDate>> {
        let state = context.data_unchecked::<AppState>();
        state
            .calendar
            .open_dates(from, to)
            .await
            .map_err(|e| e.extend())
    }
}
