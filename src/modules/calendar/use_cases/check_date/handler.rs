use crate::modules::calendar::adapters::outbound::unavailable_dates::UnavailableDateRepository;
use crate::modules::calendar::core::policy::{Bookability, is_bookable};
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::Clock;
use chrono::NaiveDate;
use std::sync::Arc;

const MAX_RANGE_DAYS: i64 = 62;

pub struct CalendarPolicy<TRepository>
where
    TRepository: UnavailableDateRepository + 'static,
{
    repository: Arc<TRepository>,
    clock: Arc<dyn Clock>,
}

impl<TRepository> CalendarPolicy<TRepository>
where
    TRepository: UnavailableDateRepository + 'static,
{
    pub fn new(repository: Arc<TRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub async fn check(&self, date: NaiveDate) -> Result<Bookability, ApplicationError> {
        let declared = self.repository.find_by_date(date).await?;
        Ok(is_bookable(date, self.today(), declared.as_ref()))
    }

    /// Bookable dates in the inclusive range `from..=to`.
    pub async fn open_dates(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<NaiveDate>, ApplicationError> {
        if to < from {
            return Err(ApplicationError::Validation(
                "range end must not precede its start".into(),
            ));
        }
        if (to - from).num_days() > MAX_RANGE_DAYS {
            return Err(ApplicationError::Validation(format!(
                "range may span at most {MAX_RANGE_DAYS} days"
            )));
        }
        let declared = self.repository.list_in_range(from, to).await?;
        let today = self.today();
        Ok(from
            .iter_days()
            .take_while(|date| *date <= to)
            .filter(|date| {
                let closure = declared.iter().find(|d| d.date == *date);
                is_bookable(*date, today, closure).is_open()
            })
            .collect())
    }
}
