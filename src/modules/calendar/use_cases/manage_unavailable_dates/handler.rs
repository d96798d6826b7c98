// Admin maintenance of declared closures.

use crate::modules::calendar::adapters::outbound::unavailable_dates::UnavailableDateRepository;
use crate::modules::calendar::core::unavailable_date::UnavailableDate;
use crate::shared::core::errors::ApplicationError;
use crate::shared::core::primitives::Clock;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

pub struct ManageUnavailableDatesHandler<TRepository>
where
    TRepository: UnavailableDateRepository + 'static,
{
    repository: Arc<TRepository>,
    clock: Arc<dyn Clock>,
}

impl<TRepository> ManageUnavailableDatesHandler<TRepository>
where
    TRepository: UnavailableDateRepository + 'static,
{
    pub fn new(repository: Arc<TRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn add(
        &self,
        date: NaiveDate,
        reason: String,
        description: Option<String>,
    ) -> Result<UnavailableDate, ApplicationError> {
        let reason = reason.trim().to_string();
        if reason.is_empty() {
            return Err(ApplicationError::Validation("reason is required".into()));
        }
        let stored = self
            .repository
            .upsert(UnavailableDate {
                id: Uuid::now_v7().to_string(),
                date,
                reason,
                description: description.filter(|d| !d.trim().is_empty()),
                created_at: self.clock.now(),
            })
            .await?;
        tracing::info!(date = %stored.date, reason = %stored.reason, "date marked unavailable");
        Ok(stored)
    }

    pub async fn remove(&self, id: &str) -> Result<(), ApplicationError> {
        if !self.repository.remove(id).await? {
            return Err(ApplicationError::not_found("unavailable date", id));
        }
        tracing::info!(id, "unavailable date removed");
        Ok(())
    }

    pub async fn list(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<UnavailableDate>, ApplicationError> {
        let listed = match (from, to) {
            (Some(from), Some(to)) => self.repository.list_in_range(from, to).await?,
            (Some(from), None) => self.repository.list_in_range(from, NaiveDate::MAX).await?,
            (None, Some(to)) => self.repository.list_in_range(NaiveDate::MIN, to).await?,
            (None, None) => self.repository.list_all().await?,
        };
        Ok(listed)
    }
}
