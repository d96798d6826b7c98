use crate::modules::calendar::core::unavailable_date::UnavailableDate;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Admin-maintained closures, keyed by date (one entry per date).
#[async_trait]
pub trait UnavailableDateRepository: Send + Sync {
    /// Insert, or replace reason/description of the entry already holding `entry.date`.
    async fn upsert(&self, entry: UnavailableDate) -> anyhow::Result<UnavailableDate>;
    async fn remove(&self, id: &str) -> anyhow::Result<bool>;
    async fn find_by_date(&self, date: NaiveDate) -> anyhow::Result<Option<UnavailableDate>>;
    async fn list_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<UnavailableDate>>;
    async fn list_all(&self) -> anyhow::Result<Vec<UnavailableDate>>;
}
