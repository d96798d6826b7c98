// In memory store of declared closures.
//
// Responsibilities
// - Keep one entry per date in a sorted map so range reads come out in date order.

use crate::modules::calendar::adapters::outbound::unavailable_dates::UnavailableDateRepository;
use crate::modules::calendar::core::unavailable_date::UnavailableDate;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryUnavailableDates {
    by_date: RwLock<BTreeMap<NaiveDate, UnavailableDate>>,
    is_offline: AtomicBool,
}

impl InMemoryUnavailableDates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> anyhow::Result<()> {
        if self.is_offline.load(Ordering::SeqCst) {
            anyhow::bail!("Unavailable dates repository offline");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UnavailableDateRepository for InMemoryUnavailableDates {
    async fn upsert(&self, entry: UnavailableDate) -> anyhow::Result<UnavailableDate> {
        self.ensure_online()?;
        let mut guard = self.by_date.write().await;
        let stored = match guard.get(&entry.date) {
            Some(existing) => UnavailableDate {
                reason: entry.reason,
                description: entry.description,
                ..existing.clone()
            },
            None => entry,
        };
        guard.insert(stored.date, stored.clone());
        Ok(stored)
    }

    async fn remove(&self, id: &str) -> anyhow::Result<bool> {
        self.ensure_online()?;
        let mut guard = self.by_date.write().await;
        let before = guard.len();
        guard.retain(|_, entry| entry.id != id);
        Ok(guard.len() != before)
    }

    async fn find_by_date(&self, date: NaiveDate) -> anyhow::Result<Option<UnavailableDate>> {
        self.ensure_online()?;
        Ok(self.by_date.read().await.get(&date).cloned())
    }

    async fn list_in_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> anyhow::Result<Vec<UnavailableDate>> {
        self.ensure_online()?;
        if to < from {
            return Ok(Vec::new());
        }
        Ok(self
            .by_date
            .read()
            .await
            .range(from..=to)
            .map(|(_, entry)| entry.clone())
            .collect())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<UnavailableDate>> {
        self.ensure_online()?;
        Ok(self.by_date.read().await.values().cloned().collect())
    }
}
