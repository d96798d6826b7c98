// In memory implementation of the EventStore port.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Store events per stream in memory.
// - Enforce optimistic concurrency by checking the expected version under one write lock.
// - Simulate outages (`toggle_offline`), a single failed write (`fail_next_append`) and slow
//   appends (`set_delay_append_ms`) for tests.

use crate::shared::infrastructure::event_store::{EventStore, EventStoreError, LoadedStream};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

pub struct InMemoryEventStore<Event: Clone + Send + Sync + 'static> {
    inner: RwLock<HashMap<String, Vec<Event>>>,
    is_offline: AtomicBool,
    fail_next_append: AtomicBool,
    delay_append_ms: AtomicU64,
}

impl<Event: Clone + Send + Sync + 'static> Default for InMemoryEventStore<Event> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Event: Clone + Send + Sync + 'static> InMemoryEventStore<Event> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            is_offline: AtomicBool::new(false),
            fail_next_append: AtomicBool::new(false),
            delay_append_ms: AtomicU64::new(0),
        }
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Reads keep working; only the next append fails.
    pub fn fail_next_append(&self) {
        self.fail_next_append.store(true, Ordering::SeqCst);
    }

    pub fn set_delay_append_ms(&self, ms: u64) {
        self.delay_append_ms.store(ms, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), EventStoreError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(EventStoreError::Backend("Event store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<Event> EventStore<Event> for InMemoryEventStore<Event>
where
    Event: Clone + Send + Sync + 'static,
{
    async fn load(&self, stream_id: &str) -> Result<LoadedStream<Event>, EventStoreError> {
        self.ensure_online()?;
        let guard = self.inner.read().await;
        let events = guard.get(stream_id).cloned().unwrap_or_default();
        let version = events.len() as i64;
        Ok(LoadedStream { events, version })
    }

    async fn append(
        &self,
        stream_id: &str,
        expected_version: i64,
        new_events: &[Event],
    ) -> Result<(), EventStoreError> {
        self.ensure_online()?;
        if self.fail_next_append.swap(false, Ordering::SeqCst) {
            return Err(EventStoreError::Backend("Event store rejected the append".into()));
        }
        let delay = self.delay_append_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        let mut guard = self.inner.write().await;
        let entry = guard.entry(stream_id.to_string()).or_default();
        let actual = entry.len() as i64;
        if actual != expected_version {
            return Err(EventStoreError::VersionMismatch {
                expected: expected_version,
                actual,
            });
        }
        entry.extend_from_slice(new_events);
        Ok(())
    }
}
