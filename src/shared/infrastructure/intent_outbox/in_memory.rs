use crate::shared::infrastructure::intent_outbox::{DomainOutbox, OutboxError, OutboxRow};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryDomainOutbox {
    pub rows: Mutex<Vec<OutboxRow>>,
    seen: Mutex<HashSet<(String, i64, String, String)>>,
    is_offline: AtomicBool,
}

impl InMemoryDomainOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub async fn event_types(&self) -> Vec<String> {
        self.rows
            .lock()
            .await
            .iter()
            .map(|row| row.event_type.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl DomainOutbox for InMemoryDomainOutbox {
    async fn enqueue(&self, row: OutboxRow) -> Result<(), OutboxError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(OutboxError::Transient("Outbox offline".into()));
        }
        // One append may notify several recipients of the same event type.
        let recipient = row
            .payload
            .get("recipient")
            .map(|r| r.to_string())
            .unwrap_or_default();
        let key = (
            row.stream_id.clone(),
            row.stream_version,
            row.event_type.clone(),
            recipient,
        );
        {
            let mut seen = self.seen.lock().await;
            if !seen.insert(key) {
                return Err(OutboxError::Duplicate {
                    stream_id: row.stream_id,
                    stream_version: row.stream_version,
                    event_type: row.event_type,
                });
            }
        }
        self.rows.lock().await.push(row);
        Ok(())
    }
}
