// Per-key async mutual exclusion with a bounded wait.
//
// Requests touching the same aggregate key (appointment, task, employee timer) are
// serialized here; different keys never contend. Waiting longer than the configured
// bound fails with LockTimeout instead of queueing indefinitely.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{key} is busy, retry shortly")]
pub struct LockTimeout {
    pub key: String,
}

pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
    max_wait: Duration,
}

pub struct KeyGuard {
    _guard: OwnedMutexGuard<()>,
}

impl KeyedLocks {
    pub fn new(max_wait: Duration) -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
            max_wait,
        }
    }

    pub async fn acquire(&self, key: &str) -> Result<KeyGuard, LockTimeout> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|p| p.into_inner());
            // Drop entries nobody holds or waits on so the map does not grow per key forever.
            locks.retain(|_, l| Arc::strong_count(l) > 1);
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        match tokio::time::timeout(self.max_wait, lock.lock_owned()).await {
            Ok(guard) => Ok(KeyGuard { _guard: guard }),
            Err(_) => {
                tracing::warn!(key, "lock wait exceeded");
                Err(LockTimeout {
                    key: key.to_string(),
                })
            }
        }
    }
}

impl Default for KeyedLocks {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}
