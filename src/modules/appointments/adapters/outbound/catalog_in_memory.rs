use crate::modules::appointments::adapters::outbound::catalog::ModificationCatalog;
use crate::modules::appointments::core::estimates::ModificationItem;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryModificationCatalog {
    items: RwLock<HashMap<String, ModificationItem>>,
    is_offline: AtomicBool,
}

impl InMemoryModificationCatalog {
    pub fn with_items(items: impl IntoIterator<Item = ModificationItem>) -> Self {
        Self {
            items: RwLock::new(items.into_iter().map(|item| (item.id.clone(), item)).collect()),
            is_offline: AtomicBool::new(false),
        }
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl ModificationCatalog for InMemoryModificationCatalog {
    async fn find(&self, id: &str) -> anyhow::Result<Option<ModificationItem>> {
        if self.is_offline.load(Ordering::SeqCst) {
            anyhow::bail!("Modification catalog offline");
        }
        Ok(self.items.read().await.get(id).cloned())
    }
}
