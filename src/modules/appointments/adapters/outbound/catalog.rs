use crate::modules::appointments::core::estimates::ModificationItem;
use async_trait::async_trait;

#[async_trait]
pub trait ModificationCatalog: Send + Sync {
    async fn find(&self, id: &str) -> anyhow::Result<Option<ModificationItem>>;
}
