use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::DirectoryError;
use crate::types::{Webhook, WebhookId};

/// Source of registered webhooks.
///
/// Persistence lives outside this crate; hosts implement this over their
/// own store.
#[async_trait]
pub trait WebhookDirectory: Send + Sync {
    /// Every registered webhook, ordered by id.
    async fn list(&self) -> Result<Vec<Webhook>, DirectoryError>;

    async fn get(&self, id: WebhookId) -> Result<Webhook, DirectoryError>;
}

/// In-memory directory for tests and lightweight deployments.
#[derive(Default)]
pub struct InMemoryDirectory {
    webhooks: RwLock<BTreeMap<WebhookId, Webhook>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_webhooks(webhooks: impl IntoIterator<Item = Webhook>) -> Self {
        let webhooks = webhooks.into_iter().map(|w| (w.id, w)).collect();
        Self {
            webhooks: RwLock::new(webhooks),
        }
    }

    /// Insert or replace by id.
    pub async fn insert(&self, webhook: Webhook) {
        self.webhooks.write().await.insert(webhook.id, webhook);
    }

    pub async fn remove(&self, id: WebhookId) -> Option<Webhook> {
        self.webhooks.write().await.remove(&id)
    }
}

#[async_trait]
impl WebhookDirectory for InMemoryDirectory {
    async fn list(&self) -> Result<Vec<Webhook>, DirectoryError> {
        Ok(self.webhooks.read().await.values().cloned().collect())
    }

    async fn get(&self, id: WebhookId) -> Result<Webhook, DirectoryError> {
        self.webhooks
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(DirectoryError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let directory = InMemoryDirectory::with_webhooks([
            Webhook::new(3, "c", "http://c", "k"),
            Webhook::new(1, "a", "http://a", "k"),
        ]);
        directory.insert(Webhook::new(2, "b", "http://b", "k")).await;

        let ids: Vec<i64> = directory.list().await.unwrap().iter().map(|w| w.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn insert_replaces_existing() {
        let directory = InMemoryDirectory::new();
        directory.insert(Webhook::new(1, "old", "http://a", "k")).await;
        directory.insert(Webhook::new(1, "new", "http://a", "k")).await;

        let webhook = directory.get(WebhookId(1)).await.unwrap();
        assert_eq!(webhook.name, "new");
        assert_eq!(directory.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_webhook_is_not_found() {
        let directory = InMemoryDirectory::new();
        directory.insert(Webhook::new(1, "a", "http://a", "k")).await;
        assert!(directory.remove(WebhookId(1)).await.is_some());

        assert_eq!(
            directory.get(WebhookId(1)).await,
            Err(DirectoryError::NotFound(WebhookId(1)))
        );
    }
}
