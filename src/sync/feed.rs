use std::sync::Arc;

use crate::common::FeedEvent;
use crate::error::ApiError;
use crate::network::ChatApi;

use super::store::ChatStore;

/// Mirrors the server's message list and online count by full-snapshot
/// polling.
#[derive(Clone)]
pub struct FeedSynchronizer {
    api: Arc<dyn ChatApi>,
    store: ChatStore,
}

impl FeedSynchronizer {
    pub fn new(api: Arc<dyn ChatApi>, store: ChatStore) -> Self {
        Self { api, store }
    }

    /// Fetches the whole feed and replaces the local mirror with it.
    pub async fn fetch_messages(&self) -> Result<usize, ApiError> {
        let messages = self.api.list_messages().await?;
        let count = messages.len();
        self.store.dispatch(FeedEvent::MessagesReplaced(messages));
        Ok(count)
    }

    pub async fn fetch_online_count(&self) -> Result<u32, ApiError> {
        let count = self.api.online_count().await?.count;
        self.store.dispatch(FeedEvent::OnlineCountReplaced(count));
        Ok(count)
    }

    /// One message poll tick. On failure the mirror is left as it was.
    pub async fn poll_messages(&self) {
        match self.fetch_messages().await {
            Ok(count) => log::trace!("Fetched {count} messages"),
            Err(err) => log::warn!("Error fetching messages: {err}"),
        }
    }

    pub async fn poll_online_count(&self) {
        match self.fetch_online_count().await {
            Ok(count) => log::trace!("Online count: {count}"),
            Err(err) => log::warn!("Error fetching online count: {err}"),
        }
    }
}
