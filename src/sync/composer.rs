use std::sync::Arc;

use crate::common::{ComposerEvent, FeedEvent, Message};
use crate::error::send_error_message;
use crate::network::ChatApi;

use super::constants::MAX_MESSAGE_LENGTH;
use super::state::ChatSnapshot;
use super::store::ChatStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftRejection {
    Empty,
    TooLong { length: usize },
}

/// Returns the trimmed text that would be sent, or why nothing can be sent.
pub fn validate_draft(draft: &str) -> Result<&str, DraftRejection> {
    let text = draft.trim();
    if text.is_empty() {
        return Err(DraftRejection::Empty);
    }
    let length = text.chars().count();
    if length > MAX_MESSAGE_LENGTH {
        return Err(DraftRejection::TooLong { length });
    }
    Ok(text)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing reached the transport.
    Skipped(SkipReason),
    Sent(Message),
    /// Carries the text that was put into `last_error`.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Invalid(DraftRejection),
    AlreadySending,
}

/// Validates and sends outgoing messages.
#[derive(Clone)]
pub struct Composer {
    api: Arc<dyn ChatApi>,
    store: ChatStore,
}

impl Composer {
    pub fn new(api: Arc<dyn ChatApi>, store: ChatStore) -> Self {
        Self { api, store }
    }

    pub fn edit_draft(&self, text: impl Into<String>) {
        self.store.dispatch(ComposerEvent::DraftEdited(text.into()));
    }

    /// Sends the trimmed `draft` as `username`.
    ///
    /// Invalid drafts and overlapping sends are no-ops. On success the server's
    /// copy is appended to the feed right away and the draft is cleared; on
    /// failure the draft is kept and `last_error` is set. `sending` is reset in
    /// both cases, including when this future is dropped mid-flight.
    pub async fn submit(&self, username: &str, draft: &str) -> SubmitOutcome {
        let text = match validate_draft(draft) {
            Ok(text) => text,
            Err(rejection) => {
                log::debug!("Draft not submittable: {rejection:?}");
                return SubmitOutcome::Skipped(SkipReason::Invalid(rejection));
            }
        };

        let claimed = self.store.dispatch_if(
            |snapshot: &ChatSnapshot| !snapshot.composer.sending,
            ComposerEvent::SendStarted,
        );
        if !claimed {
            return SubmitOutcome::Skipped(SkipReason::AlreadySending);
        }
        let _sending = SendingGuard { store: &self.store };

        match self.api.send_message(username, text).await {
            Ok(message) => {
                log::info!("Message sent by {username}");
                self.store
                    .dispatch(FeedEvent::MessageAppended(message.clone()));
                self.store.dispatch(ComposerEvent::SendSucceeded);
                SubmitOutcome::Sent(message)
            }
            Err(err) => {
                log::warn!("Error sending message: {err}");
                let text = send_error_message(&err);
                self.store.dispatch(ComposerEvent::SendFailed(text.clone()));
                SubmitOutcome::Failed(text)
            }
        }
    }
}

/// Clears the `sending` flag when the send scope ends.
struct SendingGuard<'a> {
    store: &'a ChatStore,
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.store.dispatch(ComposerEvent::SendFinished);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::common::types::{OnlineCountResponse, RegisterResponse};
    use crate::error::ApiError;
    use crate::network::mock::{Call, MockChatApi, message};

    fn setup() -> (Arc<MockChatApi>, ChatStore, Composer) {
        let api = Arc::new(MockChatApi::new());
        let store = ChatStore::new();
        let composer = Composer::new(api.clone(), store.clone());
        (api, store, composer)
    }

    #[test]
    fn validation_boundaries() {
        assert_eq!(validate_draft(""), Err(DraftRejection::Empty));
        assert_eq!(validate_draft(" \n\t "), Err(DraftRejection::Empty));
        assert_eq!(validate_draft("  hello  "), Ok("hello"));

        let exact = "a".repeat(MAX_MESSAGE_LENGTH);
        assert_eq!(validate_draft(&exact), Ok(exact.as_str()));

        let over = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        assert_eq!(
            validate_draft(&over),
            Err(DraftRejection::TooLong { length: 1001 })
        );

        // Surrounding whitespace does not count against the limit.
        let padded = format!("   {exact}   ");
        assert!(validate_draft(&padded).is_ok());
    }

    #[tokio::test]
    async fn successful_submit_trims_appends_and_clears() {
        let (api, store, composer) = setup();
        let returned = message(Some(11), "Guest42", "hello");
        api.push_send(Ok(returned.clone()));
        composer.edit_draft("  hello  ");

        let outcome = composer.submit("Guest42", "  hello  ").await;

        assert_eq!(outcome, SubmitOutcome::Sent(returned.clone()));
        assert_eq!(
            api.calls(),
            vec![Call::SendMessage {
                username: "Guest42".into(),
                message_text: "hello".into(),
            }]
        );
        let snapshot = store.snapshot();
        assert_eq!(snapshot.feed.messages.last(), Some(&returned));
        assert_eq!(snapshot.composer.draft, "");
        assert!(!snapshot.composer.sending);
        assert_eq!(snapshot.composer.last_error, None);
    }

    #[tokio::test]
    async fn failed_submit_keeps_draft_and_sets_error() {
        let (api, store, composer) = setup();
        api.push_send(Err(ApiError::Status {
            status: 400,
            message: Some("Message text cannot be empty.".into()),
        }));
        composer.edit_draft("retry me");

        let outcome = composer.submit("Guest42", "retry me").await;

        let expected = "Ошибка при отправке сообщения: Message text cannot be empty.".to_string();
        assert_eq!(outcome, SubmitOutcome::Failed(expected.clone()));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.composer.draft, "retry me");
        assert_eq!(snapshot.composer.last_error, Some(expected));
        assert!(!snapshot.composer.sending);
        assert!(snapshot.feed.messages.is_empty());
    }

    #[tokio::test]
    async fn invalid_drafts_never_reach_transport() {
        let (api, store, composer) = setup();
        let too_long = "x".repeat(MAX_MESSAGE_LENGTH + 1);

        for draft in ["", "    ", too_long.as_str()] {
            let outcome = composer.submit("Guest42", draft).await;
            assert!(matches!(
                outcome,
                SubmitOutcome::Skipped(SkipReason::Invalid(_))
            ));
        }

        assert!(api.calls().is_empty());
        assert_eq!(store.snapshot().composer.last_error, None);
        assert!(!store.snapshot().composer.sending);
    }

    #[tokio::test]
    async fn second_submit_while_sending_is_skipped() {
        let (api, store, composer) = setup();
        store.dispatch(ComposerEvent::SendStarted);

        let outcome = composer.submit("Guest42", "hello").await;

        assert_eq!(outcome, SubmitOutcome::Skipped(SkipReason::AlreadySending));
        assert!(api.calls().is_empty());
        // The in-flight send still owns the flag.
        assert!(store.snapshot().composer.sending);
    }

    /// Transport whose send never completes.
    struct HangingApi;

    #[async_trait]
    impl ChatApi for HangingApi {
        async fn register(&self, _: &str) -> Result<RegisterResponse, ApiError> {
            unreachable!()
        }
        async fn heartbeat(&self, _: &str, _: &str) -> Result<(), ApiError> {
            unreachable!()
        }
        async fn online_count(&self) -> Result<OnlineCountResponse, ApiError> {
            unreachable!()
        }
        async fn list_messages(&self) -> Result<Vec<Message>, ApiError> {
            unreachable!()
        }
        async fn send_message(&self, _: &str, _: &str) -> Result<Message, ApiError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_an_inflight_submit_resets_sending() {
        let store = ChatStore::new();
        let composer = Composer::new(Arc::new(HangingApi), store.clone());

        let send = composer.submit("Guest42", "hello");
        let timed_out = tokio::time::timeout(Duration::from_secs(60), send).await;

        assert!(timed_out.is_err());
        assert!(!store.snapshot().composer.sending);
    }
}
