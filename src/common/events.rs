use super::types::{Message, Session};

/// Sự kiện thay đổi trạng thái, áp dụng tuần tự qua `ChatStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Lifecycle(LifecycleEvent),
    Session(SessionEvent),
    Feed(FeedEvent),
    Composer(ComposerEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    InitStarted,
    InitSucceeded,
    /// Carries the user-facing startup error text.
    InitFailed(String),
    Disposed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Registered(Session),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// Full snapshot from a message poll.
    MessagesReplaced(Vec<Message>),
    OnlineCountReplaced(u32),
    /// Optimistic copy of a message this client just sent.
    MessageAppended(Message),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerEvent {
    DraftEdited(String),
    SendStarted,
    SendSucceeded,
    SendFailed(String),
    SendFinished,
}

impl From<LifecycleEvent> for ChatEvent {
    fn from(event: LifecycleEvent) -> Self {
        Self::Lifecycle(event)
    }
}

impl From<SessionEvent> for ChatEvent {
    fn from(event: SessionEvent) -> Self {
        Self::Session(event)
    }
}

impl From<FeedEvent> for ChatEvent {
    fn from(event: FeedEvent) -> Self {
        Self::Feed(event)
    }
}

impl From<ComposerEvent> for ChatEvent {
    fn from(event: ComposerEvent) -> Self {
        Self::Composer(event)
    }
}
