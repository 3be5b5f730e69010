//! Snapshot types and their transition functions.
//!
//! Every mutation of client state goes through [`ChatSnapshot::apply`], which
//! takes the current snapshot and one event and returns the next snapshot.

use std::mem;

use crate::common::{
    ChatEvent, ComposerEvent, FeedEvent, LifecycleEvent, Message, Session, SessionEvent,
};

use super::composer::{DraftRejection, validate_draft};

/// `Idle -> Initializing -> Ready -> Disposed`, with `Failed` as the terminal
/// state of a startup that did not make it to `Ready`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Initializing,
    Ready,
    Failed(String),
    Disposed,
}

impl Phase {
    pub fn apply(self, event: LifecycleEvent) -> Self {
        match (self, event) {
            (Phase::Idle, LifecycleEvent::InitStarted) => Phase::Initializing,
            (Phase::Initializing, LifecycleEvent::InitSucceeded) => Phase::Ready,
            (Phase::Initializing, LifecycleEvent::InitFailed(message)) => Phase::Failed(message),
            (_, LifecycleEvent::Disposed) => Phase::Disposed,
            (phase, event) => {
                log::debug!("Ignoring {event:?} in phase {phase:?}");
                phase
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub session: Option<Session>,
}

impl SessionState {
    /// A session is set once and never replaced.
    pub fn apply(self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::Registered(session) if self.session.is_none() => Self {
                session: Some(session),
            },
            SessionEvent::Registered(session) => {
                log::warn!("Session already established; ignoring {}", session.session_id);
                self
            }
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.username.as_str())
    }
}

/// Local mirror of the server feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub messages: Vec<Message>,
    pub online_count: u32,
}

impl FeedState {
    pub fn apply(mut self, event: FeedEvent) -> Self {
        match event {
            FeedEvent::MessagesReplaced(messages) => self.messages = messages,
            FeedEvent::OnlineCountReplaced(count) => self.online_count = count,
            // No de-duplication: the next poll replaces the whole list anyway.
            FeedEvent::MessageAppended(message) => self.messages.push(message),
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerState {
    pub draft: String,
    pub sending: bool,
    pub last_error: Option<String>,
}

impl ComposerState {
    pub fn apply(mut self, event: ComposerEvent) -> Self {
        match event {
            // The input is locked while a send is in flight.
            ComposerEvent::DraftEdited(_) if self.sending => {}
            ComposerEvent::DraftEdited(text) => self.draft = text,
            ComposerEvent::SendStarted => {
                self.sending = true;
                self.last_error = None;
            }
            ComposerEvent::SendSucceeded => self.draft.clear(),
            ComposerEvent::SendFailed(message) => self.last_error = Some(message),
            ComposerEvent::SendFinished => self.sending = false,
        }
        self
    }

    /// Characters in the raw draft, as shown by the counter.
    pub fn character_count(&self) -> usize {
        self.draft.chars().count()
    }

    /// Follows the send rule, so padding around a short text never turns the
    /// counter red while the send control is enabled.
    pub fn is_over_limit(&self) -> bool {
        matches!(
            validate_draft(&self.draft),
            Err(DraftRejection::TooLong { .. })
        )
    }

    /// Whether the send control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.sending && validate_draft(&self.draft).is_ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSnapshot {
    pub phase: Phase,
    pub session: SessionState,
    pub feed: FeedState,
    pub composer: ComposerState,
}

impl ChatSnapshot {
    pub fn apply(mut self, event: ChatEvent) -> Self {
        match event {
            ChatEvent::Lifecycle(event) => self.phase = mem::take(&mut self.phase).apply(event),
            ChatEvent::Session(event) => {
                self.session = mem::take(&mut self.session).apply(event)
            }
            ChatEvent::Feed(event) => self.feed = mem::take(&mut self.feed).apply(event),
            ChatEvent::Composer(event) => {
                self.composer = mem::take(&mut self.composer).apply(event)
            }
        }
        self
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }
}
