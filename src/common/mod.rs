pub mod commands;
pub mod events;
pub mod types;

pub use commands::ChatCommand;
pub use events::{ChatEvent, ComposerEvent, FeedEvent, LifecycleEvent, SessionEvent};
pub use types::{Message, Session};
