//! Client-side synchronization engine: session, feed polling, composer and
//! the lifecycle that ties them together.

pub mod composer;
pub mod constants;
pub mod feed;
pub mod lifecycle;
pub mod session;
pub mod state;
pub mod store;
pub mod tasks;

pub use lifecycle::{ChatHandle, LifecycleController};
pub use state::{ChatSnapshot, ComposerState, Phase};
