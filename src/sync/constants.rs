use std::time::Duration;

pub const MESSAGE_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const ONLINE_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Upper bound on a message, counted in characters after trimming.
pub const MAX_MESSAGE_LENGTH: usize = 1000;

/// Capacity of the UI -> engine command channel.
pub const COMMAND_BUFFER: usize = 100;
