pub mod api;
pub mod client;
#[cfg(test)]
pub mod mock;
pub mod transport;

pub use api::ChatApi;
pub use client::HttpChatApi;
