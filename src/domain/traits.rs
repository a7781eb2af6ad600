//! # Domain Traits
//!
//! Abstract interface for the chat side of the bot.
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;

/// Abstract interface for a Chat Provider (e.g., Matrix, Slack, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room
    async fn send_message(&self, content: &str) -> Result<(), String>;

    /// Get the current room ID
    fn room_id(&self) -> String;

    /// One-to-one conversation with the bot, as opposed to a group room
    fn is_direct(&self) -> bool;
}
