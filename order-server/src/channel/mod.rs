//! Messaging channel adapter
//!
//! The pipeline only depends on the [`MessageChannel`] trait; the concrete
//! transport (a Bot-API-style HTTP interface) lives in [`http`]. Tests
//! substitute in-memory fakes.

pub mod http;
pub mod types;

pub use http::HttpChannel;
pub use types::{
    CallbackQuery, ChatRef, IncomingMessage, InlineButton, Keyboard, OutboundDocument, Peer,
    ReplyButton, SubmissionEnvelope, SubmissionItem, SubmissionPayload, Update,
};

use async_trait::async_trait;
use thiserror::Error;

/// Channel delivery/transport error types
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The recipient blocked the channel or the chat no longer exists
    #[error("Recipient unavailable: {0}")]
    Forbidden(String),

    /// The channel API rejected the call
    #[error("Channel API error {code}: {description}")]
    Api { code: i64, description: String },

    /// Network-level failure
    #[error("Transport error: {0}")]
    Transport(String),
}

pub type ChannelResult<T> = Result<T, ChannelError>;

/// Outbound messaging capability consumed by the pipeline
#[async_trait]
pub trait MessageChannel: Send + Sync {
    /// Long-poll the next batch of inbound updates
    async fn poll_updates(&self, offset: i64, timeout_secs: u64) -> ChannelResult<Vec<Update>>;

    /// Send a text message, optionally replacing the recipient's keyboard
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> ChannelResult<()>;

    /// Send a document with a caption, optionally with inline controls
    async fn send_document(&self, chat_id: i64, doc: OutboundDocument) -> ChannelResult<()>;

    /// Replace the caption of a previously sent document message
    async fn edit_caption(&self, chat_id: i64, message_id: i64, caption: &str)
    -> ChannelResult<()>;

    /// Acknowledge an inline-button press
    async fn answer_callback(&self, callback_id: &str, text: &str, alert: bool)
    -> ChannelResult<()>;
}
