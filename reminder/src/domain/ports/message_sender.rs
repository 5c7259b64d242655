//! Driven port for posting messages to the chat service.
//!
//! The sender performs exactly one outbound call per message and reports the
//! outcome through [`PostMessageResult`]; remote rejection is an ordinary
//! failure value, never a Rust `Err`.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{PostMessageResult, Success};

/// Outgoing chat message.
///
/// Absent fields are omitted from the wire payload, which is distinct from
/// sending an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Channel or user identifier to post into.
    pub channel: Option<String>,
    /// Message body.
    pub text: Option<String>,
}

impl Message {
    /// Build a message with both channel and text present.
    pub fn to_channel(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: Some(channel.into()),
            text: Some(text.into()),
        }
    }
}

define_port_error! {
    /// Reasons a message could not be posted.
    pub enum MessageSendError {
        /// The chat service answered `ok: false`; `message` is its error text
        /// verbatim.
        Rejected { message: String } => "{message}",
        /// Network transport failed or the service answered a non-success
        /// HTTP status.
        Transport { message: String } =>
            "message transport failed: {message}",
        /// The call exceeded the client timeout.
        Timeout { message: String } =>
            "message send timed out: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "message response decode failed: {message}",
    }
}

impl MessageSendError {
    /// Text describing the failure; for rejections this is exactly the
    /// remote-supplied error.
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected { message }
            | Self::Transport { message }
            | Self::Timeout { message }
            | Self::Decode { message } => message,
        }
    }
}

/// Result type produced by every [`MessageSender`].
pub type SendOutcome = PostMessageResult<Success, MessageSendError>;

/// Port for posting one message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Post `message` once and report the outcome.
    async fn send(&self, message: &Message) -> SendOutcome;
}

/// Fixture sender that accepts every message without contacting anything.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureMessageSender;

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl MessageSender for FixtureMessageSender {
    async fn send(&self, _message: &Message) -> SendOutcome {
        PostMessageResult::successful(Success)
    }
}
