//! Direct reminder to a single recipient.

use std::sync::Arc;

use crate::domain::ports::{Message, MessageSender, SendOutcome};

/// Input for one direct reminder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SendReminderRequest {
    /// User or channel identifier receiving the reminder.
    pub channel: String,
    /// Reminder text, sent unchanged.
    pub text: String,
}

/// Domain service forwarding one reminder to the message sender.
#[derive(Clone)]
pub struct SendReminder {
    sender: Arc<dyn MessageSender>,
}

impl SendReminder {
    /// Create the service.
    pub fn new(sender: Arc<dyn MessageSender>) -> Self {
        Self { sender }
    }

    /// Send `request` once and hand back the sender's result.
    pub async fn execute(&self, request: &SendReminderRequest) -> SendOutcome {
        self.sender
            .send(&Message::to_channel(
                request.channel.as_str(),
                request.text.as_str(),
            ))
            .await
    }
}
