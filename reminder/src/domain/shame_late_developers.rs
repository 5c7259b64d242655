//! Scheduled channel reminder naming every late developer.
//!
//! At the trigger minute the service asks for late developers, appends a
//! mention for each one to the base message, and posts the result once to the
//! configured channel. Outside the trigger minute it does nothing at all.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, info, warn};

use crate::domain::Error;
use crate::domain::TriggerSchedule;
use crate::domain::ports::{LateDevelopersQuery, Message, MessageSender, SendOutcome};

/// Input for one scheduled run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShameLateDevelopersRequest {
    /// Base text; mentions are appended after it.
    pub message: String,
    /// Channel the reminder is posted to.
    pub channel: String,
}

/// What a scheduled run did.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum ReminderOutcome {
    /// The clock was outside the trigger minute; nothing was queried or sent.
    Skipped,
    /// One message was sent; the sender's result is handed back unchanged.
    Sent(SendOutcome),
}

/// Domain service posting the late-developer reminder.
pub struct ShameLateDevelopers {
    late_developers: Arc<dyn LateDevelopersQuery>,
    sender: Arc<dyn MessageSender>,
    clock: Arc<dyn Clock>,
    schedule: TriggerSchedule,
}

impl ShameLateDevelopers {
    /// Create the service.
    /// ```rust,ignore
    /// let service = ShameLateDevelopers::new(query, sender, clock, TriggerSchedule::default());
    /// ```
    pub fn new(
        late_developers: Arc<dyn LateDevelopersQuery>,
        sender: Arc<dyn MessageSender>,
        clock: Arc<dyn Clock>,
        schedule: TriggerSchedule,
    ) -> Self {
        Self {
            late_developers,
            sender,
            clock,
            schedule,
        }
    }

    /// Run once for the current instant.
    ///
    /// # Errors
    ///
    /// Returns the late-developer query's error when it cannot reach its
    /// upstream services. Send failures are not errors; they are carried in
    /// [`ReminderOutcome::Sent`].
    pub async fn execute(
        &self,
        request: &ShameLateDevelopersRequest,
    ) -> Result<ReminderOutcome, Error> {
        let now = self.clock.utc();
        if !self.schedule.is_due(now) {
            debug!(%now, "outside trigger minute; skipping late developer reminder");
            return Ok(ReminderOutcome::Skipped);
        }

        let late_ids = self.late_developers.find_late_developers().await?;
        let text = compose_message(&request.message, &late_ids);
        info!(
            channel = %request.channel,
            late_count = late_ids.len(),
            "posting late developer reminder"
        );

        let outcome = self
            .sender
            .send(&Message::to_channel(request.channel.as_str(), text))
            .await;
        outcome.on_failure(|error| {
            warn!(channel = %request.channel, error = %error, "late developer reminder was not delivered");
        });
        Ok(ReminderOutcome::Sent(outcome))
    }
}

/// Append `\n• <@id>` to `base` for each identifier, in order.
fn compose_message(base: &str, late_ids: &[String]) -> String {
    late_ids.iter().fold(base.to_owned(), |mut text, id| {
        text.push_str("\n• <@");
        text.push_str(id);
        text.push('>');
        text
    })
}
