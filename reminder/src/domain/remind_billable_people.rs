//! Direct reminder fanned out to every billable person.
//!
//! Sends run one after another through [`SendReminder`]. A failed send is
//! recorded in the report and the remaining people are still reminded; nothing
//! is retried.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{BillablePeopleRetriever, MessageSendError};
use crate::domain::{Error, SendReminder, SendReminderRequest};

use super::mapping::map_people_directory_error;

/// Input for one fan-out run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemindBillablePeopleRequest {
    /// Reminder text sent to each person.
    pub text: String,
}

/// Per-person delivery summary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BillablePeopleReminderReport {
    /// Identifiers that were reminded successfully.
    pub delivered: Vec<String>,
    /// Identifiers whose reminder failed, with the failure.
    pub failed: Vec<(String, MessageSendError)>,
}

/// Domain service reminding every billable person directly.
pub struct RemindBillablePeople {
    people: Arc<dyn BillablePeopleRetriever>,
    send_reminder: SendReminder,
}

impl RemindBillablePeople {
    /// Create the service.
    pub fn new(people: Arc<dyn BillablePeopleRetriever>, send_reminder: SendReminder) -> Self {
        Self {
            people,
            send_reminder,
        }
    }

    /// Remind everyone once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::service_unavailable`] when the roster cannot be
    /// retrieved. Individual send failures are reported, not raised.
    pub async fn execute(
        &self,
        request: &RemindBillablePeopleRequest,
    ) -> Result<BillablePeopleReminderReport, Error> {
        let people = self
            .people
            .retrieve_billable_people()
            .await
            .map_err(map_people_directory_error)?;

        let mut report = BillablePeopleReminderReport::default();
        for person in people {
            let outcome = self
                .send_reminder
                .execute(&SendReminderRequest {
                    channel: person.id.clone(),
                    text: request.text.clone(),
                })
                .await;
            match outcome.into_result() {
                Ok(_) => report.delivered.push(person.id),
                Err(error) => {
                    warn!(person = %person.id, error = %error, "billable person reminder failed");
                    report.failed.push((person.id, error));
                }
            }
        }

        info!(
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "billable people reminded"
        );
        Ok(report)
    }
}
