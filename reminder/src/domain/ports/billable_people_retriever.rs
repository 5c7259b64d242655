//! Driven port for the chat roster ("people directory").
//!
//! Adapters own the exclusion rules for the roster they query: deactivated,
//! bot and otherwise excluded accounts never reach the domain.

use async_trait::async_trait;

use super::define_port_error;

/// A roster member eligible for timesheet reminders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillablePerson {
    /// Chat user identifier, usable as a direct-message channel.
    pub id: String,
    /// Email address used to match time-tracking accounts.
    pub email: String,
}

define_port_error! {
    /// Errors surfaced while listing billable people.
    pub enum BillablePeopleRetrieverError {
        /// Network transport failed or the service answered a non-success
        /// HTTP status.
        Transport { message: String } =>
            "people directory transport failed: {message}",
        /// The service answered `ok: false`.
        Rejected { message: String } =>
            "people directory rejected request: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "people directory response decode failed: {message}",
    }
}

/// Port for listing billable people.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillablePeopleRetriever: Send + Sync {
    /// Return every billable person, in roster order.
    async fn retrieve_billable_people(
        &self,
    ) -> Result<Vec<BillablePerson>, BillablePeopleRetrieverError>;
}

/// Fixture directory returning a fixed roster.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Clone, Default)]
pub struct FixtureBillablePeopleRetriever {
    people: Vec<BillablePerson>,
}

#[cfg(any(test, feature = "test-support"))]
impl FixtureBillablePeopleRetriever {
    /// Build a fixture that always returns `people`.
    pub fn new(people: Vec<BillablePerson>) -> Self {
        Self { people }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl BillablePeopleRetriever for FixtureBillablePeopleRetriever {
    async fn retrieve_billable_people(
        &self,
    ) -> Result<Vec<BillablePerson>, BillablePeopleRetrieverError> {
        Ok(self.people.clone())
    }
}
