//! Driven port for the time-tracking service.
//!
//! The domain owns the period and developer shapes so the late-developer rule
//! stays adapter-agnostic.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::define_port_error;

/// Inclusive date range a timesheet is evaluated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimesheetPeriod {
    /// First day of the period.
    pub from: NaiveDate,
    /// Last day of the period, inclusive.
    pub to: NaiveDate,
}

/// Time-tracking identity plus the hours logged for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct Developer {
    /// Time-tracking user identifier.
    pub id: u64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address, matched against the chat roster.
    pub email: String,
    /// Whether the time-tracking account is active.
    pub is_active: bool,
    /// Hours logged within the requested period.
    pub logged_hours: f64,
}

impl Developer {
    /// Return whether any time was logged for the period.
    pub fn has_submitted(&self) -> bool {
        self.logged_hours > 0.0
    }
}

define_port_error! {
    /// Errors surfaced while calling the time-tracking service.
    pub enum DeveloperRetrieverError {
        /// Network transport failed or the service answered a non-success
        /// HTTP status.
        Transport { message: String } =>
            "time tracking transport failed: {message}",
        /// The call exceeded the client timeout.
        Timeout { message: String } =>
            "time tracking timeout: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "time tracking response decode failed: {message}",
    }
}

/// Port for retrieving developers and their timesheet status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeveloperRetriever: Send + Sync {
    /// Return every developer with hours logged over `period`.
    async fn retrieve_developers(
        &self,
        period: &TimesheetPeriod,
    ) -> Result<Vec<Developer>, DeveloperRetrieverError>;
}
