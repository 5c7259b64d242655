//! Timesheet reminders for Slack, driven by Harvest timesheet data.
//!
//! The domain decides when a reminder fires and what it says; outbound
//! adapters talk to Slack and Harvest; settings wire the two together.

pub mod domain;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use settings::ReminderSettings;
