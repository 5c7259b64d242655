//! Domain primitives, ports and use cases.
//!
//! Purpose: decide when a timesheet reminder fires, who it names, and what it
//! says, without knowing which chat or time-tracking service sits behind the
//! ports. Adapters live in `crate::outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - PostMessageResult / Success: result value returned by message senders.
//! - TriggerSchedule: exact-minute gate for scheduled runs.
//! - ShameLateDevelopers, SendReminder, RemindBillablePeople: use cases.
//! - LateDevelopersFinder: joins time-tracking data to the chat roster.

pub mod error;
pub mod ports;

mod late_developers;
mod mapping;
mod post_message_result;
mod remind_billable_people;
mod send_reminder;
mod shame_late_developers;
mod trigger_schedule;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::late_developers::LateDevelopersFinder;
pub use self::post_message_result::{PostMessageResult, Success};
pub use self::remind_billable_people::{
    BillablePeopleReminderReport, RemindBillablePeople, RemindBillablePeopleRequest,
};
pub use self::send_reminder::{SendReminder, SendReminderRequest};
pub use self::shame_late_developers::{
    ReminderOutcome, ShameLateDevelopers, ShameLateDevelopersRequest,
};
pub use self::trigger_schedule::TriggerSchedule;
