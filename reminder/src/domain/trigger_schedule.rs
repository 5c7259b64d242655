//! Exact-minute trigger gate for scheduled reminders.
//!
//! The reminder fires only when the current instant, viewed at the schedule's
//! UTC offset, falls on the configured day of month, hour and minute. There is
//! no catch-up: an invocation one minute late is a no-op for that period.

use chrono::{DateTime, Datelike, FixedOffset, Offset, Timelike, Utc};

use crate::domain::Error;

const DEFAULT_DAY_OF_MONTH: u32 = 1;
const DEFAULT_HOUR: u32 = 13;
const DEFAULT_MINUTE: u32 = 30;

/// Day-of-month, hour and minute at which a reminder may fire.
///
/// # Examples
/// ```
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use timesheet_reminder::domain::TriggerSchedule;
///
/// let schedule = TriggerSchedule::new(1, 13, 30, FixedOffset::east_opt(0).expect("utc"))?;
/// let now = Utc.with_ymd_and_hms(2019, 3, 1, 13, 30, 0).single().expect("valid time");
/// assert!(schedule.is_due(now));
/// # Ok::<(), timesheet_reminder::domain::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerSchedule {
    day_of_month: u32,
    hour: u32,
    minute: u32,
    offset: FixedOffset,
}

impl TriggerSchedule {
    /// Build a validated schedule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when any component is out of range.
    pub fn new(day_of_month: u32, hour: u32, minute: u32, offset: FixedOffset) -> Result<Self, Error> {
        if !(1..=31).contains(&day_of_month) {
            return Err(Error::invalid_request(format!(
                "trigger day of month must be within 1..=31, got {day_of_month}"
            )));
        }
        if hour > 23 {
            return Err(Error::invalid_request(format!(
                "trigger hour must be within 0..=23, got {hour}"
            )));
        }
        if minute > 59 {
            return Err(Error::invalid_request(format!(
                "trigger minute must be within 0..=59, got {minute}"
            )));
        }
        Ok(Self {
            day_of_month,
            hour,
            minute,
            offset,
        })
    }

    /// Return whether `now` falls exactly on the trigger minute.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&self.offset);
        local.day() == self.day_of_month && local.hour() == self.hour && local.minute() == self.minute
    }

    /// Day of month, hour and minute, in that order.
    pub fn components(&self) -> (u32, u32, u32) {
        (self.day_of_month, self.hour, self.minute)
    }

    /// Offset the schedule is evaluated at.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl Default for TriggerSchedule {
    fn default() -> Self {
        Self {
            day_of_month: DEFAULT_DAY_OF_MONTH,
            hour: DEFAULT_HOUR,
            minute: DEFAULT_MINUTE,
            offset: Utc.fix(),
        }
    }
}
