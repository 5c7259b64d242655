//! Reminder configuration loaded via OrthoConfig.
//!
//! Values come from `REMINDER_*` environment variables or a config file.
//! Optional fields fall back to the defaults below; secrets have no default
//! and are validated when the gateway that needs them is built.

use std::time::Duration;

use chrono::FixedOffset;
use ortho_config::OrthoConfig;
use reqwest::Url;
use serde::Deserialize;

use crate::domain::{Error, TriggerSchedule};

const DEFAULT_SLACK_BASE_URL: &str = "https://slack.com/";
const DEFAULT_HARVEST_BASE_URL: &str = "https://api.harvestapp.com/";
const DEFAULT_MESSAGE: &str = "Please make sure your timesheet is submitted today by 13:30.";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

/// Configuration values for the reminder binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "REMINDER")]
pub struct ReminderSettings {
    /// Slack Web API base address.
    pub slack_base_url: Option<String>,
    /// Slack bot token.
    pub slack_token: Option<String>,
    /// Comma-separated Slack member ids never treated as billable.
    pub slack_excluded_ids: Option<String>,
    /// Harvest API base address.
    pub harvest_base_url: Option<String>,
    /// Harvest personal access token.
    pub harvest_token: Option<String>,
    /// Harvest account id sent as `Harvest-Account-Id`.
    pub harvest_account_id: Option<String>,
    /// Channel the late-developer reminder is posted to.
    pub channel: Option<String>,
    /// Base reminder text.
    pub message: Option<String>,
    /// Day of month the late-developer reminder fires on.
    pub trigger_day: Option<u32>,
    /// Hour the late-developer reminder fires at.
    pub trigger_hour: Option<u32>,
    /// Minute the late-developer reminder fires at.
    pub trigger_minute: Option<u32>,
    /// Offset from UTC, in minutes, used for the trigger and "today".
    pub utc_offset_minutes: Option<i32>,
    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl ReminderSettings {
    /// Slack base address, falling back to the public API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when the configured value is not a URL.
    pub fn slack_base_url(&self) -> Result<Url, Error> {
        parse_url("slack_base_url", self.slack_base_url.as_deref(), DEFAULT_SLACK_BASE_URL)
    }

    /// Harvest base address, falling back to the public API.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when the configured value is not a URL.
    pub fn harvest_base_url(&self) -> Result<Url, Error> {
        parse_url(
            "harvest_base_url",
            self.harvest_base_url.as_deref(),
            DEFAULT_HARVEST_BASE_URL,
        )
    }

    /// Slack token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when no token is configured.
    pub fn slack_token(&self) -> Result<&str, Error> {
        required("slack_token", self.slack_token.as_deref())
    }

    /// Harvest token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when no token is configured.
    pub fn harvest_token(&self) -> Result<&str, Error> {
        required("harvest_token", self.harvest_token.as_deref())
    }

    /// Reminder channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when no channel is configured.
    pub fn channel(&self) -> Result<&str, Error> {
        required("channel", self.channel.as_deref())
    }

    /// Slack member ids excluded from the billable roster.
    pub fn slack_excluded_ids(&self) -> Vec<String> {
        self.slack_excluded_ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// Base reminder text, falling back to the default reminder.
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or(DEFAULT_MESSAGE)
    }

    /// Offset used to evaluate the trigger and the timesheet period.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when the offset exceeds ±18 hours.
    pub fn utc_offset(&self) -> Result<FixedOffset, Error> {
        let minutes = self.utc_offset_minutes.unwrap_or(0);
        if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(Error::invalid_request(format!(
                "utc_offset_minutes must be within ±{MAX_UTC_OFFSET_MINUTES}, got {minutes}"
            )));
        }
        FixedOffset::east_opt(minutes * 60)
            .ok_or_else(|| Error::invalid_request(format!("invalid utc_offset_minutes {minutes}")))
    }

    /// Trigger schedule built from the configured components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when a component or the offset is
    /// out of range.
    pub fn schedule(&self) -> Result<TriggerSchedule, Error> {
        let defaults = TriggerSchedule::default();
        let (default_day, default_hour, default_minute) = defaults.components();
        TriggerSchedule::new(
            self.trigger_day.unwrap_or(default_day),
            self.trigger_hour.unwrap_or(default_hour),
            self.trigger_minute.unwrap_or(default_minute),
            self.utc_offset()?,
        )
    }

    /// Per-request HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .max(1),
        )
    }
}

fn parse_url(field: &str, configured: Option<&str>, default: &str) -> Result<Url, Error> {
    let raw = configured.unwrap_or(default);
    Url::parse(raw).map_err(|error| {
        Error::invalid_request(format!("{field} must be a valid URL ({raw}): {error}"))
    })
}

fn required<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, Error> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::invalid_request(format!("{field} must be configured")))
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and defaults.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARIABLES: [&str; 13] = [
        "REMINDER_SLACK_BASE_URL",
        "REMINDER_SLACK_TOKEN",
        "REMINDER_SLACK_EXCLUDED_IDS",
        "REMINDER_HARVEST_BASE_URL",
        "REMINDER_HARVEST_TOKEN",
        "REMINDER_HARVEST_ACCOUNT_ID",
        "REMINDER_CHANNEL",
        "REMINDER_MESSAGE",
        "REMINDER_TRIGGER_DAY",
        "REMINDER_TRIGGER_HOUR",
        "REMINDER_TRIGGER_MINUTE",
        "REMINDER_UTC_OFFSET_MINUTES",
        "REMINDER_REQUEST_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> ReminderSettings {
        ReminderSettings::load_from_iter([OsString::from("timesheet-reminder")])
            .expect("config should load")
    }

    fn cleared_except(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARIABLES
            .iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_are_used_when_missing() {
        let _guard = lock_env(cleared_except(&[]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.slack_base_url().expect("url").as_str(),
            DEFAULT_SLACK_BASE_URL
        );
        assert_eq!(
            settings.harvest_base_url().expect("url").as_str(),
            DEFAULT_HARVEST_BASE_URL
        );
        assert_eq!(settings.message(), DEFAULT_MESSAGE);
        assert_eq!(settings.schedule().expect("schedule"), TriggerSchedule::default());
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert!(settings.slack_excluded_ids().is_empty());
        assert!(settings.slack_token().is_err());
        assert!(settings.channel().is_err());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(cleared_except(&[
            ("REMINDER_SLACK_TOKEN", "xxxx-xxxxxxxxx-xxxx"),
            ("REMINDER_SLACK_EXCLUDED_IDS", "W999BOSS, USLACKBOT ,"),
            ("REMINDER_CHANNEL", "CH123456"),
            ("REMINDER_MESSAGE", "TIMESHEETS ARE GOOD YO!"),
            ("REMINDER_TRIGGER_DAY", "5"),
            ("REMINDER_TRIGGER_HOUR", "10"),
            ("REMINDER_TRIGGER_MINUTE", "0"),
            ("REMINDER_UTC_OFFSET_MINUTES", "60"),
            ("REMINDER_REQUEST_TIMEOUT_SECS", "5"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.slack_token().expect("token"), "xxxx-xxxxxxxxx-xxxx");
        assert_eq!(settings.slack_excluded_ids(), vec!["W999BOSS", "USLACKBOT"]);
        assert_eq!(settings.channel().expect("channel"), "CH123456");
        assert_eq!(settings.message(), "TIMESHEETS ARE GOOD YO!");
        let offset = FixedOffset::east_opt(3600).expect("offset");
        assert_eq!(
            settings.schedule().expect("schedule"),
            TriggerSchedule::new(5, 10, 0, offset).expect("schedule")
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn invalid_values_are_reported() {
        let _guard = lock_env(cleared_except(&[
            ("REMINDER_SLACK_BASE_URL", "not a url"),
            ("REMINDER_TRIGGER_MINUTE", "75"),
            ("REMINDER_SLACK_TOKEN", "   "),
        ]));

        let settings = load_from_empty_args();
        assert!(settings.slack_base_url().is_err());
        assert!(settings.schedule().is_err());
        assert!(settings.slack_token().is_err());
    }
}
