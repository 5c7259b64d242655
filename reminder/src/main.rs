//! `timesheet-reminder` entry point: one invocation per scheduler tick.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Context, Result, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use timesheet_reminder::ReminderSettings;
use timesheet_reminder::domain::{
    LateDevelopersFinder, RemindBillablePeople, RemindBillablePeopleRequest, ReminderOutcome,
    SendReminder, SendReminderRequest, ShameLateDevelopers, ShameLateDevelopersRequest,
};
use timesheet_reminder::outbound::harvest::HarvestHttpGateway;
use timesheet_reminder::outbound::slack::SlackHttpGateway;

/// `timesheet-reminder` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "timesheet-reminder",
    about = "Remind developers on Slack to submit their Harvest timesheets",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Post the late-developer reminder if this is the trigger minute.
    Shame {
        /// Channel override; falls back to `REMINDER_CHANNEL`.
        #[arg(long, value_name = "id")]
        channel: Option<String>,
        /// Base message override; falls back to `REMINDER_MESSAGE`.
        #[arg(long, value_name = "text")]
        message: Option<String>,
    },
    /// Send one direct reminder.
    Remind {
        /// User or channel id to remind.
        #[arg(long, value_name = "id")]
        channel: String,
        /// Reminder text; falls back to `REMINDER_MESSAGE`.
        #[arg(long, value_name = "text")]
        text: Option<String>,
    },
    /// Send a direct reminder to every billable Slack member.
    RemindBillable {
        /// Reminder text; falls back to `REMINDER_MESSAGE`.
        #[arg(long, value_name = "text")]
        text: Option<String>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = ReminderSettings::load_from_iter([OsString::from("timesheet-reminder")])
        .map_err(|error| eyre!("failed to load reminder settings: {error}"))?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(args.command, settings))
}

async fn run(command: Command, settings: ReminderSettings) -> Result<()> {
    let slack = Arc::new(build_slack_gateway(&settings)?);
    match command {
        Command::Shame { channel, message } => {
            let harvest = Arc::new(build_harvest_gateway(&settings)?);
            let offset = settings.utc_offset()?;
            let clock = Arc::new(DefaultClock);
            let finder = LateDevelopersFinder::new(harvest, slack.clone(), clock.clone(), offset);
            let service =
                ShameLateDevelopers::new(Arc::new(finder), slack, clock, settings.schedule()?);
            let request = ShameLateDevelopersRequest {
                message: message.unwrap_or_else(|| settings.message().to_owned()),
                channel: match channel {
                    Some(channel) => channel,
                    None => settings.channel()?.to_owned(),
                },
            };
            match service.execute(&request).await? {
                ReminderOutcome::Skipped => {
                    info!("not the trigger minute; nothing sent");
                    Ok(())
                }
                ReminderOutcome::Sent(result) => result
                    .into_result()
                    .map(|_| ())
                    .map_err(|error| eyre!("late developer reminder failed: {error}")),
            }
        }
        Command::Remind { channel, text } => {
            let request = SendReminderRequest {
                channel,
                text: text.unwrap_or_else(|| settings.message().to_owned()),
            };
            SendReminder::new(slack)
                .execute(&request)
                .await
                .into_result()
                .map(|_| ())
                .map_err(|error| eyre!("reminder to {} failed: {error}", request.channel))
        }
        Command::RemindBillable { text } => {
            let service = RemindBillablePeople::new(slack.clone(), SendReminder::new(slack));
            let report = service
                .execute(&RemindBillablePeopleRequest {
                    text: text.unwrap_or_else(|| settings.message().to_owned()),
                })
                .await?;
            if report.failed.is_empty() {
                Ok(())
            } else {
                Err(eyre!(
                    "{} of {} billable reminders failed",
                    report.failed.len(),
                    report.failed.len() + report.delivered.len()
                ))
            }
        }
    }
}

fn build_slack_gateway(settings: &ReminderSettings) -> Result<SlackHttpGateway> {
    let gateway = SlackHttpGateway::new(
        settings.slack_base_url()?,
        settings.slack_token()?,
        settings.request_timeout(),
    )
    .wrap_err("failed to build Slack client")?;
    Ok(gateway.with_excluded_ids(settings.slack_excluded_ids()))
}

fn build_harvest_gateway(settings: &ReminderSettings) -> Result<HarvestHttpGateway> {
    let gateway = HarvestHttpGateway::new(
        settings.harvest_base_url()?,
        settings.harvest_token()?,
        settings.request_timeout(),
    )
    .wrap_err("failed to build Harvest client")?;
    Ok(match settings.harvest_account_id.as_deref() {
        Some(account_id) => gateway.with_account_id(account_id),
        None => gateway,
    })
}
