//! Reqwest-backed Harvest gateway implementing [`DeveloperRetriever`].
//!
//! Two paginated endpoints are read per call: `users` for identities and
//! `time_entries` for the requested period. Hours are summed per user and
//! attached to each developer.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{TimeEntriesPageDto, TimeEntryDto, UserDto, UsersPageDto, hours_by_user};
use crate::domain::ports::{Developer, DeveloperRetriever, DeveloperRetrieverError, TimesheetPeriod};
use crate::outbound::http_support::{BodyReadError, endpoint, read_success_body};

const USERS_PATH: &str = "api/v2/users";
const TIME_ENTRIES_PATH: &str = "api/v2/time_entries";
const ACCOUNT_ID_HEADER: &str = "Harvest-Account-Id";
const DEFAULT_USER_AGENT: &str = "timesheet-reminder/0.1";
const MAX_PAGES: u32 = 100;

/// Harvest v2 API adapter.
pub struct HarvestHttpGateway {
    client: Client,
    base_url: Url,
    token: String,
    account_id: Option<String>,
}

impl HarvestHttpGateway {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url,
            token: token.into(),
            account_id: None,
        })
    }

    /// Send `Harvest-Account-Id` with every request.
    #[must_use]
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    async fn fetch_users(&self) -> Result<Vec<UserDto>, DeveloperRetrieverError> {
        let mut users = Vec::new();
        let mut page = None;
        for _ in 0..MAX_PAGES {
            let body: UsersPageDto = self.get_page(USERS_PATH, &[], page).await?;
            users.extend(body.users);
            page = body.next_page;
            if page.is_none() {
                return Ok(users);
            }
        }
        Err(too_many_pages(USERS_PATH))
    }

    async fn fetch_time_entries(
        &self,
        period: &TimesheetPeriod,
    ) -> Result<Vec<TimeEntryDto>, DeveloperRetrieverError> {
        let range = [
            ("from", period.from.format("%Y-%m-%d").to_string()),
            ("to", period.to.format("%Y-%m-%d").to_string()),
        ];
        let mut entries = Vec::new();
        let mut page = None;
        for _ in 0..MAX_PAGES {
            let body: TimeEntriesPageDto = self.get_page(TIME_ENTRIES_PATH, &range, page).await?;
            entries.extend(body.time_entries);
            page = body.next_page;
            if page.is_none() {
                return Ok(entries);
            }
        }
        Err(too_many_pages(TIME_ENTRIES_PATH))
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        page: Option<u32>,
    ) -> Result<T, DeveloperRetrieverError> {
        let url = endpoint(&self.base_url, path).map_err(|error| {
            DeveloperRetrieverError::transport(format!("invalid Harvest URL: {error}"))
        })?;
        let mut request = self.client.get(url).bearer_auth(&self.token);
        if let Some(account_id) = &self.account_id {
            request = request.header(ACCOUNT_ID_HEADER, account_id);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(page) = page {
            request = request.query(&[("page", page)]);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let body = read_success_body(response).await.map_err(|error| match error {
            BodyReadError::Transport(error) => map_transport_error(error),
            BodyReadError::Status(description) => {
                DeveloperRetrieverError::transport(format!("{path} answered {description}"))
            }
        })?;
        serde_json::from_slice(&body).map_err(|error| {
            DeveloperRetrieverError::decode(format!("invalid {path} payload: {error}"))
        })
    }
}

#[async_trait]
impl DeveloperRetriever for HarvestHttpGateway {
    async fn retrieve_developers(
        &self,
        period: &TimesheetPeriod,
    ) -> Result<Vec<Developer>, DeveloperRetrieverError> {
        let users = self.fetch_users().await?;
        let entries = self.fetch_time_entries(period).await?;
        let hours = hours_by_user(&entries);
        debug!(
            users = users.len(),
            time_entries = entries.len(),
            "retrieved harvest timesheet data"
        );
        Ok(users
            .into_iter()
            .map(|user| user.into_developer(&hours))
            .collect())
    }
}

fn map_transport_error(error: reqwest::Error) -> DeveloperRetrieverError {
    if error.is_timeout() {
        DeveloperRetrieverError::timeout(error.to_string())
    } else {
        DeveloperRetrieverError::transport(error.to_string())
    }
}

fn too_many_pages(path: &str) -> DeveloperRetrieverError {
    DeveloperRetrieverError::transport(format!("{path} did not finish within {MAX_PAGES} pages"))
}
