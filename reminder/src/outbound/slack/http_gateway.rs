//! Reqwest-backed Slack gateway.
//!
//! One adapter serves two ports: [`MessageSender`] over `chat.postMessage`
//! and [`BillablePeopleRetriever`] over `users.list`. It owns transport
//! details only: bearer authentication, request serialisation, HTTP error
//! mapping, and JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use super::dto::{AckDto, PostMessageRequestDto, UsersListDto};
use crate::domain::ports::{
    BillablePeopleRetriever, BillablePeopleRetrieverError, BillablePerson, Message,
    MessageSendError, MessageSender, SendOutcome,
};
use crate::domain::{PostMessageResult, Success};
use crate::outbound::http_support::{BodyReadError, endpoint, read_success_body};

const POST_MESSAGE_PATH: &str = "api/chat.postMessage";
const USERS_LIST_PATH: &str = "api/users.list";
const USERS_PAGE_LIMIT: &str = "200";
const MAX_USERS_PAGES: usize = 50;
const UNKNOWN_SLACK_ERROR: &str = "unknown_error";

/// Slack Web API adapter.
pub struct SlackHttpGateway {
    client: Client,
    base_url: Url,
    token: String,
    excluded_ids: Vec<String>,
}

impl SlackHttpGateway {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    /// ```rust,ignore
    /// let gateway = SlackHttpGateway::new(base_url, token, Duration::from_secs(30))?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            token: token.into(),
            excluded_ids: Vec::new(),
        })
    }

    /// Exclude these member identifiers from the billable roster.
    #[must_use]
    pub fn with_excluded_ids(mut self, excluded_ids: Vec<String>) -> Self {
        self.excluded_ids = excluded_ids;
        self
    }

    async fn post_message(&self, message: &Message) -> Result<(), MessageSendError> {
        let url = endpoint(&self.base_url, POST_MESSAGE_PATH)
            .map_err(|error| MessageSendError::transport(format!("invalid Slack URL: {error}")))?;
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&PostMessageRequestDto::from(message))
            .send()
            .await
            .map_err(map_send_transport_error)?;

        let body = read_success_body(response).await.map_err(|error| match error {
            BodyReadError::Transport(error) => map_send_transport_error(error),
            BodyReadError::Status(description) => MessageSendError::transport(description),
        })?;
        let ack: AckDto = serde_json::from_slice(&body).map_err(|error| {
            MessageSendError::decode(format!("invalid chat.postMessage payload: {error}"))
        })?;
        if ack.ok {
            Ok(())
        } else {
            Err(MessageSendError::rejected(
                ack.error.unwrap_or_else(|| UNKNOWN_SLACK_ERROR.to_owned()),
            ))
        }
    }

    async fn fetch_users_page(
        &self,
        cursor: Option<&str>,
    ) -> Result<UsersListDto, BillablePeopleRetrieverError> {
        let url = endpoint(&self.base_url, USERS_LIST_PATH).map_err(|error| {
            BillablePeopleRetrieverError::transport(format!("invalid Slack URL: {error}"))
        })?;
        let mut request = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .query(&[("limit", USERS_PAGE_LIMIT)]);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }
        let response = request
            .send()
            .await
            .map_err(|error| BillablePeopleRetrieverError::transport(error.to_string()))?;

        let body = read_success_body(response).await.map_err(|error| match error {
            BodyReadError::Transport(error) => {
                BillablePeopleRetrieverError::transport(error.to_string())
            }
            BodyReadError::Status(description) => {
                BillablePeopleRetrieverError::transport(description)
            }
        })?;
        let page: UsersListDto = serde_json::from_slice(&body).map_err(|error| {
            BillablePeopleRetrieverError::decode(format!("invalid users.list payload: {error}"))
        })?;
        if !page.ok {
            return Err(BillablePeopleRetrieverError::rejected(
                page.error
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_SLACK_ERROR.to_owned()),
            ));
        }
        Ok(page)
    }
}

#[async_trait]
impl MessageSender for SlackHttpGateway {
    async fn send(&self, message: &Message) -> SendOutcome {
        match self.post_message(message).await {
            Ok(()) => PostMessageResult::successful(Success),
            Err(error) => PostMessageResult::failed(error),
        }
    }
}

#[async_trait]
impl BillablePeopleRetriever for SlackHttpGateway {
    async fn retrieve_billable_people(
        &self,
    ) -> Result<Vec<BillablePerson>, BillablePeopleRetrieverError> {
        let mut people = Vec::new();
        let mut cursor: Option<String> = None;
        for _ in 0..MAX_USERS_PAGES {
            let page = self.fetch_users_page(cursor.as_deref()).await?;
            cursor = page.next_cursor().map(str::to_owned);
            people.extend(
                page.members
                    .into_iter()
                    .filter_map(|member| member.into_billable_person(&self.excluded_ids)),
            );
            if cursor.is_none() {
                debug!(count = people.len(), "retrieved billable people");
                return Ok(people);
            }
        }
        Err(BillablePeopleRetrieverError::transport(format!(
            "users.list did not finish within {MAX_USERS_PAGES} pages"
        )))
    }
}

fn map_send_transport_error(error: reqwest::Error) -> MessageSendError {
    if error.is_timeout() {
        MessageSendError::timeout(error.to_string())
    } else {
        MessageSendError::transport(error.to_string())
    }
}
