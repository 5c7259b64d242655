//! DTOs for the Slack Web API.
//!
//! Requests serialise absent fields by omitting the key. Responses decode into
//! these transport DTOs first, then map into domain records in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::ports::{BillablePerson, Message};

/// The built-in Slackbot account, which `users.list` reports as a regular
/// member.
const SLACKBOT_ID: &str = "USLACKBOT";

#[derive(Debug, Serialize)]
pub(super) struct PostMessageRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) channel: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) text: Option<&'a str>,
}

impl<'a> From<&'a Message> for PostMessageRequestDto<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            channel: message.channel.as_deref(),
            text: message.text.as_deref(),
        }
    }
}

/// Envelope shared by every Slack Web API response.
#[derive(Debug, Deserialize)]
pub(super) struct AckDto {
    pub(super) ok: bool,
    #[serde(default)]
    pub(super) error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UsersListDto {
    pub(super) ok: bool,
    #[serde(default)]
    pub(super) error: Option<String>,
    #[serde(default)]
    pub(super) members: Vec<MemberDto>,
    #[serde(default)]
    pub(super) response_metadata: Option<ResponseMetadataDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponseMetadataDto {
    #[serde(default)]
    pub(super) next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct MemberDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) deleted: bool,
    #[serde(default)]
    pub(super) is_bot: bool,
    #[serde(default)]
    pub(super) is_app_user: bool,
    #[serde(default)]
    pub(super) profile: ProfileDto,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ProfileDto {
    #[serde(default)]
    pub(super) email: Option<String>,
}

impl UsersListDto {
    /// Cursor for the next page, if Slack reported a non-empty one.
    pub(super) fn next_cursor(&self) -> Option<&str> {
        self.response_metadata
            .as_ref()
            .and_then(|metadata| metadata.next_cursor.as_deref())
            .filter(|cursor| !cursor.is_empty())
    }
}

impl MemberDto {
    /// Map into a billable person, or `None` when the member is excluded.
    pub(super) fn into_billable_person(self, excluded_ids: &[String]) -> Option<BillablePerson> {
        if self.deleted
            || self.is_bot
            || self.is_app_user
            || self.id == SLACKBOT_ID
            || excluded_ids.iter().any(|excluded| *excluded == self.id)
        {
            return None;
        }
        let email = self.profile.email.filter(|email| !email.trim().is_empty())?;
        Some(BillablePerson { id: self.id, email })
    }
}
