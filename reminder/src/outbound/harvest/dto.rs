//! DTOs for decoding Harvest v2 JSON responses.

use std::collections::HashMap;

use serde::Deserialize;

use crate::domain::ports::Developer;

#[derive(Debug, Deserialize)]
pub(super) struct UsersPageDto {
    #[serde(default)]
    pub(super) users: Vec<UserDto>,
    #[serde(default)]
    pub(super) next_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    pub(super) id: u64,
    #[serde(default)]
    pub(super) first_name: String,
    #[serde(default)]
    pub(super) last_name: String,
    #[serde(default)]
    pub(super) email: String,
    #[serde(default)]
    pub(super) is_active: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct TimeEntriesPageDto {
    #[serde(default)]
    pub(super) time_entries: Vec<TimeEntryDto>,
    #[serde(default)]
    pub(super) next_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TimeEntryDto {
    pub(super) user: TimeEntryUserDto,
    #[serde(default)]
    pub(super) hours: f64,
}

#[derive(Debug, Deserialize)]
pub(super) struct TimeEntryUserDto {
    pub(super) id: u64,
}

/// Sum logged hours per user identifier.
pub(super) fn hours_by_user(entries: &[TimeEntryDto]) -> HashMap<u64, f64> {
    entries.iter().fold(HashMap::new(), |mut totals, entry| {
        *totals.entry(entry.user.id).or_insert(0.0) += entry.hours;
        totals
    })
}

impl UserDto {
    pub(super) fn into_developer(self, hours: &HashMap<u64, f64>) -> Developer {
        Developer {
            id: self.id,
            logged_hours: hours.get(&self.id).copied().unwrap_or(0.0),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            is_active: self.is_active,
        }
    }
}
