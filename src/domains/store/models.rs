//! Record types persisted by the campaign assistant.
//!
//! Field names match the JSON files written by earlier versions of the
//! assistant (`phonenumber`, `createdAt`), so existing data loads unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::json::Record;

/// A user tracked by the assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned id.
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phonenumber: String,
}

impl User {
    /// Build an unpersisted user; the store assigns the id on append.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
        phonenumber: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            address: address.into(),
            phonenumber: phonenumber.into(),
        }
    }
}

impl Record for User {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// One session entry in the campaign log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignLogEntry {
    /// Store-assigned id.
    #[serde(default)]
    pub id: u64,

    pub title: String,

    pub content: String,

    /// In-world session date supplied by the caller.
    pub date: DateTime<Utc>,

    /// Wall-clock creation time, stamped at append.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl CampaignLogEntry {
    /// Build an unpersisted entry stamped with the current time.
    pub fn new(title: impl Into<String>, content: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            content: content.into(),
            date,
            created_at: Utc::now(),
        }
    }

    /// Plain-text rendering used by the latest-log tool and the
    /// summarization prompt.
    pub fn display_text(&self) -> String {
        format!(
            "Title: {}\nContent: {}\nDate: {}\nCreated At: {}",
            self.title,
            self.content,
            self.date.to_rfc3339(),
            self.created_at.to_rfc3339()
        )
    }
}

impl Record for CampaignLogEntry {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}
