use crate::data_url::DataUrl;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique id for images and messages.
pub fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A citation returned by a search-grounded chat turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingLink {
    pub uri: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub text: String,
    pub timestamp: OffsetDateTime,
    pub grounding: Vec<GroundingLink>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into(), Vec::new())
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text.into(), Vec::new())
    }

    pub fn model_with_grounding(text: impl Into<String>, grounding: Vec<GroundingLink>) -> Self {
        Self::new(Role::Model, text.into(), grounding)
    }

    fn new(role: Role, text: String, grounding: Vec<GroundingLink>) -> Self {
        Self {
            id: next_id(),
            role,
            text,
            timestamp: OffsetDateTime::now_utc(),
            grounding,
        }
    }
}

/// One generated variant of the room. Never mutated after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomImage {
    pub id: u64,
    pub url: DataUrl,
    pub style_name: String,
    pub description: Option<String>,
}

impl RoomImage {
    pub fn new(url: DataUrl, style_name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: next_id(),
            url,
            style_name: style_name.into(),
            description,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Generating,
    Editing,
    Error,
}

impl ProcessingStatus {
    /// Whether a gateway call is in flight. `Error` never blocks input.
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Generating | Self::Editing)
    }
}
