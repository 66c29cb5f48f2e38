use crate::data_url::DataUrl;
use crate::types::{ChatMessage, GroundingLink};
use async_trait::async_trait;
use std::time::Duration;

// ============================================
// Error Types
// ============================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("No API key configured. Set GEMINI_API_KEY.")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Service error {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Could not decode response: {0}")]
    Decode(String),

    #[error("Response contained no image")]
    NoImageReturned,

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Text and citations from a single chat turn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChatReply {
    pub text: String,
    pub grounding: Vec<GroundingLink>,
}

// ============================================
// Gateway Trait
// ============================================

/// The three exchanges with the generative service.
///
/// Each call is single-shot: no retry, no streaming, no caching. Callers
/// await a call exactly once per user action.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait DesignGateway {
    /// Re-render the room photo in a style, keeping its layout.
    async fn regenerate(&self, image: &DataUrl, style_prompt: &str) -> GatewayResult<DataUrl>;

    /// Apply a free-form instruction to an image.
    async fn edit(&self, image: &DataUrl, instruction: &str) -> GatewayResult<DataUrl>;

    /// One search-grounded consultant reply.
    async fn chat_turn(
        &self,
        history: &[ChatMessage],
        message: &str,
        context_image: Option<&DataUrl>,
    ) -> GatewayResult<ChatReply>;
}
