/// AI module for Roomcraft
///
/// This module is the only place that talks to the generative service. It
/// performs all image synthesis, editing and language understanding for the
/// app through three single-shot operations.
///
/// # Architecture
///
/// - `client` - The `DesignGateway` trait, its error type and reply shape
/// - `prompts` - Fixed instruction templates and fallback constants
/// - `providers` - Provider implementations (Gemini)
///
/// # Usage
///
/// ```rust,no_run
/// use roomcraft::ai::{DesignGateway, GeminiGateway};
/// use roomcraft::data_url::DataUrl;
///
/// # async fn example() -> Result<(), roomcraft::ai::GatewayError> {
/// let gateway = GeminiGateway::from_env();
/// let photo = DataUrl::new("data:image/jpeg;base64,/9j/4AAQ");
/// let restyled = gateway.regenerate(&photo, "warm minimalist").await?;
/// # Ok(())
/// # }
/// ```
mod client;
pub mod prompts;
mod providers;

// Re-export main types
pub use client::{ChatReply, DesignGateway, GatewayError, GatewayResult};
pub use providers::GeminiGateway;
pub use providers::gemini;
