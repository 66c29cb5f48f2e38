use std::collections::HashMap;
use std::env;
use std::time::Duration;

/// Bundled config for builds without a process environment (wasm)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Credential for the generative service. Checked only when a call is made.
    pub api_key: Option<String>,
    pub image_model: String,
    pub chat_model: String,
    pub api_base: String,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Process environment first, then the bundled file.
    pub fn load() -> Self {
        load_dotenv();
        let bundled = parse_env_file(BUNDLED_CONFIG);
        Self::from_lookup(|key| env::var(key).ok().or_else(|| bundled.get(key).cloned()))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let request_timeout = get("ROOMCRAFT_TIMEOUT_SECS")
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self {
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            image_model: get("ROOMCRAFT_IMAGE_MODEL").unwrap_or(defaults.image_model),
            chat_model: get("ROOMCRAFT_CHAT_MODEL").unwrap_or(defaults.chat_model),
            api_base: get("GEMINI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            request_timeout,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        tracing::debug!("no .env loaded: {}", err);
    }
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {}

/// Parse `KEY=VALUE` lines, skipping blanks and `#` comments.
pub fn parse_env_file(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches('"');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}
