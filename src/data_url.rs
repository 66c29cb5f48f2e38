//! Data-URL representation of images held in the session.
//!
//! Every image lives in memory as `data:<mime>;base64,<payload>`. The gateway
//! strips the prefix before sending and adds it back to what it receives.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// MIME type assumed when a payload carries no `data:` prefix.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Clone, PartialEq, Eq)]
pub struct DataUrl(String);

impl DataUrl {
    /// Wrap an existing string, prefixed or bare base64.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build from a MIME type and an already-encoded base64 payload.
    pub fn from_base64(mime_type: &str, payload: &str) -> Self {
        let mime_type = if mime_type.trim().is_empty() {
            DEFAULT_MIME_TYPE
        } else {
            mime_type.trim()
        };
        Self(format!("{DATA_PREFIX}{mime_type}{BASE64_MARKER}{payload}"))
    }

    /// Encode raw file bytes, sniffing the MIME type from the magic number.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mime_type = sniff_mime_type(bytes);
        Self::from_base64(mime_type, &STANDARD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime_type(&self) -> &str {
        mime_type_or_default(&self.0)
    }

    pub fn payload(&self) -> &str {
        strip_data_prefix(&self.0)
    }
}

// Payloads run to megabytes; keep debug output readable.
impl fmt::Debug for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DataUrl({}, {} bytes)",
            self.mime_type(),
            self.payload().len()
        )
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// MIME type declared in a `data:` prefix, or [`DEFAULT_MIME_TYPE`].
pub fn mime_type_or_default(data_url: &str) -> &str {
    data_url
        .strip_prefix(DATA_PREFIX)
        .and_then(|rest| rest.split_once(BASE64_MARKER))
        .map(|(mime, _)| mime.trim())
        .filter(|mime| !mime.is_empty())
        .unwrap_or(DEFAULT_MIME_TYPE)
}

/// The base64 payload with any `data:...;base64,` prefix removed.
pub fn strip_data_prefix(data_url: &str) -> &str {
    data_url
        .strip_prefix(DATA_PREFIX)
        .and_then(|rest| rest.split_once(BASE64_MARKER))
        .map(|(_, payload)| payload)
        .unwrap_or(data_url)
}

fn sniff_mime_type(bytes: &[u8]) -> &'static str {
    ::image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(DEFAULT_MIME_TYPE)
}
