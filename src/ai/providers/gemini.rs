use crate::ai::client::{ChatReply, DesignGateway, GatewayError, GatewayResult};
use crate::ai::prompts::{
    DESIGNER_SYSTEM_INSTRUCTION, chat_prompt, edit_prompt, regenerate_prompt,
    reply_text_or_fallback,
};
use crate::config::AppConfig;
use crate::data_url::DataUrl;
use crate::types::{ChatMessage, GroundingLink};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Gemini `generateContent` client
pub struct GeminiGateway {
    client: reqwest::Client,
    config: AppConfig,
}

// Gemini request types

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum RequestPart<'a> {
    Text(&'a str),
    InlineData(InlineData<'a>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: EmptyObject,
}

#[derive(Serialize)]
struct EmptyObject {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

// Gemini response types (exported for tests)

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseInlineData {
    #[serde(default)]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

fn parts(response: &GenerateContentResponse) -> impl Iterator<Item = &ResponsePart> {
    response
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .flat_map(|content| content.parts.iter())
}

/// The first non-empty inline image part, re-wrapped as a data URL.
pub fn first_inline_image(response: &GenerateContentResponse) -> GatewayResult<DataUrl> {
    parts(response)
        .find_map(|part| part.inline_data.as_ref().filter(|inline| !inline.data.is_empty()))
        .map(|inline| DataUrl::from_base64(&inline.mime_type, &inline.data))
        .ok_or(GatewayError::NoImageReturned)
}

/// Concatenated text parts of the first candidate, if any.
pub fn response_text(response: &GenerateContentResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|part| part.text.as_deref())
        .collect();
    if text.is_empty() { None } else { Some(text) }
}

/// Web citations in response order. Chunks without a URI are skipped and a
/// missing title falls back to the URI.
pub fn grounding_links(response: &GenerateContentResponse) -> Vec<GroundingLink> {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.grounding_metadata.as_ref())
        .map(|metadata| {
            metadata
                .grounding_chunks
                .iter()
                .filter_map(|chunk| chunk.web.as_ref())
                .filter_map(|web| {
                    let uri = web.uri.clone().filter(|uri| !uri.is_empty())?;
                    let title = web
                        .title
                        .clone()
                        .filter(|title| !title.is_empty())
                        .unwrap_or_else(|| uri.clone());
                    Some(GroundingLink { uri, title })
                })
                .collect()
        })
        .unwrap_or_default()
}

impl GeminiGateway {
    pub fn new(config: AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(AppConfig::load())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.config.api_base, model)
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest<'_>,
    ) -> GatewayResult<GenerateContentResponse> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingApiKey)?;

        debug!("POST generateContent model={}", model);
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("Gemini error {}: {}", status, body);
            return Err(GatewayError::Service {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn image_request(&self, image: &DataUrl, prompt: &str) -> GatewayResult<DataUrl> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![
                    RequestPart::InlineData(InlineData {
                        mime_type: image.mime_type(),
                        data: image.payload(),
                    }),
                    RequestPart::Text(prompt),
                ],
            }],
            system_instruction: None,
            tools: Vec::new(),
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT", "IMAGE"],
            }),
        };

        let response = self.generate(&self.config.image_model, &request).await?;
        let image = first_inline_image(&response)?;
        info!("Image generated: {:?}", image);
        Ok(image)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl DesignGateway for GeminiGateway {
    async fn regenerate(&self, image: &DataUrl, style_prompt: &str) -> GatewayResult<DataUrl> {
        self.image_request(image, &regenerate_prompt(style_prompt))
            .await
    }

    async fn edit(&self, image: &DataUrl, instruction: &str) -> GatewayResult<DataUrl> {
        self.image_request(image, &edit_prompt(instruction)).await
    }

    async fn chat_turn(
        &self,
        history: &[ChatMessage],
        message: &str,
        context_image: Option<&DataUrl>,
    ) -> GatewayResult<ChatReply> {
        let prompt = chat_prompt(history, message);
        let mut parts = Vec::with_capacity(2);
        if let Some(image) = context_image {
            parts.push(RequestPart::InlineData(InlineData {
                mime_type: image.mime_type(),
                data: image.payload(),
            }));
        }
        parts.push(RequestPart::Text(&prompt));

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts,
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![RequestPart::Text(DESIGNER_SYSTEM_INSTRUCTION)],
            }),
            tools: vec![Tool {
                google_search: EmptyObject {},
            }],
            generation_config: None,
        };

        let response = self.generate(&self.config.chat_model, &request).await?;
        let grounding = grounding_links(&response);
        info!("Chat reply received with {} grounding links", grounding.len());
        Ok(ChatReply {
            text: reply_text_or_fallback(response_text(&response)),
            grounding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::prompts::EMPTY_REPLY_FALLBACK;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).expect("valid response json")
    }

    #[test]
    fn extracts_inline_image() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"Here is your room"},
                {"inlineData":{"mimeType":"image/png","data":"iVBORw0"}}
            ]}}]}"#,
        );
        let image = first_inline_image(&response).expect("image present");
        assert_eq!(image.as_str(), "data:image/png;base64,iVBORw0");
    }

    #[test]
    fn skips_empty_inline_parts() {
        let response = parse(
            r#"{"candidates":[{"content":{"parts":[
                {"inlineData":{"mimeType":"image/png","data":""}},
                {"inlineData":{"mimeType":"image/webp","data":"UklGR"}}
            ]}}]}"#,
        );
        let image = first_inline_image(&response).expect("later image used");
        assert_eq!(image.as_str(), "data:image/webp;base64,UklGR");
    }

    #[test]
    fn inline_image_without_mime_defaults_to_jpeg() {
        let response = parse(r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"AAAA"}}]}}]}"#);
        let image = first_inline_image(&response).expect("image present");
        assert_eq!(image.mime_type(), "image/jpeg");
    }

    #[test]
    fn missing_image_is_contract_violation() {
        let response = parse(r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#);
        assert_eq!(
            first_inline_image(&response),
            Err(GatewayError::NoImageReturned)
        );
        assert_eq!(
            first_inline_image(&parse("{}")),
            Err(GatewayError::NoImageReturned)
        );
    }

    #[test]
    fn parses_grounding_chunks() {
        let response = parse(
            r#"{"candidates":[{
                "content":{"parts":[{"text":"Try this "},{"text":"lamp."}]},
                "groundingMetadata":{"groundingChunks":[
                    {"web":{"uri":"https://shop.example/lamp","title":"Arc Lamp"}},
                    {"web":{"uri":"https://shop.example/rug"}},
                    {"web":{"title":"no uri"}},
                    {}
                ]}
            }]}"#,
        );
        assert_eq!(response_text(&response).as_deref(), Some("Try this lamp."));
        assert_eq!(
            grounding_links(&response),
            vec![
                GroundingLink {
                    uri: "https://shop.example/lamp".into(),
                    title: "Arc Lamp".into(),
                },
                GroundingLink {
                    uri: "https://shop.example/rug".into(),
                    title: "https://shop.example/rug".into(),
                },
            ]
        );
    }

    #[test]
    fn empty_text_falls_back() {
        let response = parse(r#"{"candidates":[{"content":{"parts":[]}}]}"#);
        assert_eq!(response_text(&response), None);
        assert_eq!(
            reply_text_or_fallback(response_text(&response)),
            EMPTY_REPLY_FALLBACK
        );
    }

    #[test]
    fn request_serializes_in_gemini_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![
                    RequestPart::InlineData(InlineData {
                        mime_type: "image/png",
                        data: "AAAA",
                    }),
                    RequestPart::Text("hello"),
                ],
            }],
            system_instruction: None,
            tools: vec![Tool {
                google_search: EmptyObject {},
            }],
            generation_config: None,
        };
        let value = serde_json::to_value(&request).expect("serializable");
        assert_eq!(
            value,
            serde_json::json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                        {"text": "hello"}
                    ]
                }],
                "tools": [{"googleSearch": {}}]
            })
        );
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_network() {
        let gateway = GeminiGateway::new(AppConfig::default());
        let result = gateway
            .regenerate(&DataUrl::new("data:image/png;base64,AAAA"), "modern")
            .await;
        assert_eq!(result, Err(GatewayError::MissingApiKey));
    }
}
