//! LLM client — the single point of entry for all generative-model calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Gemini API directly.
//! Every gateway operation goes through this client (via the
//! `GenerativeService` trait), so the uniform failure contract lives in one
//! place.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Text model for all drafting operations.
pub const TEXT_MODEL: &str = "gemini-2.0-flash";
/// Image-capable model for project image generation.
pub const IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Model returned empty content")]
    EmptyContent,

    #[error("Model returned no image payload")]
    MissingImage,
}

// ── wire types (Gemini generateContent) ─────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GeminiApiError {
    error: GeminiApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiApiErrorBody {
    message: String,
}

impl GeminiResponse {
    /// First text part across candidates.
    fn text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .flat_map(|c| c.content.parts.iter())
            .find_map(|p| p.text.as_deref())
    }

    /// First inline image across candidates, rendered as a data URI.
    fn image_data_uri(&self) -> Option<String> {
        self.candidates
            .iter()
            .flat_map(|c| c.content.parts.iter())
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| format!("data:{};base64,{}", d.mime_type, d.data))
    }
}

/// The single Gemini client used by every gateway operation.
/// Retries 429 and 5xx responses with exponential backoff.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        GeminiClient {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Text completion against `TEXT_MODEL`.
    pub async fn generate_text(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let request = GeminiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            system_instruction: Some(RequestContent {
                parts: vec![RequestPart { text: system }],
            }),
            generation_config: None,
        };

        let response = self.call(TEXT_MODEL, &request).await?;
        response
            .text()
            .map(|t| t.trim().to_string())
            .ok_or(GenerationError::EmptyContent)
    }

    /// Image generation against `IMAGE_MODEL`. Returns a data URI; fails
    /// explicitly when the response carries no image payload.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GeminiRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT", "IMAGE"],
            }),
        };

        let response = self.call(IMAGE_MODEL, &request).await?;
        response
            .image_data_uri()
            .ok_or(GenerationError::MissingImage)
    }

    async fn call(
        &self,
        model: &str,
        request: &GeminiRequest<'_>,
    ) -> Result<GeminiResponse, GenerationError> {
        let url = format!("{GEMINI_API_BASE}/{model}:generateContent");
        let mut last_error: Option<GenerationError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s.
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Gemini call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .json(request)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(GenerationError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {}: {}", status, body);
                last_error = Some(GenerationError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(GenerationError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let parsed: GeminiResponse = response.json().await?;
            debug!(
                "Gemini call succeeded: model={}, candidates={}",
                model,
                parsed.candidates.len()
            );
            return Ok(parsed);
        }

        Err(last_error.unwrap_or(GenerationError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "hello"}]}}
            ]
        }"#;
        let response: GeminiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), Some("hello"));
        assert!(response.image_data_uri().is_none());
    }

    #[test]
    fn test_response_image_extraction_as_data_uri() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [
                    {"text": "here is your image"},
                    {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}
                ]}}
            ]
        }"#;
        let response: GeminiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            response.image_data_uri().as_deref(),
            Some("data:image/png;base64,aGVsbG8=")
        );
    }

    #[test]
    fn test_empty_candidates_yield_nothing() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
        assert!(response.image_data_uri().is_none());
    }
}
