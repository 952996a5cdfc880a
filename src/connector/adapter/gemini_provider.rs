use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::{CompletionProvider, CompletionRequest, CompletionResponse};
use crate::domain::{DomainError, HistoryTurn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: SystemInstruction<'a>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// HTTP client for the Gemini `generateContent` REST endpoint.
///
/// Configuration comes from the environment:
///
/// | Variable          | Default                                          |
/// |-------------------|--------------------------------------------------|
/// | `API_KEY`         | falls back to `GEMINI_API_KEY`, then `""`        |
/// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com/v1beta/models` |
///
/// A missing key is only a warning; the provider will reject the first call.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        let key = std::env::var("API_KEY")
            .or_else(|_| std::env::var("GEMINI_API_KEY"))
            .unwrap_or_default();
        if key.is_empty() {
            warn!("API_KEY is missing from environment variables.");
        }
        let base =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(key, base)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.base_url, model)
    }

    fn build_body(request: &CompletionRequest) -> GenerateContentRequest<'_> {
        let mut contents: Vec<Content<'_>> =
            request.history.iter().map(turn_to_content).collect();
        contents.push(Content {
            role: "user",
            parts: vec![Part {
                text: &request.new_text,
            }],
        });

        GenerateContentRequest {
            contents,
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

fn turn_to_content(turn: &HistoryTurn) -> Content<'_> {
    Content {
        role: turn.role().as_str(),
        parts: vec![Part { text: turn.text() }],
    }
}

/// Joins the text parts of the first candidate; `None` if there are none.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let parts = response
        .candidates?
        .into_iter()
        .next()?
        .content?
        .parts;

    let texts: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}

fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| {
            let message = wrapper.error.message?;
            Some(match wrapper.error.status {
                Some(status_text) if !status_text.is_empty() => format!("{status_text}: {message}"),
                _ => message,
            })
        })
        .unwrap_or_else(|| body.to_string());

    format!("Gemini API returned {status}: {detail}")
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn generate(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, DomainError> {
        let body = Self::build_body(request);

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("Gemini API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(describe_error(status, &body)));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            DomainError::provider(format!("Failed to parse Gemini response: {e}"))
        })?;

        let text = extract_text(parsed);
        debug!(
            "Gemini response received ({} chars)",
            text.as_deref().map(str::len).unwrap_or(0)
        );

        Ok(CompletionResponse { text })
    }

    fn name(&self) -> &str {
        "Gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            history: vec![HistoryTurn::model("welcome"), HistoryTurn::user("hi")],
            new_text: "next".to_string(),
            system_instruction: "be nice".to_string(),
            temperature: 0.7,
            model: "gemini-2.5-flash".to_string(),
        }
    }

    #[test]
    fn test_build_body_appends_new_text_as_user_turn() {
        let request = request();
        let body = serde_json::to_value(GeminiProvider::build_body(&request)).unwrap();

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "model");
        assert_eq!(contents[0]["parts"][0]["text"], "welcome");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "next");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be nice");
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_has_api_key() {
        assert!(GeminiProvider::new("k", DEFAULT_BASE_URL).has_api_key());
        assert!(!GeminiProvider::new("", DEFAULT_BASE_URL).has_api_key());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let provider = GeminiProvider::new("k", "http://localhost:9999/v1beta/models/");
        assert_eq!(
            provider.endpoint("gemini-2.5-flash"),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Post "},{"text":"a thread."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).as_deref(), Some("Post a thread."));
    }

    #[test]
    fn test_extract_text_handles_missing_payloads() {
        for json in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
            r#"{"candidates":[{"content":{"parts":[{}]}}]}"#,
        ] {
            let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
            assert!(extract_text(response).is_none(), "expected no text for {json}");
        }
    }

    #[test]
    fn test_describe_error_prefers_provider_message() {
        let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
        let msg = describe_error(reqwest::StatusCode::FORBIDDEN, body);
        assert!(msg.contains("PERMISSION_DENIED: API key not valid"));

        let raw = describe_error(reqwest::StatusCode::BAD_GATEWAY, "upstream down");
        assert!(raw.ends_with("upstream down"));
    }
}
