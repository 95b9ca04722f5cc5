use reqwest::Client;
use tracing::{debug, warn};

use super::response::extract_text;
use super::types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, Part,
};

pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("API quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("prompt blocked by Gemini ({0})")]
    Blocked(String),

    #[error("Gemini returned no text (finish reason: {0})")]
    EmptyResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Single-turn text generation at a given sampling temperature.
/// Implemented by `GeminiClient` for production; mock implementations used in tests.
pub trait TextGenerator {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, GeminiError>;
}

/// User-supplied API key. Lives only as long as the request that carried it.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty or whitespace-only key.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    credential: Credential,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(http: Client, credential: Credential, model: &str, base_url: &str) -> Self {
        Self {
            http,
            credential,
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        let credential = Credential::new("test-key").expect("non-empty test key");
        Self::new(http, credential, DEFAULT_MODEL, base_url)
    }

    async fn generate_content(
        &self,
        prompt: &str,
        temperature: f32,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
                role: None,
            }],
            generation_config: GenerationConfig { temperature },
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.credential.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            warn!("Gemini API rate limited");
            return Err(GeminiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            if let Ok(body) = serde_json::from_str::<GenerateContentResponse>(&text)
                && let Some(err) = &body.error
            {
                let classified = classify_api_error(err);
                warn!(error = %classified, "Gemini API error");
                return Err(classified);
            }
            let end = text.floor_char_boundary(200);
            warn!(status = %status, "Gemini API error (no structured body)");
            return Err(GeminiError::Api {
                code: status.as_u16(),
                message: format!("HTTP {status}: {}", &text[..end]),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        debug!(model = %self.model, temperature, "gemini generation complete");

        if let Some(err) = &body.error {
            let classified = classify_api_error(err);
            warn!(error = %classified, "Gemini API error in 200 response");
            return Err(classified);
        }

        Ok(body)
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String, GeminiError> {
        let response = self.generate_content(prompt, temperature).await?;
        extract_text(&response)
    }
}

fn classify_api_error(err: &ApiError) -> GeminiError {
    let message = err
        .message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());

    match err.code {
        Some(429) => GeminiError::RateLimited,
        Some(403) => GeminiError::QuotaExhausted(message),
        Some(code) => GeminiError::Api { code, message },
        None => GeminiError::Api {
            code: 0,
            message: format!("Unknown error (no status code): {message}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_429_as_rate_limited() {
        let err = ApiError {
            code: Some(429),
            message: Some("Resource exhausted".into()),
        };
        assert!(matches!(classify_api_error(&err), GeminiError::RateLimited));
    }

    #[test]
    fn classify_403_as_quota_exhausted() {
        let err = ApiError {
            code: Some(403),
            message: Some("Quota exceeded".into()),
        };
        assert!(matches!(
            classify_api_error(&err),
            GeminiError::QuotaExhausted(_)
        ));
    }

    #[test]
    fn classify_400_keeps_code_and_message() {
        let err = ApiError {
            code: Some(400),
            message: Some("API key not valid".into()),
        };
        match classify_api_error(&err) {
            GeminiError::Api { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }

    #[test]
    fn credential_rejects_blank_input() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   \t").is_none());
        assert_eq!(Credential::new("  abc ").unwrap().expose(), "abc");
    }

    #[test]
    fn credential_debug_is_redacted() {
        let credential = Credential::new("super-secret").unwrap();
        let shown = format!("{credential:?}");
        assert_eq!(shown, "[REDACTED]");
        assert!(!shown.contains("super-secret"));
    }
}
