use tracing::warn;

use super::client::GeminiError;
use super::types::GenerateContentResponse;

/// Pull the generated text out of a successful response.
///
/// All parts of the first candidate are concatenated. A blocked prompt or a
/// candidate without text is reported as an error rather than an empty review.
pub fn extract_text(response: &GenerateContentResponse) -> Result<String, GeminiError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_ref())
    {
        warn!(reason = %reason, "Gemini blocked the prompt");
        return Err(GeminiError::Blocked(reason.clone()));
    }

    let candidate = response.candidates.as_ref().and_then(|c| c.first());

    let text: String = candidate
        .and_then(|c| c.content.as_ref())
        .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let finish_reason = candidate
            .and_then(|c| c.finish_reason.clone())
            .unwrap_or_else(|| "UNKNOWN".to_string());
        warn!(finish_reason = %finish_reason, "Gemini returned no text");
        return Err(GeminiError::EmptyResponse(finish_reason));
    }

    Ok(text)
}
