use serde::Deserialize;
use tracing::{debug, instrument, trace, warn};

use crate::error::GenerationError;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Deserialize)]
struct ContentPart {
    text: Option<String>,
}

pub fn generate_content_url(api_base: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{model}:generateContent",
        api_base.trim_end_matches('/')
    )
}

/// Sends a prepared request, turning non-success statuses into errors.
pub async fn send_gemini_request(
    api_key: &str,
    builder: reqwest::RequestBuilder,
) -> Result<reqwest::Response, GenerationError> {
    let resp = builder.header("x-goog-api-key", api_key).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        warn!(%status, "Gemini API error");
        return Err(GenerationError::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(resp)
}

/// Joins the text parts of the first candidate.
///
/// A reply without candidates yields an empty string, which the interpreter
/// reports as "no JSON object found".
pub fn parse_candidate_text(raw: &str) -> Result<String, GenerationError> {
    let response: GenerateContentResponse =
        serde_json::from_str(raw).map_err(GenerationError::Envelope)?;
    let Some(candidate) = response.candidates.into_iter().next() else {
        warn!("Gemini response had no candidates");
        return Ok(String::new());
    };
    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    Ok(text.trim().to_string())
}

/// Posts a `generateContent` body and returns the model's text.
#[instrument(level = "trace", skip(api_key, body))]
pub async fn request_text(
    api_key: &str,
    url: &str,
    body: &serde_json::Value,
) -> Result<String, GenerationError> {
    debug!(url, "sending generateContent request");

    let client = reqwest::Client::new();
    let builder = client.post(url).json(body);
    let resp = send_gemini_request(api_key, builder).await?;

    let raw = resp.text().await?;
    let snippet: String = raw.chars().take(200).collect();
    debug!(snippet = %snippet, "generateContent response body");
    trace!(raw = %raw, "generateContent response");
    parse_candidate_text(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_model() {
        assert_eq!(
            generate_content_url("http://localhost:1234/", "gemini-2.5-flash"),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn candidate_parts_are_concatenated() {
        let raw = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":" {\"a\":"},{"text":"1} "}]}}]}"#;
        assert_eq!(parse_candidate_text(raw).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn missing_candidates_is_empty_text() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        assert_eq!(parse_candidate_text(raw).unwrap(), "");
    }

    #[test]
    fn non_json_envelope_is_an_error() {
        assert!(matches!(
            parse_candidate_text("<html>"),
            Err(GenerationError::Envelope(_))
        ));
    }
}
