use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::ai::common::{generate_content_url, request_text};
use crate::ai::config::AiConfig;
use crate::ai::prompts::AUTOFILL_PROMPT;
use crate::autofill::AutofillProposal;
use crate::error::GenerationError;
use crate::interpret::interpret_spec_autofill;
use crate::validation::validate_autofill_query;

pub fn build_autofill_prompt(query: &str) -> String {
    AUTOFILL_PROMPT.replace("{query}", query.trim())
}

/// Search-enabled, text-only request body.
///
/// No JSON response mime type here: the API refuses it together with tools.
pub fn build_request_body(query: &str) -> Value {
    json!({
        "contents": [ { "role": "user", "parts": [ { "text": build_autofill_prompt(query) } ] } ],
        "tools": [ { "google_search": {} } ],
        "generationConfig": { "thinkingConfig": { "thinkingBudget": 0 } }
    })
}

/// Looks up label specs for a URL or model number.
#[instrument(level = "trace", skip(config))]
pub async fn request_spec_autofill(
    config: &AiConfig,
    query: &str,
) -> Result<AutofillProposal, GenerationError> {
    validate_autofill_query(query)?;
    let body = build_request_body(query);
    let url = generate_content_url(&config.api_base, &config.autofill_model);
    debug!(model = %config.autofill_model, "requesting spec auto-fill");

    let text = request_text(&config.api_key, &url, &body).await?;
    let proposal = interpret_spec_autofill(&text)?;
    debug!(
        found = proposal.found_count(),
        confidence = proposal.confidence(),
        "auto-fill proposal ready"
    );
    Ok(proposal)
}
