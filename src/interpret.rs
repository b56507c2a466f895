//! Turns raw model replies into validated content.
//!
//! The model is asked for bare JSON but may wrap it in prose or code fences,
//! so the object is located first, then parsed, then checked for the keys the
//! display layer cannot do without.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::autofill::AutofillProposal;
use crate::content::{value_to_text, GeneratedContent};
use crate::error::InterpretError;
use crate::product::OemLabelData;

/// Top-level keys without which a reply is rejected.
pub const REQUIRED_FIELDS: [&str; 2] = ["productTitle", "pricingAnalysis"];

/// Keys the model may emit that are never shown to the user.
pub const INTERNAL_FIELDS: [&str; 1] = ["schemaMarkup"];

/// How to find the JSON object inside a reply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// First `{` through last `}`.
    #[default]
    Lenient,
    /// Prefer the contents of the first fenced code block that holds an
    /// object, falling back to [`ExtractionStrategy::Lenient`].
    FenceAware,
}

pub fn extract_json_span(raw: &str, strategy: ExtractionStrategy) -> Option<&str> {
    match strategy {
        ExtractionStrategy::Lenient => brace_span(raw),
        ExtractionStrategy::FenceAware => fenced_blocks(raw)
            .into_iter()
            .find_map(brace_span)
            .or_else(|| brace_span(raw)),
    }
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Bodies of complete ``` fenced blocks, skipping the info string.
fn fenced_blocks(raw: &str) -> Vec<&str> {
    let segments: Vec<&str> = raw.split("```").collect();
    // Odd segments sit between fences; an unterminated last one is ignored.
    (1..segments.len().saturating_sub(1))
        .step_by(2)
        .map(|i| match segments[i].split_once('\n') {
            Some((info, body)) if !info.contains('{') => body,
            _ => segments[i],
        })
        .collect()
}

fn parse_object(raw: &str, strategy: ExtractionStrategy) -> Result<Value, InterpretError> {
    let span = extract_json_span(raw, strategy).ok_or(InterpretError::NoJsonObject)?;
    trace!(span, "located JSON span");
    serde_json::from_str(span).map_err(InterpretError::MalformedJson)
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(_) => true,
    }
}

/// Interprets a content reply using the default lenient extraction.
pub fn interpret_generated_content(raw: &str) -> Result<GeneratedContent, InterpretError> {
    interpret_generated_content_with(raw, ExtractionStrategy::default())
}

pub fn interpret_generated_content_with(
    raw: &str,
    strategy: ExtractionStrategy,
) -> Result<GeneratedContent, InterpretError> {
    let value = parse_object(raw, strategy)?;
    let Value::Object(mut object) = value else {
        return Err(InterpretError::UnexpectedShape(
            "top-level value is not an object".into(),
        ));
    };

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|key| !is_present(object.get(*key)))
        .collect();
    if !missing.is_empty() {
        debug!(?missing, "model response missing required fields");
        return Err(InterpretError::MissingFields(missing));
    }

    strip_internal_fields(&mut object);

    serde_json::from_value(Value::Object(object))
        .map_err(|e| InterpretError::UnexpectedShape(e.to_string()))
}

fn strip_internal_fields(object: &mut Map<String, Value>) {
    for key in INTERNAL_FIELDS {
        if object.remove(key).is_some() {
            trace!(key, "removed internal-only field");
        }
    }
}

/// Interprets an auto-fill reply. Every label key is present afterwards.
pub fn interpret_spec_autofill(raw: &str) -> Result<AutofillProposal, InterpretError> {
    let value = parse_object(raw, ExtractionStrategy::default())?;
    let Value::Object(mut object) = value else {
        return Err(InterpretError::UnexpectedShape(
            "top-level value is not an object".into(),
        ));
    };

    let mut specs = OemLabelData::default();
    for key in OemLabelData::FIELD_NAMES {
        let text = object.remove(key).map(value_to_text).unwrap_or_default();
        if let Some(slot) = specs.get_mut(key) {
            *slot = text.trim().to_string();
        }
    }
    Ok(AutofillProposal::new(specs))
}
