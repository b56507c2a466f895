use thiserror::Error;

use crate::messages;
use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY (or API_KEY) environment variable not set")]
    MissingApiKey,
}

/// Why a model reply could not be turned into content.
#[derive(Error, Debug)]
pub enum InterpretError {
    #[error("no JSON object found in the model response")]
    NoJsonObject,

    #[error("malformed JSON in the model response: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("model response is missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("model response has an unexpected shape: {0}")]
    UnexpectedShape(String),
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error("request to the generative model failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generative model returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unreadable response envelope from the generative model: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error(transparent)]
    Interpret(#[from] InterpretError),
}

/// Coarse grouping used to pick how an error is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Shown inline next to the offending fields.
    Validation,
    /// Generic failure banner.
    Transport,
    /// Specific banner naming what was wrong with the reply.
    ResponseShape,
}

impl GenerationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GenerationError::Invalid(_) => ErrorCategory::Validation,
            GenerationError::Transport(_)
            | GenerationError::Api { .. }
            | GenerationError::Envelope(_) => ErrorCategory::Transport,
            GenerationError::Interpret(_) => ErrorCategory::ResponseShape,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            GenerationError::Invalid(_) => messages::FIX_HIGHLIGHTED_FIELDS,
            GenerationError::Transport(_)
            | GenerationError::Api { .. }
            | GenerationError::Envelope(_) => messages::GENERATION_FAILED,
            GenerationError::Interpret(err) => match err {
                InterpretError::NoJsonObject => messages::NO_JSON_FOUND,
                InterpretError::MalformedJson(_) => messages::MALFORMED_JSON,
                InterpretError::MissingFields(_) => messages::MISSING_FIELDS,
                InterpretError::UnexpectedShape(_) => messages::UNEXPECTED_SHAPE,
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("could not read stored data: {0}")]
    Read(#[source] std::io::Error),

    #[error("could not write stored data: {0}")]
    Write(#[source] std::io::Error),

    #[error("saved product data is corrupted: {0}")]
    Corrupt(String),

    #[error("could not serialize product data: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StorageError {
    pub fn user_message(&self) -> &'static str {
        match self {
            StorageError::Corrupt(_) => messages::LOAD_CORRUPTED,
            StorageError::Read(_) => messages::LOAD_FAILED,
            StorageError::Write(_) | StorageError::Serialize(_) => messages::SAVE_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn storage_messages_follow_the_operation() {
        let io = || std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert_eq!(StorageError::Read(io()).user_message(), messages::LOAD_FAILED);
        assert_eq!(StorageError::Write(io()).user_message(), messages::SAVE_FAILED);
        assert_eq!(
            StorageError::Corrupt("x".into()).user_message(),
            messages::LOAD_CORRUPTED
        );
    }

    #[test]
    fn response_shape_errors_have_distinct_messages() {
        let malformed = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let errors = [
            GenerationError::from(InterpretError::NoJsonObject),
            GenerationError::from(InterpretError::MalformedJson(malformed)),
            GenerationError::from(InterpretError::MissingFields(vec!["pricingAnalysis"])),
            GenerationError::from(InterpretError::UnexpectedShape("x".into())),
        ];
        let seen: HashSet<&str> = errors.iter().map(|e| e.user_message()).collect();
        assert_eq!(seen.len(), errors.len());
        assert!(seen.contains(messages::MALFORMED_JSON));
        assert!(errors
            .iter()
            .all(|e| e.category() == ErrorCategory::ResponseShape));
    }

    #[test]
    fn api_errors_use_generic_banner() {
        let err = GenerationError::Api {
            status: 403,
            body: "denied".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Transport);
        assert_eq!(err.user_message(), messages::GENERATION_FAILED);
    }

    #[test]
    fn missing_fields_lists_names() {
        let err = InterpretError::MissingFields(vec!["productTitle", "pricingAnalysis"]);
        assert_eq!(
            err.to_string(),
            "model response is missing required fields: productTitle, pricingAnalysis"
        );
    }
}
