use std::env;

use crate::ai::common::GEMINI_API_BASE;
use crate::error::ConfigError;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub model: String,
    pub autofill_model: String,
    pub api_base: String,
}

impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("autofill_model", &self.autofill_model)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl AiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            autofill_model: DEFAULT_MODEL.to_string(),
            api_base: GEMINI_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Reads the credential and model overrides. A missing key is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            autofill_model: env::var("GEMINI_AUTOFILL_MODEL").unwrap_or_else(|_| model.clone()),
            model,
            api_base: env::var("GEMINI_API_URL").unwrap_or_else(|_| GEMINI_API_BASE.to_string()),
        })
    }
}
