//! Gemini integration: prompt building, transport and the two request flows.

pub mod autofill;
pub mod common;
pub mod config;
pub mod generate;
pub mod prompts;

pub use autofill::request_spec_autofill;
pub use config::AiConfig;
pub use generate::{build_prompt, generate_product_content};
