use anyhow::Result;

pub mod ai;
pub mod autofill;
pub mod config;
pub mod content;
pub mod error;
pub mod interpret;
pub mod messages;
pub mod pricing;
pub mod product;
pub mod render;
pub mod session;
pub mod store;
pub mod text_utils;
pub mod validation;

#[doc(hidden)]
pub mod tests {
    pub mod util;
}

pub use ai::AiConfig;
pub use autofill::AutofillProposal;
pub use config::Config;
pub use content::{Competitor, GeneratedContent, PricingAnalysis};
pub use error::{ConfigError, ErrorCategory, GenerationError, InterpretError, StorageError};
pub use product::{CompetitorInput, ImageAttachment, OemLabelData, ProductInput};
pub use render::render_content;
pub use session::{GenerationState, Session};
pub use store::{FileStore, KeyValueStore, MemoryStore};

// ──────────────────────────────────────────────────────────────
// Main application setup
// ──────────────────────────────────────────────────────────────

/// Generates a listing for the saved product and prints it.
pub async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting listing studio...");

    let config = Config::from_env()?;
    tracing::info!(data_dir = %config.data_dir.display(), "Using data directory");

    let mut session = Session::new(FileStore::new(&config.data_dir));
    match session.load_product() {
        Ok(true) => {}
        Ok(false) => {
            tracing::info!("{}", messages::NOTHING_SAVED);
            return Ok(());
        }
        Err(err) => {
            eprintln!("{}", messages::error_banner(err.user_message()));
            return Err(err.into());
        }
    }

    session.generate(&config.ai).await;
    match session.generation() {
        GenerationState::Succeeded(content) => {
            println!("{}", render_content(content));
        }
        GenerationState::Failed(err) => {
            eprintln!("{}", messages::error_banner(err.user_message()));
        }
        _ => {
            for error in session.field_errors() {
                eprintln!("{error}");
            }
            eprintln!("{}", messages::FIX_HIGHLIGHTED_FIELDS);
        }
    }

    Ok(())
}
