use std::env;
use std::path::PathBuf;

use crate::ai::config::AiConfig;
use crate::error::ConfigError;

pub const APP_DIR_NAME: &str = "listing-studio";

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub ai: AiConfig,
}

impl Config {
    /// Loads `.env` if present, then reads the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let data_dir = env::var_os("LISTING_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);
        let ai = AiConfig::from_env()?;
        Ok(Self { data_dir, ai })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
