use std::path::PathBuf;

use anyhow::Result;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the raw resume JSON produced by the form layer.
    pub resume_input: PathBuf,
    /// Directory the exporter writes PDFs into.
    pub export_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            resume_input: PathBuf::from(require_env("RESUME_INPUT")?),
            export_dir: std::env::var("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    use anyhow::Context;
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
