use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vitae::config::Config;
use vitae::errors::AppError;
use vitae::render::{PageGeometry, PdfExporter};
use vitae::schema::RawResume;
use vitae::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting vitae v{}", env!("CARGO_PKG_VERSION"));

    let exporter = Arc::new(PdfExporter::new(&config.export_dir, PageGeometry::a4()));
    let state = AppState::new(exporter);

    // Read the raw candidate produced by the form layer.
    let raw_json = std::fs::read_to_string(&config.resume_input)
        .with_context(|| format!("reading resume input {}", config.resume_input.display()))?;
    let raw: RawResume =
        serde_json::from_str(&raw_json).context("parsing resume input JSON")?;

    if let Err(errors) = state.submit(&raw) {
        for path in errors.sorted_paths() {
            warn!(
                field = path,
                message = errors.message(path).unwrap_or_default(),
                "validation failed"
            );
        }
        return Err(AppError::from(errors).into());
    }
    info!("resume validated and stored");

    match state.export_current().await.map_err(AppError::from)? {
        Some(path) => info!(path = %path.display(), "export complete"),
        None => warn!("nothing exported — see the diagnostic above"),
    }

    Ok(())
}
