//! Vendor Check CLI Entry Point
//!
//! Uses `anyhow` for startup errors; command failures are
//! `kernel::error::AppError` and map to the process exit code.

mod app;
mod cli;
mod config;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;

use crate::app::VendorCheckApp;
use crate::cli::Cli;
use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    logging::init(&config.log_level, cli.verbose, cli.log_file.as_deref())?;
    tracing::debug!(
        search_api = config.search_config().credentials().is_some(),
        model = %config.openai_model,
        "Configuration loaded"
    );

    let app = VendorCheckApp::new(config);
    match app.run(cli).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::error!(error = %err, kind = ?err.kind(), "Command failed");
            eprintln!("{err}");
            Ok(ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1)))
        }
    }
}
