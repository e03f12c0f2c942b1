// Entry point for one scheduled run: post a motivational message, then exit.

use anyhow::Context;
use motivator::core::config::AppConfig;
use motivator::worker::Orchestrator;
use std::process::ExitCode;
use tracing::{error, info};

const EXIT_DELIVERY_FAILED: u8 = 1;
const EXIT_CONFIG: u8 = 2;

fn build() -> anyhow::Result<Orchestrator> {
    let config = AppConfig::from_env().context("loading configuration")?;
    info!(
        "Configured: source={:?} image_mode={:?} sources={}",
        config.content_source,
        config.image_mode,
        config.image_sources.len()
    );
    Orchestrator::from_config(&config).context("building clients")
}

#[tokio::main]
async fn main() -> ExitCode {
    motivator::setup_logging();

    let orchestrator = match build() {
        Ok(o) => o,
        Err(e) => {
            error!("Startup failed: {:#}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    match orchestrator.run().await {
        Ok(report) => {
            info!(
                "Posted {:?} (fallback text: {}, image: {:?})",
                report.outcome, report.used_fallback_text, report.image
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Run failed: {:#}", anyhow::Error::from(e));
            ExitCode::from(EXIT_DELIVERY_FAILED)
        }
    }
}
