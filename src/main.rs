//! Headless SkillShare host.
//!
//! Wires configuration, logging and the in-memory adapters together and
//! runs until interrupted.

use std::process::ExitCode;

use skillshare::application::AppContext;
use skillshare::config::AppConfig;
use skillshare::domain::navigation::Navigator;
use skillshare::telemetry;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load_validated() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = telemetry::init(&config.telemetry) {
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }

    let context = AppContext::in_memory(&config);
    let navigator = Navigator::new();
    tracing::info!(
        email_domain = %context.policy.email_domain,
        screen = %navigator.screen(),
        "SkillShare host ready"
    );

    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not listen for shutdown signal");
            ExitCode::from(1)
        }
    }
}
