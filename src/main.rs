//! Herald CLI entrypoint: one monitor invocation per run.

use std::io::{self, Write};
use std::process::ExitCode;

use herald::telemetry::TracingTelemetrySink;
use herald::{HeraldConfig, IntakeError, MonitorOutcome, MonitorRequest, monitor};
use ortho_config::OrthoConfig;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run() -> Result<(), IntakeError> {
    let config = load_config()?;
    let request = MonitorRequest::from_config(&config)?;

    match monitor(&request, &TracingTelemetrySink).await {
        MonitorOutcome::NoNewItems => tracing::info!("nothing to report"),
        MonitorOutcome::Dispatched(outcome) => tracing::info!(?outcome, "run complete"),
    }
    Ok(())
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`IntakeError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<HeraldConfig, IntakeError> {
    HeraldConfig::load().map_err(|error| IntakeError::Configuration {
        message: error.to_string(),
    })
}
