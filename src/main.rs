use std::{io, process::ExitCode};

use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
    match cooler_deployer::dispatch_commands().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            let _ = cooler_deployer::report_failure(&mut io::stderr(), &report);
            ExitCode::FAILURE
        }
    }
}
