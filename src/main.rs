use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crosscheck::api::start_api_server;
use crosscheck::config;
use crosscheck::interactions::InteractionTable;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    // A missing or malformed dataset is fatal: nothing to check against.
    let data_path = config::data_file_path();
    let table = match InteractionTable::load(&data_path) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            tracing::error!(path = %data_path.display(), "Cannot load interaction dataset: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut server = match start_api_server(table, config::bind_addr()).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Cannot start API server: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(addr = %server.addr, "Ready — press Ctrl-C to stop");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for shutdown signal: {e}");
    }
    server.shutdown();

    ExitCode::SUCCESS
}
