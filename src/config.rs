use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Crosscheck";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default bind address for the local API server.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8420";

/// Default path of the interaction dataset, relative to the working directory.
const DEFAULT_DATA_FILE: &str = "data/interactions.csv";

/// Path to the interaction dataset CSV.
/// Overridable via `CROSSCHECK_DATA` for deployments that ship their own table.
pub fn data_file_path() -> PathBuf {
    match std::env::var("CROSSCHECK_DATA") {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DATA_FILE),
    }
}

/// Socket address the API server binds to.
/// Overridable via `CROSSCHECK_ADDR`; falls back to loopback on a fixed port.
pub fn bind_addr() -> SocketAddr {
    std::env::var("CROSSCHECK_ADDR")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            DEFAULT_BIND_ADDR
                .parse()
                .expect("default bind address is valid")
        })
}

/// Default log filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}
