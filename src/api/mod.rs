//! Local HTTP API — the surface the form front end talks to.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::api_router;
pub use server::{start_api_server, ApiServer};
pub use types::ApiContext;
