//! Shared types for the API layer.

use std::sync::Arc;

use crate::interactions::InteractionTable;

/// Shared context for all API routes.
///
/// The interaction table is loaded once at startup and never mutated,
/// so it is shared behind a plain `Arc` with no locking.
#[derive(Clone)]
pub struct ApiContext {
    pub table: Arc<InteractionTable>,
}

impl ApiContext {
    pub fn new(table: Arc<InteractionTable>) -> Self {
        Self { table }
    }
}
