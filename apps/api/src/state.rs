use std::sync::Arc;

use crate::config::Config;
use crate::engine::MatchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup from `Config::engine_config`; read-only afterwards.
    pub engine: Arc<MatchEngine>,
}
