use std::sync::Arc;

use crate::config::Config;
use crate::portfolio::PortfolioRenderer;
use crate::resume::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only parser; owns the name recognizer loaded at startup.
    pub parser: Arc<ResumeParser>,
    pub renderer: PortfolioRenderer,
}
