use std::sync::Arc;

use crate::config::Config;
use crate::review::evaluator::Evaluator;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only: nothing mutable is shared between requests.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable evaluator. Default: GeminiEvaluator. Tests substitute fakes.
    pub evaluator: Arc<dyn Evaluator>,
    pub config: Config,
}
