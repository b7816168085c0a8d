use std::sync::Arc;
use nw_core::{ArticleAnalyzer, Error, Result};
use tracing::debug;
use crate::Config;

pub mod heuristic;

pub use heuristic::HeuristicScorer;

/// Build the analyzer named in the config, defaulting to the heuristic scorer.
pub fn create_analyzer(config: &Config) -> Result<Arc<dyn ArticleAnalyzer>> {
    let name = config.model_name.as_deref().unwrap_or(HeuristicScorer::NAME);
    debug!("Creating analyzer: {}", name);
    match name.to_lowercase().as_str() {
        "heuristic" | "keywords" => Ok(Arc::new(HeuristicScorer::new())),
        other => Err(Error::Validation(format!(
            "Unknown analyzer: {}. Available analyzers: heuristic",
            other
        ))),
    }
}
