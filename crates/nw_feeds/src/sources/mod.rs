use std::sync::Arc;
use nw_core::NewsSource;
use tracing::info;
use crate::FeedConfig;

pub mod fixtures;
pub mod newsapi;

pub use fixtures::FixtureSource;
pub use newsapi::NewsApiSource;

/// Per-category keywords used to filter feeds that can't filter server-side.
pub(crate) const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("technology", &["ai", "tech", "quantum", "computing", "electric"]),
    ("business", &["markets", "trade", "economy", "financial"]),
    ("science", &["medical", "discovery", "research", "climate", "scientists"]),
    ("sports", &["olympic", "swimming", "championship", "records"]),
    ("entertainment", &["streaming", "platform", "content"]),
    ("health", &["medical", "cancer", "treatment", "health"]),
];

pub(crate) fn category_keywords(category: &str) -> &'static [&'static str] {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

/// The sources a manager should pull from under this config.
pub fn get_sources(config: &FeedConfig) -> Vec<Arc<dyn NewsSource>> {
    let source: Arc<dyn NewsSource> = match &config.api_key {
        Some(key) if !key.is_empty() => Arc::new(NewsApiSource::new(config.clone())),
        _ => Arc::new(FixtureSource::new()),
    };
    info!("📡 News source: {}", source.name());
    vec![source]
}
