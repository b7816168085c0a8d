use std::sync::Arc;
use nw_core::{ArticleAnalyzer, NewsSource, Storage};
use nw_feeds::IngestManager;
use nw_inference::Recommender;

pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub recommender: Recommender,
    pub ingest: IngestManager,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn Storage>,
        analyzer: Arc<dyn ArticleAnalyzer>,
        sources: Vec<Arc<dyn NewsSource>>,
        recommender: Recommender,
    ) -> Self {
        let ingest = IngestManager::new(storage.clone(), analyzer, sources);
        Self { storage, recommender, ingest }
    }
}
