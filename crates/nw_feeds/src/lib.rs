pub mod sources;
pub mod cli;
pub mod manager;
pub mod logging;

pub use manager::{IngestManager, IngestStatus};
pub use cli::{FeedArgs, FeedCommands, handle_command};
pub use sources::{get_sources, FixtureSource, NewsApiSource};

pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2";

#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// With a key set, headlines come from NewsAPI instead of the bundled fixtures.
    pub api_key: Option<String>,
    pub base_url: String,
    pub country: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_NEWS_API_URL.to_string(),
            country: "us".to_string(),
        }
    }
}

pub mod prelude {
    pub use super::{FeedConfig, IngestManager};
    pub use nw_core::{Article, Error, FeedQuery, NewsSource, Result};
}
