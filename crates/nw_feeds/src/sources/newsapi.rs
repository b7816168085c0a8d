use async_trait::async_trait;
use nw_core::{Error, FeedArticle, FeedQuery, NewsSource, Result};
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use url::Url;
use crate::logging::Logger;
use crate::FeedConfig;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiResponse {
    status: String,
    #[serde(default)]
    total_results: Option<u64>,
    #[serde(default)]
    articles: Vec<FeedArticle>,
    #[serde(default)]
    message: Option<String>,
}

/// Headlines from newsapi.org (`top-headlines` for categories, `everything` for searches).
pub struct NewsApiSource {
    client: Arc<Client>,
    config: FeedConfig,
    logger: Logger,
}

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.config.base_url)
            .field("country", &self.config.country)
            .finish()
    }
}

impl NewsApiSource {
    pub const NAME: &'static str = "newsapi";

    pub fn new(config: FeedConfig) -> Self {
        Self {
            client: Arc::new(Client::new()),
            config,
            logger: Logger::new().with_prefix("[newsapi]".to_string()),
        }
    }

    /// The endpoint URL for a query, without the API key.
    pub fn request_url(&self, query: &FeedQuery) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        let endpoint = if query.query.is_some() { "everything" } else { "top-headlines" };
        let mut url = Url::parse(&format!("{}/{}", base, endpoint))
            .map_err(|e| Error::Feed(format!("Invalid news API URL {}: {}", base, e)))?;

        {
            let mut pairs = url.query_pairs_mut();
            match &query.query {
                Some(q) => {
                    pairs.append_pair("q", q);
                }
                None => {
                    pairs.append_pair("country", &self.config.country);
                    if let Some(category) = &query.category {
                        pairs.append_pair("category", category);
                    }
                }
            }
        }
        Ok(url)
    }

    fn parse_response(body: &str) -> Result<Vec<FeedArticle>> {
        let response: NewsApiResponse = serde_json::from_str(body)?;
        if response.status != "ok" {
            return Err(Error::Feed(
                response.message.unwrap_or_else(|| format!("news API returned status {}", response.status)),
            ));
        }
        tracing::debug!(
            "NewsAPI returned {} of {} articles",
            response.articles.len(),
            response.total_results.unwrap_or_default()
        );
        Ok(response.articles)
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<FeedArticle>> {
        let url = self.request_url(query)?;
        self.logger.info(&format!("🌐 Fetching {}", url));

        let body = self
            .client
            .get(url)
            .header("X-Api-Key", self.config.api_key.clone().unwrap_or_default())
            .send()
            .await?
            .text()
            .await?;

        Self::parse_response(&body).map_err(|e| {
            self.logger.error(&format!("❌ Fetch failed: {}", e));
            e
        })
    }
}
