use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub id: Option<String>,
    pub name: String,
}

/// An article as delivered by an upstream feed, before analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedArticle {
    pub source: FeedSource,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedQuery {
    pub category: Option<String>,
    pub query: Option<String>,
}

impl FeedQuery {
    pub fn category(category: impl Into<String>) -> Self {
        Self { category: Some(category.into()), query: None }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self { category: None, query: Some(query.into()) }
    }
}

#[async_trait]
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the articles matching the query
    async fn fetch(&self, query: &FeedQuery) -> Result<Vec<FeedArticle>>;
}
