use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ArticleId = i64;
pub type UserId = i64;

/// Category assigned when no keyword group matches.
pub const GENERAL_CATEGORY: &str = "general";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub external_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub source: Option<ArticleSource>,
    pub category: Option<String>,
    pub ai_score: Option<i32>,
    pub ai_summary: Option<String>,
}

/// Insert form of [`Article`]; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    #[serde(default)]
    pub external_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub ai_score: Option<i32>,
    #[serde(default)]
    pub ai_summary: Option<String>,
}

impl Article {
    pub fn from_new(id: ArticleId, article: NewArticle) -> Self {
        Self {
            id,
            external_id: article.external_id,
            title: article.title,
            description: article.description,
            content: article.content,
            url_to_image: article.url_to_image,
            published_at: article.published_at,
            source: article.source,
            category: article.category,
            ai_score: article.ai_score,
            ai_summary: article.ai_summary,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
}

/// What the API hands back for a user: everything but the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: UserId,
    pub email: String,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            preferences: user.preferences,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: i64,
    pub user_id: UserId,
    pub article_id: ArticleId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub user_id: UserId,
    pub article_id: ArticleId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    PublishedAt,
    AiScore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    /// `None` or `"all"` lists every category.
    pub category: Option<String>,
    pub limit: usize,
    pub offset: usize,
    pub sort_by: SortBy,
}

impl ArticleQuery {
    pub const DEFAULT_LIMIT: usize = 20;
}

impl Default for ArticleQuery {
    fn default() -> Self {
        Self {
            category: None,
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
            sort_by: SortBy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// Output of one analysis pass over an article's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: i32,
    pub summary: String,
    pub categories: Vec<String>,
    pub sentiment: Sentiment,
}

impl ScoreResult {
    pub fn primary_category(&self) -> &str {
        self.categories
            .first()
            .map(String::as_str)
            .unwrap_or(GENERAL_CATEGORY)
    }
}

/// The slice of an article the recommender looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: ArticleId,
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub ai_score: Option<i32>,
}

impl From<&Article> for Candidate {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id,
            title: article.title.clone(),
            description: article.description.clone().unwrap_or_default(),
            category: article.category.clone(),
            ai_score: article.ai_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedCandidate {
    pub article_id: ArticleId,
    pub relevance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_user_drops_password() {
        let user = User {
            id: 1,
            email: "reader@example.com".to_string(),
            password: "hunter2".to_string(),
            preferences: UserPreferences::default(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(PublicUser::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "reader@example.com");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_article_serializes_camel_case() {
        let article = Article::from_new(
            7,
            NewArticle {
                title: "Headline".to_string(),
                ai_score: Some(80),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["aiScore"], 80);
        assert!(json.get("externalId").is_some());
    }

    #[test]
    fn test_sort_by_wire_names() {
        let sort: SortBy = serde_json::from_str("\"aiScore\"").unwrap();
        assert_eq!(sort, SortBy::AiScore);
        assert_eq!(SortBy::default(), SortBy::PublishedAt);
    }

    #[test]
    fn test_primary_category_falls_back_to_general() {
        let result = ScoreResult {
            score: 60,
            summary: String::new(),
            categories: vec![],
            sentiment: Sentiment::Neutral,
        };
        assert_eq!(result.primary_category(), GENERAL_CATEGORY);
        assert_eq!(Sentiment::Negative.to_string(), "negative");
    }
}
