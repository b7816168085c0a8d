use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use nw_core::{
    Article, ArticleId, ArticleQuery, ArticleStorage, Candidate, Error, FavoriteStorage, NewFavorite,
    NewUser, PublicUser, SortBy, UserId, UserPreferences, UserStorage,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;
use crate::{ApiError, AppState};

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// How many recent articles the recommender chooses from.
const RECOMMENDATION_POOL: usize = 50;

fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub articles: Vec<Article>,
    pub total_results: usize,
}

impl From<Vec<Article>> for NewsResponse {
    fn from(articles: Vec<Article>) -> Self {
        Self { total_results: articles.len(), articles }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Article>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Article>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteCheckResponse {
    pub is_favorited: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsParams {
    pub category: Option<String>,
    pub page: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshParams {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn parse_sort(sort_by: Option<&str>) -> SortBy {
    match sort_by {
        Some("aiScore") => SortBy::AiScore,
        _ => SortBy::PublishedAt,
    }
}

/// Offset for a 1-based `page` value. Missing or non-positive pages read as the
/// first page; anything that is not an integer yields `None`.
fn page_offset(page: Option<&str>) -> Option<usize> {
    let page = match page.map(str::trim).filter(|p| !p.is_empty()) {
        None => 1,
        Some(raw) => match raw.parse::<usize>() {
            Ok(page) => page.max(1),
            Err(_) if raw.parse::<i64>().is_ok() => 1,
            Err(_) => return None,
        },
    };
    Some((page - 1).saturating_mul(ArticleQuery::DEFAULT_LIMIT))
}

fn valid_user(user: &NewUser) -> bool {
    let email = user.email.trim();
    !user.password.is_empty() && email.len() > 2 && email.contains('@')
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<UserResponse> {
    let Json(user) = payload.map_err(|_| ApiError::BadRequest("Invalid user data".to_string()))?;
    if !valid_user(&user) {
        return Err(ApiError::BadRequest("Invalid user data".to_string()));
    }

    match state.storage.create_user(user).await {
        Ok(user) => {
            info!("👤 Registered user {}", user.id);
            Ok(Json(UserResponse { user: user.into() }))
        }
        Err(Error::Conflict(_)) => Err(ApiError::BadRequest("User already exists".to_string())),
        Err(e) => Err(ApiError::internal("Invalid user data", e)),
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<UserResponse> {
    let Json(request) = payload.map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;
    let user = state
        .storage
        .get_user_by_email(&request.email)
        .await
        .map_err(|e| ApiError::internal("Login failed", e))?;

    match user {
        Some(user) if user.password == request.password => Ok(Json(UserResponse { user: user.into() })),
        _ => Err(ApiError::Unauthorized("Invalid credentials".to_string())),
    }
}

pub async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
) -> ApiResult<NewsResponse> {
    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        let articles = state
            .storage
            .search_articles(search)
            .await
            .map_err(|e| ApiError::internal("Failed to fetch articles", e))?;
        return Ok(Json(articles.into()));
    }

    let Some(offset) = page_offset(params.page.as_deref()) else {
        return Ok(Json(Vec::<Article>::new().into()));
    };
    let query = ArticleQuery {
        category: params.category,
        limit: ArticleQuery::DEFAULT_LIMIT,
        offset,
        sort_by: parse_sort(params.sort_by.as_deref()),
    };
    let articles = state
        .storage
        .list_articles(&query)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch articles", e))?;
    Ok(Json(articles.into()))
}

pub async fn refresh_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RefreshParams>,
) -> ApiResult<NewsResponse> {
    let category = params.category.unwrap_or_else(|| "general".to_string());
    let processed = state
        .ingest
        .refresh(&category)
        .await
        .map_err(|e| ApiError::internal("Failed to refresh news", e))?;
    let articles: Vec<Article> = processed.into_iter().map(|(article, _)| article).collect();
    Ok(Json(articles.into()))
}

pub async fn search_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<NewsResponse> {
    let q = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Search query required".to_string()))?;

    let mut articles = state
        .storage
        .search_articles(&q)
        .await
        .map_err(|e| ApiError::internal("Search failed", e))?;

    if articles.is_empty() {
        articles = state
            .ingest
            .search(&q)
            .await
            .map_err(|e| ApiError::internal("Search failed", e))?
            .into_iter()
            .map(|(article, _)| article)
            .collect();
    }

    Ok(Json(articles.into()))
}

pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> ApiResult<RecommendationsResponse> {
    let user = state
        .storage
        .get_user(user_id)
        .await
        .map_err(|e| ApiError::internal("Failed to generate recommendations", e))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let pool = state
        .storage
        .list_articles(&ArticleQuery { limit: RECOMMENDATION_POOL, ..ArticleQuery::default() })
        .await
        .map_err(|e| ApiError::internal("Failed to generate recommendations", e))?;
    let candidates: Vec<Candidate> = pool.iter().map(Candidate::from).collect();
    let ids = state.recommender.rank(&user.preferences, &candidates);

    let mut recommendations = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(article) = state
            .storage
            .get_article(id)
            .await
            .map_err(|e| ApiError::internal("Failed to generate recommendations", e))?
        {
            recommendations.push(article);
        }
    }

    Ok(Json(RecommendationsResponse { recommendations }))
}

pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
    payload: std::result::Result<Json<UserPreferences>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(preferences) =
        payload.map_err(|_| ApiError::BadRequest("Failed to update preferences".to_string()))?;
    state
        .storage
        .update_preferences(user_id, preferences)
        .await
        .map_err(|e| ApiError::internal("Failed to update preferences", e))?;
    Ok(message("Preferences updated successfully"))
}

pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> ApiResult<FavoritesResponse> {
    let favorites = state
        .storage
        .get_favorites(user_id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch favorites", e))?;
    Ok(Json(FavoritesResponse { favorites }))
}

pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<NewFavorite>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(favorite) =
        payload.map_err(|_| ApiError::BadRequest("Failed to favorite article".to_string()))?;
    state
        .storage
        .add_favorite(favorite)
        .await
        .map_err(|e| ApiError::internal("Failed to favorite article", e))?;
    Ok(message("Article favorited successfully"))
}

pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Path((user_id, article_id)): Path<(UserId, ArticleId)>,
) -> ApiResult<Value> {
    state
        .storage
        .remove_favorite(user_id, article_id)
        .await
        .map_err(|e| ApiError::internal("Failed to unfavorite article", e))?;
    Ok(message("Article unfavorited successfully"))
}

pub async fn check_favorite(
    State(state): State<Arc<AppState>>,
    Path((user_id, article_id)): Path<(UserId, ArticleId)>,
) -> ApiResult<FavoriteCheckResponse> {
    let is_favorited = state
        .storage
        .is_favorited(user_id, article_id)
        .await
        .map_err(|e| ApiError::internal("Failed to check favorite status", e))?;
    Ok(Json(FavoriteCheckResponse { is_favorited }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
