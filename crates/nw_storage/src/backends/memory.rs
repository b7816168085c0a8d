use async_trait::async_trait;
use chrono::Utc;
use nw_core::{
    Article, ArticleId, ArticleQuery, ArticleStorage, Error, Favorite, FavoriteStorage, NewArticle,
    NewFavorite, NewUser, Result, SortBy, User, UserId, UserPreferences, UserStorage,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use crate::{sample, StorageBackend};

/// Plain tables behind the lock. Ids are handed out per table starting at 1.
#[derive(Debug)]
pub struct MemoryStore {
    users: BTreeMap<UserId, User>,
    articles: BTreeMap<ArticleId, Article>,
    favorites: BTreeMap<(UserId, ArticleId), Favorite>,
    next_user_id: UserId,
    next_article_id: ArticleId,
    next_favorite_id: i64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            articles: BTreeMap::new(),
            favorites: BTreeMap::new(),
            next_user_id: 1,
            next_article_id: 1,
            next_favorite_id: 1,
        }
    }

    pub fn list_articles(&self, query: &ArticleQuery) -> Vec<Article> {
        let category = query.category.as_deref().filter(|c| !c.is_empty() && *c != "all");
        let mut articles: Vec<Article> = self
            .articles
            .values()
            .filter(|article| match category {
                Some(category) => article.category.as_deref() == Some(category),
                None => true,
            })
            .cloned()
            .collect();

        match query.sort_by {
            SortBy::AiScore => {
                articles.sort_by(|a, b| b.ai_score.unwrap_or(0).cmp(&a.ai_score.unwrap_or(0)))
            }
            // undated articles sort last
            SortBy::PublishedAt => articles.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
        }

        let limit = if query.limit == 0 { ArticleQuery::DEFAULT_LIMIT } else { query.limit };
        articles.into_iter().skip(query.offset).take(limit).collect()
    }

    pub fn create_article(&mut self, article: NewArticle) -> Article {
        let id = self.next_article_id;
        self.next_article_id += 1;
        let article = Article::from_new(id, article);
        self.articles.insert(id, article.clone());
        article
    }

    pub fn get_article_by_external_id(&self, external_id: &str) -> Option<Article> {
        self.articles
            .values()
            .find(|article| article.external_id.as_deref() == Some(external_id))
            .cloned()
    }

    pub fn search_articles(&self, query: &str) -> Vec<Article> {
        let query = query.to_lowercase();
        self.articles
            .values()
            .filter(|article| {
                article.title.to_lowercase().contains(&query)
                    || article
                        .description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    pub fn get_user_by_email(&self, email: &str) -> Option<User> {
        self.users.values().find(|user| user.email == email).cloned()
    }

    pub fn create_user(&mut self, user: NewUser) -> Result<User> {
        if self.get_user_by_email(&user.email).is_some() {
            return Err(Error::Conflict(format!("User already exists: {}", user.email)));
        }
        let id = self.next_user_id;
        self.next_user_id += 1;
        let user = User {
            id,
            email: user.email,
            password: user.password,
            preferences: UserPreferences::default(),
            created_at: Utc::now(),
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    pub fn get_favorites(&self, user_id: UserId) -> Vec<Article> {
        self.articles
            .values()
            .filter(|article| self.favorites.contains_key(&(user_id, article.id)))
            .cloned()
            .collect()
    }

    pub fn add_favorite(&mut self, favorite: NewFavorite) {
        let key = (favorite.user_id, favorite.article_id);
        if self.favorites.contains_key(&key) {
            return;
        }
        let id = self.next_favorite_id;
        self.next_favorite_id += 1;
        self.favorites.insert(
            key,
            Favorite {
                id,
                user_id: favorite.user_id,
                article_id: favorite.article_id,
                created_at: Utc::now(),
            },
        );
    }
}

/// The process-wide store: one instance, shared through `Arc`, lives until exit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with the bundled sample articles.
    pub async fn with_sample_data() -> Result<Self> {
        let storage = Self::new();
        for article in sample::sample_articles(Utc::now()) {
            storage.create_article(article).await?;
        }
        Ok(storage)
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn new() -> Result<Self> where Self: Sized {
        Ok(MemoryStorage::new())
    }
}

#[async_trait]
impl ArticleStorage for MemoryStorage {
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.list_articles(query))
    }

    async fn get_article(&self, id: ArticleId) -> Result<Option<Article>> {
        let store = self.store.read().await;
        Ok(store.articles.get(&id).cloned())
    }

    async fn get_article_by_external_id(&self, external_id: &str) -> Result<Option<Article>> {
        let store = self.store.read().await;
        Ok(store.get_article_by_external_id(external_id))
    }

    async fn create_article(&self, article: NewArticle) -> Result<Article> {
        let mut store = self.store.write().await;
        let article = store.create_article(article);
        debug!("Stored article {}: {}", article.id, article.title);
        Ok(article)
    }

    async fn search_articles(&self, query: &str) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.search_articles(query))
    }
}

#[async_trait]
impl UserStorage for MemoryStorage {
    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let store = self.store.read().await;
        Ok(store.get_user_by_email(email))
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut store = self.store.write().await;
        store.create_user(user)
    }

    async fn update_preferences(&self, id: UserId, preferences: UserPreferences) -> Result<()> {
        let mut store = self.store.write().await;
        if let Some(user) = store.users.get_mut(&id) {
            user.preferences = preferences;
        }
        Ok(())
    }
}

#[async_trait]
impl FavoriteStorage for MemoryStorage {
    async fn get_favorites(&self, user_id: UserId) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.get_favorites(user_id))
    }

    async fn add_favorite(&self, favorite: NewFavorite) -> Result<()> {
        let mut store = self.store.write().await;
        store.add_favorite(favorite);
        Ok(())
    }

    async fn remove_favorite(&self, user_id: UserId, article_id: ArticleId) -> Result<()> {
        let mut store = self.store.write().await;
        store.favorites.remove(&(user_id, article_id));
        Ok(())
    }

    async fn is_favorited(&self, user_id: UserId, article_id: ArticleId) -> Result<bool> {
        let store = self.store.read().await;
        Ok(store.favorites.contains_key(&(user_id, article_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn article(title: &str, category: &str, ai_score: i32, hours_ago: i64) -> NewArticle {
        NewArticle {
            external_id: Some(format!("https://example.com/{}", title.to_lowercase().replace(' ', "-"))),
            title: title.to_string(),
            description: Some(format!("About {}", title)),
            published_at: Some(Utc::now() - Duration::hours(hours_ago)),
            category: Some(category.to_string()),
            ai_score: Some(ai_score),
            ..Default::default()
        }
    }

    async fn seeded() -> MemoryStorage {
        let storage = MemoryStorage::new();
        storage.create_article(article("Old Tech", "technology", 90, 10)).await.unwrap();
        storage.create_article(article("Fresh Markets", "business", 70, 1)).await.unwrap();
        storage.create_article(article("Mid Tech", "technology", 80, 5)).await.unwrap();
        storage
    }

    fn titles(articles: &[Article]) -> Vec<&str> {
        articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_ids_increment_from_one() {
        let storage = seeded().await;
        let ids: Vec<_> = storage
            .list_articles(&ArticleQuery { sort_by: SortBy::AiScore, ..Default::default() })
            .await
            .unwrap()
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 2]);

        let user = storage
            .create_user(NewUser { email: "a@b.c".to_string(), password: "pw".to_string() })
            .await
            .unwrap();
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_list_sorts_and_filters() {
        let storage = seeded().await;

        let recent = storage.list_articles(&ArticleQuery::default()).await.unwrap();
        assert_eq!(titles(&recent), vec!["Fresh Markets", "Mid Tech", "Old Tech"]);

        let tech = storage
            .list_articles(&ArticleQuery { category: Some("technology".to_string()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(titles(&tech), vec!["Mid Tech", "Old Tech"]);

        let all = storage
            .list_articles(&ArticleQuery { category: Some("all".to_string()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let storage = seeded().await;
        let page = storage
            .list_articles(&ArticleQuery { limit: 2, offset: 1, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(titles(&page), vec!["Mid Tech", "Old Tech"]);

        let past_end = storage
            .list_articles(&ArticleQuery { offset: 20, ..Default::default() })
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_undated_articles_sort_last() {
        let storage = seeded().await;
        storage
            .create_article(NewArticle { title: "Undated".to_string(), ..Default::default() })
            .await
            .unwrap();
        let recent = storage.list_articles(&ArticleQuery::default()).await.unwrap();
        assert_eq!(recent.last().unwrap().title, "Undated");
    }

    #[tokio::test]
    async fn test_lookup_by_external_id() {
        let storage = seeded().await;
        let found = storage
            .get_article_by_external_id("https://example.com/mid-tech")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, 3);
        assert!(storage.get_article_by_external_id("missing").await.unwrap().is_none());
        assert!(storage.get_article(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let storage = seeded().await;
        let hits = storage.search_articles("TECH").await.unwrap();
        assert_eq!(titles(&hits), vec!["Old Tech", "Mid Tech"]);

        let by_description = storage.search_articles("about fresh").await.unwrap();
        assert_eq!(titles(&by_description), vec!["Fresh Markets"]);
    }

    #[tokio::test]
    async fn test_users_and_preferences() {
        let storage = MemoryStorage::new();
        let user = storage
            .create_user(NewUser { email: "reader@example.com".to_string(), password: "secret".to_string() })
            .await
            .unwrap();
        assert_eq!(user.preferences, UserPreferences::default());

        let duplicate = storage
            .create_user(NewUser { email: "reader@example.com".to_string(), password: "other".to_string() })
            .await;
        assert!(matches!(duplicate, Err(Error::Conflict(_))));

        let preferences = UserPreferences {
            categories: vec!["science".to_string()],
            keywords: vec!["climate".to_string()],
        };
        storage.update_preferences(user.id, preferences.clone()).await.unwrap();
        let stored = storage.get_user_by_email("reader@example.com").await.unwrap().unwrap();
        assert_eq!(stored.preferences, preferences);

        // unknown users are ignored
        storage.update_preferences(42, preferences).await.unwrap();
        assert!(storage.get_user(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_favorites() {
        let storage = seeded().await;
        let favorite = NewFavorite { user_id: 1, article_id: 3 };
        storage.add_favorite(favorite).await.unwrap();
        storage.add_favorite(favorite).await.unwrap();
        storage.add_favorite(NewFavorite { user_id: 1, article_id: 1 }).await.unwrap();
        storage.add_favorite(NewFavorite { user_id: 2, article_id: 2 }).await.unwrap();

        let favorites = storage.get_favorites(1).await.unwrap();
        assert_eq!(titles(&favorites), vec!["Old Tech", "Mid Tech"]);
        assert!(storage.is_favorited(1, 3).await.unwrap());
        assert_eq!(storage.store.read().await.favorites.len(), 3);

        storage.remove_favorite(1, 3).await.unwrap();
        assert!(!storage.is_favorited(1, 3).await.unwrap());
        // removing twice is fine
        storage.remove_favorite(1, 3).await.unwrap();
        assert_eq!(storage.get_favorites(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sample_data() {
        let storage = MemoryStorage::with_sample_data().await.unwrap();
        let articles = storage.list_articles(&ArticleQuery::default()).await.unwrap();
        assert_eq!(articles.len(), 3);
        assert!(articles.iter().all(|a| a.ai_score.is_some() && a.ai_summary.is_some()));
        assert_eq!(articles[0].category.as_deref(), Some("technology"));
    }
}
