use async_trait::async_trait;
use crate::types::{
    Article, ArticleId, ArticleQuery, NewArticle, NewFavorite, NewUser, User, UserId, UserPreferences,
};
use crate::Result;

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// List articles filtered by category, sorted and sliced per the query
    async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>>;

    async fn get_article(&self, id: ArticleId) -> Result<Option<Article>>;

    /// Look up an article by the identifier its feed gave it
    async fn get_article_by_external_id(&self, external_id: &str) -> Result<Option<Article>>;

    /// Store a new article, assigning it the next id
    async fn create_article(&self, article: NewArticle) -> Result<Article>;

    /// Case-insensitive substring search over title and description
    async fn search_articles(&self, query: &str) -> Result<Vec<Article>>;
}

#[async_trait]
pub trait UserStorage: Send + Sync {
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Replace a user's preferences. Unknown users are ignored.
    async fn update_preferences(&self, id: UserId, preferences: UserPreferences) -> Result<()>;
}

#[async_trait]
pub trait FavoriteStorage: Send + Sync {
    async fn get_favorites(&self, user_id: UserId) -> Result<Vec<Article>>;

    /// Adding the same pair twice keeps a single favorite
    async fn add_favorite(&self, favorite: NewFavorite) -> Result<()>;

    async fn remove_favorite(&self, user_id: UserId, article_id: ArticleId) -> Result<()>;

    async fn is_favorited(&self, user_id: UserId, article_id: ArticleId) -> Result<bool>;
}

/// Everything the web layer needs from a backend.
pub trait Storage: ArticleStorage + UserStorage + FavoriteStorage {}

impl<T: ArticleStorage + UserStorage + FavoriteStorage> Storage for T {}
