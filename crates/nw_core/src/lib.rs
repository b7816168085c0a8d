pub mod error;
pub mod feed;
pub mod models;
pub mod storage;
pub mod types;

pub use error::Error;
pub use feed::{FeedArticle, FeedQuery, FeedSource, NewsSource};
pub use models::ArticleAnalyzer;
pub use storage::{ArticleStorage, FavoriteStorage, Storage, UserStorage};
pub use types::*;

pub type Result<T> = std::result::Result<T, Error>;
