use async_trait::async_trait;
use nw_core::{Error, Result, Storage};
use std::sync::Arc;
use tracing::info;

pub mod backends;
pub mod sample;

pub use backends::*;

#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn new() -> Result<Self> where Self: Sized;
}

/// Names accepted by [`create_storage`].
pub const AVAILABLE_BACKENDS: &[&str] = &["memory"];

/// Build the named backend. With `seed` set the store starts with the sample articles.
pub async fn create_storage(name: &str, seed: bool) -> Result<Arc<dyn Storage>> {
    match name {
        "memory" => {
            let storage = if seed {
                MemoryStorage::with_sample_data().await?
            } else {
                <MemoryStorage as StorageBackend>::new().await?
            };
            info!("💾 Storage backend ready (using {})", name);
            Ok(Arc::new(storage))
        }
        other => Err(Error::Storage(format!(
            "Unknown storage backend: {}. Available backends: {}",
            other,
            AVAILABLE_BACKENDS.join(", ")
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, StorageBackend};
}

#[cfg(test)]
mod tests {
    use super::*;
    use nw_core::ArticleQuery;

    #[tokio::test]
    async fn test_create_storage() {
        let storage = create_storage("memory", true).await.unwrap();
        let articles = storage.list_articles(&ArticleQuery::default()).await.unwrap();
        assert_eq!(articles.len(), 3);

        let storage = create_storage("memory", false).await.unwrap();
        let articles = storage.list_articles(&ArticleQuery::default()).await.unwrap();
        assert!(articles.is_empty());

        assert!(create_storage("qdrant", false).await.is_err());
    }
}
