use axum::{
    routing::{get, post, put},
    Router,
};
use nw_core::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/news", get(handlers::list_news))
        .route("/api/news/refresh", get(handlers::refresh_news))
        .route("/api/news/search", get(handlers::search_news))
        .route("/api/recommendations/:user_id", get(handlers::recommendations))
        .route("/api/users/:user_id/preferences", put(handlers::update_preferences))
        .route("/api/favorites", post(handlers::add_favorite))
        .route("/api/favorites/:user_id", get(handlers::list_favorites))
        .route(
            "/api/favorites/:user_id/:article_id",
            axum::routing::delete(handlers::remove_favorite),
        )
        .route("/api/favorites/:user_id/:article_id/check", get(handlers::check_favorite))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("🚀 Serving on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

pub mod prelude {
    pub use nw_core::{Article, Result, Error};
    pub use crate::{create_app, serve, AppState, ServerConfig};
}
