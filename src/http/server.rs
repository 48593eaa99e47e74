//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the blog routes
//! - Serve static assets for every other path
//! - Wire up middleware (tracing, request ID, timeout, body limit)
//! - Bind server to listener and shut down gracefully

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::{ApiClient, HttpTransport, Transport};
use crate::config::BlogConfig;
use crate::http::handlers::{create_post, list_posts};
use crate::http::request::MakeRequestUuidV4;
use crate::lifecycle::shutdown;

/// Application state injected into handlers.
pub struct AppState<T = HttpTransport> {
    pub api: Arc<ApiClient<T>>,
    pub per_page: usize,
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            per_page: self.per_page,
        }
    }
}

/// HTTP server for the blog.
pub struct BlogServer {
    router: Router,
    config: BlogConfig,
}

impl BlogServer {
    /// Create a new server around an initialized API client.
    pub fn new<T: Transport + 'static>(config: BlogConfig, api: Arc<ApiClient<T>>) -> Self {
        let state = AppState {
            api,
            per_page: config.pagination.per_page,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router<T: Transport + 'static>(config: &BlogConfig, state: AppState<T>) -> Router {
        Router::new()
            .route("/", get(list_posts::<T>).post(create_post::<T>))
            .fallback_service(ServeDir::new(&config.server.static_dir))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.server.body_limit_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            static_dir = %self.config.server.static_dir,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
