//! # ogtags API Server
//!
//! HTTP front end for Open Graph tag lookups with a TTL cache.
//!
//! ## Endpoints
//!
//! - `GET /get_tags?url=<page>` - Open Graph tags of `page` as JSON
//! - `GET /health` - Cache store liveness
//!
//! ## Example
//!
//! ```rust,ignore
//! use ogtags_api::{ApiServer, ApiConfig};
//!
//! let server = ApiServer::connect(ApiConfig::from_env()).await?;
//! server.run(([0, 0, 0, 0], 8080)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use ogtags_core::OgError;

/// API server for ogtags.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Connects the cache store and builds the server.
    ///
    /// Fails if the store is unreachable.
    pub async fn connect(config: ApiConfig) -> Result<Self, OgError> {
        Ok(Self::with_state(AppState::connect(config).await?))
    }

    /// Creates a server around prepared state.
    pub fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Creates the router with all routes and layers configured.
    pub fn router(&self) -> Router {
        let router = create_router(self.state.clone());

        let router = if self.state.config.enable_cors {
            router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            router
        };

        router.layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("ogtags API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}
