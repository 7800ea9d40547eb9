//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use ogtags_cache::CacheLookup;
use ogtags_core::OgError;

use crate::dto::{GetTagsParams, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /get_tags?url=...
///
/// Serves from the cache when possible; on a miss fetches the page, caches
/// the encoded record and returns it. A failing cache on lookup is a server
/// error, a failing cache on store is only logged.
pub async fn get_tags(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let url = match GetTagsParams::from_pairs(pairs).url {
        Some(url) if !url.is_empty() => url,
        _ => return Err(OgError::MissingUrl.into()),
    };

    let body = match state.cache.lookup(&url).await {
        CacheLookup::Hit(cached) => cached,
        CacheLookup::StoreError(e) => return Err(OgError::from(e).into()),
        CacheLookup::Miss => {
            let tags = state.fetcher.fetch(&url).await.map_err(OgError::from)?;
            let encoded = tags.to_json().map_err(OgError::from)?;

            if let Err(e) = state.cache.store(&url, &encoded).await {
                warn!(url = %url, error = %e, "Error caching tags");
            }

            info!(url = %url, "Fetched tags");
            encoded
        }
    };

    Ok(json_body(body))
}

/// Fallback for `/get_tags` on any method but GET.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET")],
        "Method Not Allowed",
    )
        .into_response()
}

/// GET /health
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    match state.cache.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".into(),
                cache: "ok".into(),
            }),
        ),
        Err(e) => {
            warn!(error = %e, "Cache health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".into(),
                    cache: e.to_string(),
                }),
            )
        }
    }
}

/// Already-encoded JSON, sent as is.
fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
