use axum::{Router, extract::DefaultBodyLimit, http::HeaderValue};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::AppState;
use crate::server::config::ServerConfig;
use crate::services::banned_terms::BannedTermSet;
use crate::services::content_filter::ContentFilter;
use crate::utils::error::{AppError, AppResult};

fn cors_layer(config: &ServerConfig) -> AppResult<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match &config.cors_origin {
        Some(origin) => {
            let origin: HeaderValue = origin
                .parse()
                .map_err(|_| AppError::Internal(format!("Invalid CORS_ORIGIN: {}", origin)))?;
            Ok(layer.allow_origin(origin))
        }
        None => Ok(layer.allow_origin(Any)),
    }
}

pub fn register_routes(config: &ServerConfig) -> AppResult<Router> {
    let terms = BannedTermSet::builtin();
    let filter = Arc::new(ContentFilter::new(&terms, config.filter_policy));

    tracing::info!(
        "Content filter ready: {} banned words, {} policy",
        terms.word_count(),
        filter.policy().as_str()
    );

    let state = Arc::new(AppState { filter });
    let api_routes = crate::api::routes(state);

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http()))
}
