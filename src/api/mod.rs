pub mod moderation;
pub mod profile;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::services::content_filter::ContentFilter;

pub struct AppState {
    pub filter: Arc<ContentFilter>,
}

async fn health_check() -> &'static str {
    "OK"
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/moderation", moderation::routes(state.clone()))
        .merge(profile::routes(state))
}
