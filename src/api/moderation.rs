use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::AppState;
use crate::models::field::{FieldType, SanitizeField};
use crate::models::validation::{BatchSanitizationResult, CharacterCountInfo, ValidationResult};
use crate::services::content_filter::character_count;
use crate::services::sanitizer::{sanitize_batch, sanitize_input};
use crate::utils::error::{AppError, AppResult};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest {
    text: Option<String>,
    #[serde(default)]
    field_type: FieldType,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SanitizeRequest {
    input: String,
    #[serde(default)]
    field_type: SanitizeField,
}

#[derive(Serialize)]
struct SanitizeResponse {
    sanitized: String,
}

#[derive(Deserialize)]
struct BatchSanitizeRequest {
    fields: BTreeMap<String, String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CharacterCountQuery {
    #[serde(default)]
    text: String,
    #[serde(default)]
    field_type: FieldType,
}

async fn validate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ValidateRequest>,
) -> AppResult<Json<ValidationResult>> {
    let result = state.filter.validate(req.text.as_deref(), req.field_type);
    match result.error {
        Some(error) => Err(AppError::Validation(error)),
        None => Ok(Json(result)),
    }
}

async fn sanitize(Json(req): Json<SanitizeRequest>) -> AppResult<Json<SanitizeResponse>> {
    let result = sanitize_input(&req.input, req.field_type);
    match result.error {
        Some(error) => Err(AppError::Validation(error)),
        None => Ok(Json(SanitizeResponse {
            sanitized: result.sanitized,
        })),
    }
}

async fn sanitize_fields(
    Json(req): Json<BatchSanitizeRequest>,
) -> (StatusCode, Json<BatchSanitizationResult>) {
    let result = sanitize_batch(&req.fields);
    let status = if result.is_valid {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(result))
}

async fn count_characters(Query(query): Query<CharacterCountQuery>) -> Json<CharacterCountInfo> {
    Json(character_count(&query.text, query.field_type))
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/validate", post(validate))
        .route("/sanitize", post(sanitize))
        .route("/sanitize/batch", post(sanitize_fields))
        .route("/character-count", get(count_characters))
        .with_state(state)
}
