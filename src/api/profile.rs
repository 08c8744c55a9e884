use axum::{Json, Router, extract::State, routing::post};
use std::sync::Arc;

use crate::api::AppState;
use crate::models::field::{FieldType, SanitizeField};
use crate::models::profile::{PokemonNote, ProfileUpdate, ProgressBarName};
use crate::services::moderation::{moderate, moderate_field, moderate_profile};
use crate::utils::error::AppResult;

async fn validate_profile(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ProfileUpdate>,
) -> AppResult<Json<ProfileUpdate>> {
    let cleaned = moderate_profile(&state.filter, &update)?;
    Ok(Json(cleaned))
}

async fn validate_note(
    State(state): State<Arc<AppState>>,
    Json(note): Json<PokemonNote>,
) -> AppResult<Json<PokemonNote>> {
    let notes = moderate_field(&state.filter, &note.notes, SanitizeField::Notes)?;
    Ok(Json(PokemonNote { notes }))
}

async fn validate_progress_bar(
    State(state): State<Arc<AppState>>,
    Json(bar): Json<ProgressBarName>,
) -> AppResult<Json<ProgressBarName>> {
    let name = moderate(
        &state.filter,
        &bar.name,
        SanitizeField::General,
        Some(FieldType::ProgressBar),
    )?;
    Ok(Json(ProgressBarName { name }))
}

pub fn routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/profile/validate", post(validate_profile))
        .route("/pokemon/notes/validate", post(validate_note))
        .route("/progress-bars/validate", post(validate_progress_bar))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::api::test_support::post_json;

    #[tokio::test]
    async fn test_profile_cleaned() {
        let (status, body) = post_json(
            "/profile/validate",
            json!({
                "username": "  AshK  ",
                "bio": "<p>Gotta catch em all</p>",
                "switchFriendCode": "SW-1234-5678-9012"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "username": "AshK",
                "bio": "Gotta catch em all",
                "switchFriendCode": "SW-1234-5678-9012"
            })
        );
    }

    #[tokio::test]
    async fn test_profile_rejects_bad_bio() {
        let (status, body) = post_json("/profile/validate", json!({ "bio": "n1gg3r" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Bio contains inappropriate content" }));
    }

    #[tokio::test]
    async fn test_username_charset_rejected() {
        let (status, body) = post_json("/profile/validate", json!({ "username": "ash#1" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Username contains invalid characters" }));
    }

    #[tokio::test]
    async fn test_note_validated() {
        let (status, body) =
            post_json("/pokemon/notes/validate", json!({ "notes": "Shiny from Masuda" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "notes": "Shiny from Masuda" }));

        let (status, _) = post_json(
            "/pokemon/notes/validate",
            json!({ "notes": "x".repeat(201) }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_progress_bar_name() {
        let (status, body) =
            post_json("/progress-bars/validate", json!({ "name": "Johto Dex" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "name": "Johto Dex" }));

        let (status, body) = post_json(
            "/progress-bars/validate",
            json!({ "name": "a".repeat(31) }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "Progress bar name must be no more than 30 characters long" })
        );
    }
}
