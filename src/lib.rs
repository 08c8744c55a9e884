pub mod api;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

pub use models::field::{FieldType, SanitizeField};
pub use models::validation::{
    BatchSanitizationResult, CharacterCountInfo, SanitizationResult, ValidationResult,
};
pub use services::content_filter::{
    ContentFilter, MatchPolicy, character_count, contains_banned_content, validate_content,
};
pub use services::sanitizer::{sanitize_batch, sanitize_input};
