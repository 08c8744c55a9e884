use crate::models::field::{FieldType, SanitizeField};
use crate::models::profile::ProfileUpdate;
use crate::services::content_filter::ContentFilter;
use crate::services::sanitizer::sanitize_input;
use crate::utils::error::{AppError, AppResult};

/// Sanitize, then run the content filter on the cleaned value. First failure wins.
/// `filter_field` of `None` skips the filter for structured fields such as email.
pub fn moderate(
    filter: &ContentFilter,
    input: &str,
    sanitize_field: SanitizeField,
    filter_field: Option<FieldType>,
) -> AppResult<String> {
    let sanitized = sanitize_input(input, sanitize_field);
    if !sanitized.is_valid {
        return Err(AppError::Validation(sanitized.error.unwrap_or_else(|| {
            format!("Invalid {}", sanitize_field.as_str())
        })));
    }

    if let Some(field_type) = filter_field {
        filter.check(&sanitized.sanitized, field_type)?;
    }

    Ok(sanitized.sanitized)
}

/// Same as [`moderate`] using the filter config that matches the sanitizer field.
pub fn moderate_field(
    filter: &ContentFilter,
    input: &str,
    field: SanitizeField,
) -> AppResult<String> {
    moderate(filter, input, field, field.content_field())
}

pub fn moderate_optional(
    filter: &ContentFilter,
    input: Option<&str>,
    field: SanitizeField,
) -> AppResult<Option<String>> {
    input
        .map(|value| moderate_field(filter, value, field))
        .transpose()
}

pub fn moderate_profile(filter: &ContentFilter, update: &ProfileUpdate) -> AppResult<ProfileUpdate> {
    Ok(ProfileUpdate {
        username: moderate_optional(filter, update.username.as_deref(), SanitizeField::Username)?,
        bio: moderate_optional(filter, update.bio.as_deref(), SanitizeField::Bio)?,
        location: moderate_optional(filter, update.location.as_deref(), SanitizeField::Location)?,
        gender: moderate_optional(filter, update.gender.as_deref(), SanitizeField::Gender)?,
        switch_friend_code: moderate_optional(
            filter,
            update.switch_friend_code.as_deref(),
            SanitizeField::SwitchFriendCode,
        )?,
        profile_trainer: moderate_optional(
            filter,
            update.profile_trainer.as_deref(),
            SanitizeField::ProfileTrainer,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_fields_cleaned() {
        let update = ProfileUpdate {
            username: Some(" Misty ".to_string()),
            bio: Some("<i>Cerulean</i> gym leader".to_string()),
            switch_friend_code: Some("SW-0000-1111-2222".to_string()),
            ..Default::default()
        };
        let cleaned = moderate_profile(ContentFilter::builtin(), &update).unwrap();
        assert_eq!(cleaned.username.as_deref(), Some("Misty"));
        assert_eq!(cleaned.bio.as_deref(), Some("Cerulean gym leader"));
        assert_eq!(cleaned.location, None);
    }

    #[test]
    fn test_profile_first_failure_reported() {
        let update = ProfileUpdate {
            username: Some("ab".to_string()),
            gender: Some("<form>".to_string()),
            ..Default::default()
        };
        let err = moderate_profile(ContentFilter::builtin(), &update).unwrap_err();
        assert_eq!(message(err), "Username must be at least 3 characters long");
    }

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_clean_input_passes_both_stages() {
        let filter = ContentFilter::builtin();
        let value = moderate_field(filter, "  Brock_the_Rock  ", SanitizeField::Username).unwrap();
        assert_eq!(value, "Brock_the_Rock");
    }

    #[test]
    fn test_sanitizer_failure_short_circuits() {
        let filter = ContentFilter::builtin();
        let err = moderate_field(filter, "<script>x</script>n1gg3r", SanitizeField::Bio).unwrap_err();
        assert_eq!(message(err), "Bio contains potentially dangerous content");
    }

    #[test]
    fn test_filter_runs_on_sanitized_value() {
        let filter = ContentFilter::builtin();
        let err = moderate_field(filter, "<b>f a g g o t</b>", SanitizeField::Bio).unwrap_err();
        assert_eq!(message(err), "Bio contains inappropriate content");
    }

    #[test]
    fn test_multiline_bio_is_filtered() {
        let filter = ContentFilter::builtin();
        let err = moderate_field(filter, "Gym leader\nfuck you", SanitizeField::Bio).unwrap_err();
        assert_eq!(message(err), "Bio contains inappropriate content");
    }

    #[test]
    fn test_structured_fields_skip_filter() {
        let filter = ContentFilter::builtin();
        let value = moderate_field(filter, "SW-1234-5678-9012", SanitizeField::SwitchFriendCode)
            .unwrap();
        assert_eq!(value, "SW-1234-5678-9012");
    }

    #[test]
    fn test_progress_bar_uses_its_own_filter_config() {
        let filter = ContentFilter::builtin();
        let err = moderate(filter, "   ", SanitizeField::General, Some(FieldType::ProgressBar))
            .unwrap_err();
        assert_eq!(
            message(err),
            "Progress bar name must be at least 1 characters long"
        );
    }

    #[test]
    fn test_optional_absent_is_none() {
        let filter = ContentFilter::builtin();
        assert_eq!(
            moderate_optional(filter, None, SanitizeField::Bio).unwrap(),
            None
        );
    }
}
