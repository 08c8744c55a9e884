use thiserror::Error;

/// Every way a piece of user text can be refused. `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentViolation {
    #[error("{field} must be at least {min} characters long")]
    TooShort { field: String, min: usize },

    #[error("{field} must be no more than {max} characters long")]
    TooLong { field: String, max: usize },

    #[error("{field} contains invalid characters{}", describe(.description))]
    InvalidCharacters {
        field: String,
        description: Option<String>,
    },

    // Deliberately silent about which rule matched
    #[error("{field} contains inappropriate content")]
    BannedContent { field: String },

    #[error("{field} contains potentially dangerous content")]
    DangerousContent { field: String },
}

fn describe(description: &Option<String>) -> String {
    match description {
        Some(text) => format!(". {}", text),
        None => String::new(),
    }
}

impl ContentViolation {
    pub fn kind(&self) -> &'static str {
        match self {
            ContentViolation::TooShort { .. } | ContentViolation::TooLong { .. } => "length",
            ContentViolation::InvalidCharacters { .. } => "charset",
            ContentViolation::BannedContent { .. } => "banned_content",
            ContentViolation::DangerousContent { .. } => "injection_pattern",
        }
    }
}

pub fn check_length(
    field: &str,
    text: &str,
    min: usize,
    max: usize,
) -> Result<(), ContentViolation> {
    let length = text.chars().count();

    if length < min {
        return Err(ContentViolation::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if length > max {
        return Err(ContentViolation::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}
