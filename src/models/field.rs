use serde::{Deserialize, Deserializer, Serialize};

/// Field tags understood by the content filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Username,
    Bio,
    Notes,
    ProgressBar,
    #[default]
    General,
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Username => "username",
            FieldType::Bio => "bio",
            FieldType::Notes => "notes",
            FieldType::ProgressBar => "progressBar",
            FieldType::General => "general",
        }
    }

    // Unknown tags fall back to the general config
    pub fn parse(s: &str) -> Self {
        match s {
            "username" => FieldType::Username,
            "bio" => FieldType::Bio,
            "notes" => FieldType::Notes,
            "progressBar" => FieldType::ProgressBar,
            _ => FieldType::General,
        }
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(FieldType::parse(&tag))
    }
}

/// Field tags understood by the input sanitizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SanitizeField {
    Username,
    Email,
    Bio,
    Location,
    Gender,
    SwitchFriendCode,
    ProfileTrainer,
    Notes,
    #[default]
    General,
}

impl SanitizeField {
    pub fn as_str(&self) -> &str {
        match self {
            SanitizeField::Username => "username",
            SanitizeField::Email => "email",
            SanitizeField::Bio => "bio",
            SanitizeField::Location => "location",
            SanitizeField::Gender => "gender",
            SanitizeField::SwitchFriendCode => "switchFriendCode",
            SanitizeField::ProfileTrainer => "profileTrainer",
            SanitizeField::Notes => "notes",
            SanitizeField::General => "general",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "username" => SanitizeField::Username,
            "email" => SanitizeField::Email,
            "bio" => SanitizeField::Bio,
            "location" => SanitizeField::Location,
            "gender" => SanitizeField::Gender,
            "switchFriendCode" => SanitizeField::SwitchFriendCode,
            "profileTrainer" => SanitizeField::ProfileTrainer,
            "notes" => SanitizeField::Notes,
            _ => SanitizeField::General,
        }
    }

    /// The filter config applied after sanitizing, if the field carries free text.
    pub fn content_field(&self) -> Option<FieldType> {
        match self {
            SanitizeField::Username => Some(FieldType::Username),
            SanitizeField::Bio => Some(FieldType::Bio),
            SanitizeField::Notes => Some(FieldType::Notes),
            SanitizeField::Location
            | SanitizeField::Gender
            | SanitizeField::ProfileTrainer
            | SanitizeField::General => Some(FieldType::General),
            SanitizeField::Email | SanitizeField::SwitchFriendCode => None,
        }
    }
}

impl<'de> Deserialize<'de> for SanitizeField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(SanitizeField::parse(&tag))
    }
}
