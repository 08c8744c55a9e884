use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_friend_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_trainer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonNote {
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressBarName {
    pub name: String,
}
