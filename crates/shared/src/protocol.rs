use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Upstream hard limit on `results` per request.
pub const MAX_RESULTS_PER_REQUEST: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomUserResponse {
    pub results: Vec<RawProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ResponseInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseInfo {
    #[serde(default)]
    pub seed: String,
    #[serde(default)]
    pub results: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawProfile {
    pub name: RawName,
    pub email: String,
    pub picture: RawPicture,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<RawLocation>,
    pub login: RawLogin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawName {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPicture {
    pub large: String,
    pub medium: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLogin {
    pub uuid: Uuid,
}
