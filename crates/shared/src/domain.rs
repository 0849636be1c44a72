use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::protocol::{RawLocation, RawProfile};

/// Upstream-assigned identity. Not unique across fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub Uuid);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PictureSet {
    pub large: String,
    pub medium: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
}

impl Location {
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub picture: PictureSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Card-sized picture.
    pub fn picture_url(&self) -> &str {
        &self.picture.medium
    }
}

impl From<RawProfile> for Profile {
    fn from(raw: RawProfile) -> Self {
        Self {
            id: ProfileId(raw.login.uuid),
            first_name: raw.name.first,
            last_name: raw.name.last,
            email: raw.email,
            picture: PictureSet {
                large: raw.picture.large,
                medium: raw.picture.medium,
                thumbnail: raw.picture.thumbnail,
            },
            location: raw.location.and_then(location_from_raw),
        }
    }
}

fn location_from_raw(raw: RawLocation) -> Option<Location> {
    let city = raw.city.filter(|city| !city.trim().is_empty())?;
    let country = raw.country.filter(|country| !country.trim().is_empty())?;
    Some(Location { city, country })
}
