use std::{collections::VecDeque, sync::Mutex};

use async_trait::async_trait;
use shared::protocol::{RawLocation, RawLogin, RawName, RawPicture, RawProfile};
use uuid::Uuid;

use crate::{BatchSize, FetchError, ProfileSource};

pub fn raw_profile(seed: u32) -> RawProfile {
    RawProfile {
        name: RawName {
            title: Some("Mx".to_string()),
            first: format!("First{seed}"),
            last: format!("Last{seed}"),
        },
        email: format!("user{seed}@example.com"),
        picture: RawPicture {
            large: format!("https://randomuser.me/api/portraits/women/{seed}.jpg"),
            medium: format!("https://randomuser.me/api/portraits/med/women/{seed}.jpg"),
            thumbnail: None,
        },
        location: Some(RawLocation {
            city: Some(format!("City{seed}")),
            country: Some("Norway".to_string()),
        }),
        login: RawLogin {
            uuid: Uuid::from_u128(u128::from(seed) + 1),
        },
    }
}

pub fn raw_batch(start: u32, count: u32) -> Vec<RawProfile> {
    (start..start + count).map(raw_profile).collect()
}

/// Replays queued outcomes and records every requested count.
#[derive(Default)]
pub struct ScriptedSource {
    outcomes: Mutex<VecDeque<Result<Vec<RawProfile>, FetchError>>>,
    calls: Mutex<Vec<u32>>,
}

impl ScriptedSource {
    pub fn with_outcomes(
        outcomes: impl IntoIterator<Item = Result<Vec<RawProfile>, FetchError>>,
    ) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ProfileSource for ScriptedSource {
    async fn fetch_profiles(&self, count: BatchSize) -> Result<Vec<RawProfile>, FetchError> {
        self.calls.lock().expect("calls lock").push(count.get());
        self.outcomes
            .lock()
            .expect("outcomes lock")
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("no scripted outcome".to_string())))
    }
}
