use std::{fs, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::warn;

use crate::types::{BatchSize, DEFAULT_BATCH_SIZE};

pub const SETTINGS_FILE_NAME: &str = "random_feed.toml";
pub const DEFAULT_ENDPOINT: &str = "https://randomuser.me/api/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub endpoint: String,
    /// Transport timeout; `0` disables it.
    pub request_timeout_secs: u64,
    pub default_batch_size: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            default_batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    /// Configured default batch size, or the built-in default when it is out of range.
    pub fn batch_size(&self) -> BatchSize {
        match BatchSize::new(i64::from(self.default_batch_size)) {
            Ok(size) => size,
            Err(err) => {
                warn!("ignoring configured default batch size: {err}");
                BatchSize::default()
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    endpoint: Option<String>,
    request_timeout_secs: Option<u64>,
    default_batch_size: Option<u32>,
}

/// Defaults, then the first settings file found, then environment overrides.
pub fn load_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();

    for path in settings_file_candidates() {
        if let Ok(raw) = fs::read_to_string(&path) {
            apply_file_settings(&mut settings, &raw);
            break;
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn settings_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(SETTINGS_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("random_feed").join(SETTINGS_FILE_NAME));
    }
    candidates
}

fn apply_file_settings(settings: &mut ClientSettings, raw: &str) {
    let file_cfg = match toml::from_str::<FileSettings>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!("ignoring unreadable {SETTINGS_FILE_NAME}: {err}");
            return;
        }
    };

    if let Some(v) = file_cfg.endpoint {
        settings.endpoint = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.default_batch_size {
        settings.default_batch_size = v;
    }
}

fn apply_env_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("RANDOM_FEED_ENDPOINT") {
        settings.endpoint = v;
    }
    if let Some(v) = lookup("APP__ENDPOINT") {
        settings.endpoint = v;
    }

    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    if let Some(v) = lookup("APP__DEFAULT_BATCH_SIZE") {
        if let Ok(parsed) = v.trim().parse::<u32>() {
            settings.default_batch_size = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
