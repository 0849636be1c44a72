//! Backend commands queued from UI to backend worker.

use client_core::FetchRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    FetchProfiles { request: FetchRequest },
    FetchPicture { url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::FetchProfiles { .. } => "fetch_profiles",
            BackendCommand::FetchPicture { .. } => "fetch_picture",
        }
    }
}
