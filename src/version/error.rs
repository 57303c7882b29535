use thiserror::Error;

use crate::platform::Platform;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Unrecognized platform: {0}")]
    UnknownPlatform(String),

    #[error("Could not fetch {platform} versions from {upstream}: {source}")]
    Fetch {
        platform: Platform,
        upstream: &'static str,
        #[source]
        source: SourceError,
    },
}
