//! Upstream implementations for fetching candidate versions

pub mod alias_table;
pub mod fill;
pub mod mojang;

pub use alias_table::AliasTableSource;
pub use fill::FillProjectSource;
pub use mojang::MojangManifestSource;

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::USER_AGENT;
use crate::version::error::SourceError;

/// Build the HTTP client shared by a source; every request is bounded by `timeout`
fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client")
}

/// GET a JSON document, mapping non-success statuses and undecodable bodies to errors
async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, SourceError> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!("Upstream returned status {}: {}", status, url);
        return Err(SourceError::Status {
            status,
            url: url.to_string(),
        });
    }

    response.json().await.map_err(|e| {
        warn!("Failed to parse response from {}: {}", url, e);
        SourceError::InvalidResponse(e.to_string())
    })
}
