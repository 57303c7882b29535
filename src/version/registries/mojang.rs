//! Mojang version manifest implementation

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::version::error::SourceError;
use crate::version::registries::{get_json, http_client};
use crate::version::registry::VersionSource;

/// Release channel of stable game versions
const RELEASE_TYPE: &str = "release";

/// Response from the version manifest
#[derive(Debug, Deserialize)]
struct VersionManifest {
    versions: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestEntry {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    release_time: String,
}

impl ManifestEntry {
    fn parsed_release_time(&self) -> Option<DateTime<Utc>> {
        match DateTime::parse_from_rfc3339(&self.release_time) {
            Ok(time) => Some(time.with_timezone(&Utc)),
            Err(e) => {
                warn!(
                    "Invalid release time for {}: {} ({})",
                    self.id, self.release_time, e
                );
                None
            }
        }
    }
}

/// Source of Minecraft release versions, the authority for Paper targets
pub struct MojangManifestSource {
    client: reqwest::Client,
    url: String,
}

impl MojangManifestSource {
    /// Creates a new MojangManifestSource for a custom manifest URL
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            url: url.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl VersionSource for MojangManifestSource {
    fn name(&self) -> &'static str {
        "mojang"
    }

    /// Release ids sorted by release time, newest first. Snapshots, betas and
    /// alphas are dropped. Releases with an unreadable release time go last.
    /// The key is ignored since there is a single manifest.
    async fn fetch_candidates(&self, _key: &str) -> Result<Vec<String>, SourceError> {
        let manifest: VersionManifest = get_json(&self.client, &self.url).await?;

        let mut releases: Vec<(Option<DateTime<Utc>>, String)> = manifest
            .versions
            .into_iter()
            .filter(|v| v.kind == RELEASE_TYPE)
            .map(|v| (v.parsed_release_time(), v.id))
            .collect();

        // None sorts below every timestamp, so descending order puts it last
        releases.sort_by(|(a, _), (b, _)| b.cmp(a));

        Ok(releases.into_iter().map(|(_, id)| id).collect())
    }
}
