//! PaperMC Fill project API implementation

use std::time::Duration;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::version::error::SourceError;
use crate::version::registries::{get_json, http_client};
use crate::version::registry::VersionSource;
use crate::version::semver::{normalize, sort_newest_first};

/// Project whose major-version labels are themselves valid targets
const MAJOR_LABEL_PROJECT: &str = "velocity";

/// Substrings marking pre-release channels, matched case-sensitively
const PRERELEASE_MARKERS: &[&str] = &["pre", "rc", "snapshot"];

/// Response from `/v3/projects/{project}`
#[derive(Debug, Deserialize)]
struct ProjectResponse {
    /// Major version label -> versions of that line
    versions: IndexMap<String, Vec<String>>,
}

/// Source for projects served by Fill (paper, waterfall, velocity, ...)
pub struct FillProjectSource {
    client: reqwest::Client,
    base_url: String,
}

impl FillProjectSource {
    /// Creates a new FillProjectSource with a custom base URL
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: http_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn is_release(version: &str) -> bool {
        !PRERELEASE_MARKERS
            .iter()
            .any(|marker| version.contains(marker))
    }
}

#[async_trait::async_trait]
impl VersionSource for FillProjectSource {
    fn name(&self) -> &'static str {
        "fill"
    }

    async fn fetch_candidates(&self, project: &str) -> Result<Vec<String>, SourceError> {
        let url = format!("{}/v3/projects/{}", self.base_url, project);
        let response: ProjectResponse = get_json(&self.client, &url).await?;

        let include_labels = project == MAJOR_LABEL_PROJECT;

        let mut versions: Vec<String> = response
            .versions
            .into_iter()
            .flat_map(|(label, versions)| {
                let label = include_labels.then_some(label);
                versions.into_iter().chain(label)
            })
            .filter(|v| Self::is_release(v))
            .filter(|v| normalize(v).is_some())
            .collect();

        sort_newest_first(&mut versions);

        Ok(versions)
    }
}
