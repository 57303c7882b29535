//! Source trait for fetching candidate version lists from upstream services

#[cfg(test)]
use mockall::automock;

use crate::version::error::SourceError;

/// Trait for fetching the known versions of a platform family
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionSource: Send + Sync {
    /// Short name of the upstream, used in errors and logs (e.g. "mojang", "fill")
    fn name(&self) -> &'static str;

    /// Fetches all release versions for a key, without caching
    ///
    /// # Arguments
    /// * `key` - Project name for multi-project upstreams, ignored by single-list upstreams
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Release versions, ordered from newest to oldest
    /// * `Err(SourceError)` - If the fetch fails
    async fn fetch_candidates(&self, key: &str) -> Result<Vec<String>, SourceError>;
}
