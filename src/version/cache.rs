//! In-memory candidate cache
//!
//! Each [`CandidateCache`] wraps one [`VersionSource`] and keeps the first successful
//! fetch per key for as long as the cache lives. Entries are never refreshed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, info};

use crate::version::error::SourceError;
use crate::version::registry::VersionSource;

/// Ordered, immutable list of known versions for one platform family
pub type CandidateList = Arc<Vec<String>>;

pub struct CandidateCache {
    source: Arc<dyn VersionSource>,
    entries: Mutex<HashMap<String, Arc<OnceCell<CandidateList>>>>,
}

impl CandidateCache {
    pub fn new(source: Arc<dyn VersionSource>) -> Self {
        Self {
            source,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Name of the wrapped upstream
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Get the candidates for a key, fetching them on first use.
    ///
    /// Concurrent callers for the same key share a single in-flight fetch. A failed
    /// fetch leaves the entry empty so the next call goes to the network again.
    pub async fn get(&self, key: &str) -> Result<CandidateList, SourceError> {
        let cache_key = key.to_lowercase();

        let cell = {
            let mut entries = self.entries.lock().await;
            entries.entry(cache_key.clone()).or_default().clone()
        };

        if let Some(candidates) = cell.get() {
            debug!("Using cached {} versions for '{}'", self.source.name(), cache_key);
            return Ok(candidates.clone());
        }

        let candidates = cell
            .get_or_try_init(|| async {
                debug!("Fetching {} versions for '{}'", self.source.name(), cache_key);
                let versions = self.source.fetch_candidates(&cache_key).await?;
                info!(
                    "Cached {} {} versions for '{}'",
                    versions.len(),
                    self.source.name(),
                    cache_key
                );
                Ok::<_, SourceError>(Arc::new(versions))
            })
            .await?;

        Ok(candidates.clone())
    }
}
