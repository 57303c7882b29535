use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// Upstream constants
// =============================================================================

/// Mojang's version manifest, the authority for Minecraft releases
pub const DEFAULT_MANIFEST_URL: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// PaperMC's Fill API serving paper, waterfall and velocity
pub const DEFAULT_FILL_BASE_URL: &str = "https://fill.papermc.io";

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// User agent sent with every upstream request
pub const USER_AGENT: &str = concat!("hangar-versions/", env!("CARGO_PKG_VERSION"));

/// Where Velocity candidates are taken from
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VelocityCandidates {
    /// Only the ids the Velocity alias table can translate
    #[default]
    AliasTable,
    /// The full Fill release list for the velocity project
    Fill,
}

/// Resolver configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    pub manifest_url: String,
    pub fill_base_url: String,
    /// Upper bound for a single upstream request in milliseconds
    pub fetch_timeout_ms: u64,
    pub velocity_candidates: VelocityCandidates,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            fill_base_url: DEFAULT_FILL_BASE_URL.to_string(),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            velocity_candidates: VelocityCandidates::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ResolverConfig {
    /// Load a JSON config file; fields missing from the file keep their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}
