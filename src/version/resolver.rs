//! Platform version resolver
//!
//! Turns the version patterns declared per platform into the concrete version ids
//! Hangar accepts. For each platform the resolver
//!
//! 1. picks the upstream governing it ([`Platform::candidate_source`]),
//! 2. matches every pattern against the upstream's candidates,
//! 3. translates the matches through the platform's alias table, if any,
//! 4. returns them deduplicated and sorted newest first.

use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, warn};

use crate::config::{ResolverConfig, VelocityCandidates};
use crate::platform::{CandidateSourceKind, Platform};
use crate::version::cache::{CandidateCache, CandidateList};
use crate::version::error::ResolveError;
use crate::version::matcher::PatternMatcher;
use crate::version::registries::{AliasTableSource, FillProjectSource, MojangManifestSource};
use crate::version::registry::VersionSource;
use crate::version::semver::sort_newest_first;

/// Resolves version patterns for Hangar platforms.
///
/// Owns one candidate cache per upstream; fetched lists live as long as the resolver.
pub struct VersionResolver {
    manifest: CandidateCache,
    fill: CandidateCache,
    velocity_candidates: VelocityCandidates,
    matcher: PatternMatcher,
}

impl VersionResolver {
    /// Create a resolver talking to the upstreams named in `config`
    pub fn new(config: &ResolverConfig) -> Self {
        let timeout = config.fetch_timeout();

        Self::with_sources(
            Arc::new(MojangManifestSource::new(&config.manifest_url, timeout)),
            Arc::new(FillProjectSource::new(&config.fill_base_url, timeout)),
            config.velocity_candidates,
        )
    }

    /// Create a resolver with the given upstream sources
    pub fn with_sources(
        manifest: Arc<dyn VersionSource>,
        fill: Arc<dyn VersionSource>,
        velocity_candidates: VelocityCandidates,
    ) -> Self {
        Self {
            manifest: CandidateCache::new(manifest),
            fill: CandidateCache::new(fill),
            velocity_candidates,
            matcher: PatternMatcher::default(),
        }
    }

    /// Resolve the patterns of every platform, in input order.
    ///
    /// Platforms are resolved one after another. The first fatal error aborts the
    /// whole batch and nothing resolved so far is returned.
    pub async fn resolve_all(
        &self,
        dependencies: &IndexMap<String, Vec<String>>,
    ) -> Result<IndexMap<String, Vec<String>>, ResolveError> {
        let mut resolved = IndexMap::with_capacity(dependencies.len());

        for (name, patterns) in dependencies {
            let versions = self.resolve_named(name, patterns.as_slice()).await?;
            resolved.insert(name.clone(), versions);
        }

        info!("Resolved version dependencies for {} platform(s)", resolved.len());
        Ok(resolved)
    }

    /// Resolve patterns for a platform given by its Hangar name (e.g. "PAPER")
    pub async fn resolve_named<S: AsRef<str>>(
        &self,
        name: &str,
        patterns: &[S],
    ) -> Result<Vec<String>, ResolveError> {
        let platform: Platform = name.parse()?;
        self.resolve(platform, patterns).await
    }

    /// Resolve patterns for one platform into Hangar version ids, newest first.
    ///
    /// An empty result means no pattern matched and is not an error.
    pub async fn resolve<S: AsRef<str>>(
        &self,
        platform: Platform,
        patterns: &[S],
    ) -> Result<Vec<String>, ResolveError> {
        let patterns: Vec<&str> = patterns.iter().map(|p| p.as_ref()).collect();
        debug!("Resolving platform dependencies for {}: {:?}", platform, patterns);

        let candidates = self.candidates(platform).await?;

        let matched: IndexSet<String> = patterns
            .iter()
            .flat_map(|pattern| self.matcher.matches(pattern, &candidates))
            .collect();

        let mut resolved: Vec<String> = match platform.alias_table() {
            Some(table) => matched
                .into_iter()
                .filter_map(|version| match table.to_platform_id(&version) {
                    Some(id) => Some(id.to_string()),
                    None => {
                        warn!(
                            "{} version {} has no Hangar equivalent, dropping it",
                            platform, version
                        );
                        None
                    }
                })
                .collect(),
            None => matched.into_iter().collect(),
        };

        sort_newest_first(&mut resolved);

        debug!(
            "Resolved patterns [{}] to {} versions: {:?}",
            patterns.join(", "),
            resolved.len(),
            resolved
        );
        Ok(resolved)
    }

    async fn candidates(&self, platform: Platform) -> Result<CandidateList, ResolveError> {
        let (cache, key) = match platform.candidate_source(self.velocity_candidates) {
            CandidateSourceKind::ReleaseManifest => (&self.manifest, ""),
            CandidateSourceKind::FillProject(project) => (&self.fill, project),
            CandidateSourceKind::AliasTable(table) => {
                let source = AliasTableSource::new(table);
                return source
                    .fetch_candidates(platform.as_str())
                    .await
                    .map(Arc::new)
                    .map_err(|source_error| ResolveError::Fetch {
                        platform,
                        upstream: source.name(),
                        source: source_error,
                    });
            }
        };

        cache.get(key).await.map_err(|source| ResolveError::Fetch {
            platform,
            upstream: cache.source_name(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::error::SourceError;
    use crate::version::registry::MockVersionSource;

    fn versions(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn source(name: &'static str) -> MockVersionSource {
        let mut source = MockVersionSource::new();
        source.expect_name().return_const(name);
        source
    }

    fn unused(name: &'static str) -> MockVersionSource {
        let mut source = source(name);
        source.expect_fetch_candidates().never();
        source
    }

    fn manifest_with(list: &'static [&'static str]) -> MockVersionSource {
        let mut manifest = source("mojang");
        manifest
            .expect_fetch_candidates()
            .times(1)
            .returning(move |_| Ok(versions(list)));
        manifest
    }

    fn resolver(manifest: MockVersionSource, fill: MockVersionSource) -> VersionResolver {
        VersionResolver::with_sources(
            Arc::new(manifest),
            Arc::new(fill),
            VelocityCandidates::AliasTable,
        )
    }

    #[tokio::test]
    async fn resolve_wildcard_pattern_returns_line_newest_first() {
        let resolver = resolver(manifest_with(&["1.19.1", "1.19.2", "1.18.2"]), unused("fill"));

        let result = resolver.resolve(Platform::Paper, &["1.19.x"]).await.unwrap();

        assert_eq!(result, vec!["1.19.2", "1.19.1"]);
    }

    #[tokio::test]
    async fn resolve_unions_and_deduplicates_patterns() {
        let resolver = resolver(
            manifest_with(&["1.21.1", "1.21", "1.20.6", "1.20.4", "1.19.4"]),
            unused("fill"),
        );

        let result = resolver
            .resolve(Platform::Paper, &["1.20.x", "1.20.6", ">=1.21"])
            .await
            .unwrap();

        assert_eq!(result, vec!["1.21.1", "1.21", "1.20.6", "1.20.4"]);
    }

    #[tokio::test]
    async fn resolve_falls_back_to_exact_match() {
        let resolver = resolver(manifest_with(&["1.21", "custom-build-7"]), unused("fill"));

        let result = resolver
            .resolve(Platform::Paper, &["custom-build-7"])
            .await
            .unwrap();

        assert_eq!(result, vec!["custom-build-7"]);
    }

    #[tokio::test]
    async fn resolve_unmatched_pattern_returns_empty() {
        let resolver = resolver(manifest_with(&["1.21.4", "1.20.6"]), unused("fill"));

        let result = resolver
            .resolve(Platform::Paper, &["99.99.99", "latest"])
            .await
            .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn resolve_velocity_translates_table_ids() {
        let resolver = resolver(unused("mojang"), unused("fill"));

        let result = resolver.resolve(Platform::Velocity, &["3.x"]).await.unwrap();

        assert_eq!(result, vec!["3.4", "3.3", "3.2", "3.1.1", "3.1.0", "3.0"]);
    }

    #[tokio::test]
    async fn resolve_velocity_from_fill_drops_unmapped_versions() {
        let mut fill = source("fill");
        fill.expect_fetch_candidates()
            .withf(|project| project == "velocity")
            .times(1)
            .returning(|_| Ok(versions(&["3.4.0", "3.3.0", "3.1.2", "3.0.0"])));

        let resolver = VersionResolver::with_sources(
            Arc::new(unused("mojang")),
            Arc::new(fill),
            VelocityCandidates::Fill,
        );

        let exact = resolver.resolve(Platform::Velocity, &["3.4.0"]).await.unwrap();
        let line = resolver.resolve(Platform::Velocity, &["3.x"]).await.unwrap();

        assert_eq!(exact, vec!["3.4"]);
        assert_eq!(line, vec!["3.4", "3.3", "3.0"]);
    }

    #[tokio::test]
    async fn resolve_reuses_cached_project_list() {
        let mut fill = source("fill");
        fill.expect_fetch_candidates()
            .withf(|project| project == "waterfall")
            .times(1)
            .returning(|_| Ok(versions(&["1.21", "1.20", "1.19"])));

        let resolver = resolver(unused("mojang"), fill);

        let first = resolver.resolve(Platform::Waterfall, &["1.21"]).await.unwrap();
        let second = resolver.resolve(Platform::Waterfall, &["1.19"]).await.unwrap();

        assert_eq!(first, vec!["1.21"]);
        assert_eq!(second, vec!["1.19"]);
    }

    #[tokio::test]
    async fn resolve_wraps_fetch_failure_with_platform_and_upstream() {
        let mut fill = source("fill");
        fill.expect_fetch_candidates()
            .times(1)
            .returning(|_| Err(SourceError::InvalidResponse("bad body".to_string())));

        let resolver = resolver(unused("mojang"), fill);

        let result = resolver.resolve(Platform::Waterfall, &["1.21"]).await;

        assert!(matches!(
            result,
            Err(ResolveError::Fetch {
                platform: Platform::Waterfall,
                upstream: "fill",
                source: SourceError::InvalidResponse(_),
            })
        ));
    }

    #[tokio::test]
    async fn resolve_named_rejects_unknown_platform_without_fetching() {
        let resolver = resolver(unused("mojang"), unused("fill"));

        let result = resolver.resolve_named("FOLIA", &["1.21"]).await;

        assert!(matches!(result, Err(ResolveError::UnknownPlatform(name)) if name == "FOLIA"));
    }

    #[tokio::test]
    async fn resolve_all_returns_platforms_in_input_order() {
        let mut fill = source("fill");
        fill.expect_fetch_candidates()
            .times(1)
            .returning(|_| Ok(versions(&["1.21", "1.20"])));

        let resolver = resolver(manifest_with(&["1.21.4", "1.20.6"]), fill);

        let dependencies = IndexMap::from([
            ("WATERFALL".to_string(), versions(&["1.20"])),
            ("PAPER".to_string(), versions(&["99.99.99"])),
            ("VELOCITY".to_string(), versions(&["3.4.0"])),
        ]);

        let result = resolver.resolve_all(&dependencies).await.unwrap();

        assert_eq!(
            result.into_iter().collect::<Vec<_>>(),
            vec![
                ("WATERFALL".to_string(), versions(&["1.20"])),
                ("PAPER".to_string(), Vec::new()),
                ("VELOCITY".to_string(), versions(&["3.4"])),
            ]
        );
    }

    #[tokio::test]
    async fn resolve_all_aborts_on_unknown_platform() {
        let resolver = resolver(manifest_with(&["1.21.4"]), unused("fill"));

        let dependencies = IndexMap::from([
            ("PAPER".to_string(), versions(&["1.21.x"])),
            ("FOLIA".to_string(), versions(&["1.21.x"])),
            ("WATERFALL".to_string(), versions(&["1.21"])),
        ]);

        let result = resolver.resolve_all(&dependencies).await;

        assert!(matches!(result, Err(ResolveError::UnknownPlatform(name)) if name == "FOLIA"));
    }
}
