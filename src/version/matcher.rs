//! Pattern matching against candidate version lists
//!
//! A pattern is tried against an ordered chain of strategies; the first strategy that
//! produces at least one match wins:
//!
//! 1. [`RangeStrategy`]: the pattern as a range expression (`1.19.x`, `>=1.20`, `1.21.4`)
//! 2. [`ExactStrategy`]: byte-exact comparison with the raw pattern (`custom-build-7`)

use tracing::{debug, warn};

use crate::version::range::VersionRange;
use crate::version::semver::normalize;

/// One way of matching a pattern against candidates
pub trait MatchStrategy: Send + Sync {
    /// Returns the matching candidates, or None if this strategy matched nothing
    ///
    /// # Arguments
    /// * `pattern` - The pattern exactly as the user wrote it
    /// * `candidates` - Known versions in upstream order
    fn try_match(&self, pattern: &str, candidates: &[String]) -> Option<Vec<String>>;
}

/// Matches candidates whose normalized version satisfies the pattern as a range
pub struct RangeStrategy;

impl MatchStrategy for RangeStrategy {
    fn try_match(&self, pattern: &str, candidates: &[String]) -> Option<Vec<String>> {
        let expr = preprocess_pattern(pattern);
        let Some(range) = VersionRange::parse(&expr) else {
            debug!("Pattern '{}' is not a valid semver range", expr);
            return None;
        };

        let matches: Vec<String> = candidates
            .iter()
            .filter(|candidate| {
                normalize(candidate).is_some_and(|version| range.satisfies(&version))
            })
            .cloned()
            .collect();

        (!matches.is_empty()).then_some(matches)
    }
}

/// Matches candidates equal to the unmodified pattern
pub struct ExactStrategy;

impl MatchStrategy for ExactStrategy {
    fn try_match(&self, pattern: &str, candidates: &[String]) -> Option<Vec<String>> {
        let matches: Vec<String> = candidates
            .iter()
            .filter(|candidate| candidate.as_str() == pattern)
            .cloned()
            .collect();

        (!matches.is_empty()).then_some(matches)
    }
}

/// Rewrite user shorthand into a range expression.
///
/// - "1.19.x" -> "1.19.*"
/// - patterns containing "latest" are unsupported and returned unchanged
pub fn preprocess_pattern(pattern: &str) -> String {
    if let Some(base) = pattern.strip_suffix(".x") {
        return format!("{base}.*");
    }

    if pattern.contains("latest") {
        warn!("'latest' pattern not supported in semver, treating as exact match");
    }

    pattern.to_string()
}

/// Resolves a single pattern against a candidate list
pub struct PatternMatcher {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl PatternMatcher {
    /// Create a matcher with a custom strategy chain
    pub fn new(strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
        Self { strategies }
    }

    /// Returns the candidates matching `pattern`, preserving their original spelling
    /// and order. An empty result is logged and is not an error.
    pub fn matches(&self, pattern: &str, candidates: &[String]) -> Vec<String> {
        let matched = self
            .strategies
            .iter()
            .find_map(|strategy| strategy.try_match(pattern, candidates));

        match matched {
            Some(versions) => versions,
            None => {
                warn!("No matches found for version pattern: {}", pattern);
                Vec::new()
            }
        }
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new(vec![Box::new(RangeStrategy), Box::new(ExactStrategy)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn candidates(versions: &[&str]) -> Vec<String> {
        versions.iter().map(|v| v.to_string()).collect()
    }

    #[rstest]
    #[case("1.19.x", "1.19.*")]
    #[case("1.x", "1.*")]
    #[case("1.20.4", "1.20.4")]
    #[case("latest", "latest")]
    #[case("1.21.x-latest", "1.21.x-latest")]
    fn preprocess_pattern_returns_expected(#[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(preprocess_pattern(pattern), expected);
    }

    #[test]
    fn wildcard_pattern_matches_every_patch_of_the_line() {
        let result = PatternMatcher::default()
            .matches("1.19.x", &candidates(&["1.19.1", "1.19.2", "1.18.2"]));

        assert_eq!(result, vec!["1.19.1", "1.19.2"]);
    }

    #[test]
    fn range_match_returns_original_spelling() {
        let result = PatternMatcher::default()
            .matches("1.20.x", &candidates(&["1.20", "1.20.1", "1.21"]));

        assert_eq!(result, vec!["1.20", "1.20.1"]);
    }

    #[test]
    fn wildcard_pattern_skips_prefixed_prerelease() {
        let result = PatternMatcher::default()
            .matches("1.2.x", &candidates(&["v1.2.3-beta", "v1.2.2", "1.2.1"]));

        assert_eq!(result, vec!["v1.2.2", "1.2.1"]);
    }

    #[test]
    fn exact_version_pattern_matches_shorter_upstream_id() {
        // "1.20" normalizes to 1.20.0
        let result =
            PatternMatcher::default().matches("1.20.0", &candidates(&["1.20", "1.20.1"]));

        assert_eq!(result, vec!["1.20"]);
    }

    #[test]
    fn falls_back_to_exact_match_for_non_range_pattern() {
        let result = PatternMatcher::default().matches(
            "custom-build-7",
            &candidates(&["1.0.0", "custom-build-7", "custom-build-8"]),
        );

        assert_eq!(result, vec!["custom-build-7"]);
    }

    #[test]
    fn falls_back_to_exact_match_when_range_matches_nothing() {
        // "<1.0.0" is a valid range; the literal candidate coerces to 1.0.0 and
        // does not satisfy it
        let result =
            PatternMatcher::default().matches("<1.0.0", &candidates(&["1.0.0", "<1.0.0"]));

        assert_eq!(result, vec!["<1.0.0"]);
    }

    #[test]
    fn latest_pattern_only_matches_literally() {
        let matcher = PatternMatcher::default();

        assert!(matcher.matches("latest", &candidates(&["1.21.4", "1.21.3"])).is_empty());
        assert_eq!(
            matcher.matches("latest", &candidates(&["1.21.4", "latest"])),
            vec!["latest"]
        );
    }

    #[rstest]
    #[case("99.99.99", &["1.21.4", "1.20.6"])]
    #[case("1.19.x", &["1.21.4", "1.20.6"])]
    #[case("nope", &[])]
    fn unmatched_pattern_returns_empty(#[case] pattern: &str, #[case] available: &[&str]) {
        assert!(PatternMatcher::default()
            .matches(pattern, &candidates(available))
            .is_empty());
    }

    #[test]
    fn first_successful_strategy_wins() {
        struct Fixed(&'static str);

        impl MatchStrategy for Fixed {
            fn try_match(&self, _pattern: &str, _candidates: &[String]) -> Option<Vec<String>> {
                Some(vec![self.0.to_string()])
            }
        }

        struct Nothing;

        impl MatchStrategy for Nothing {
            fn try_match(&self, _pattern: &str, _candidates: &[String]) -> Option<Vec<String>> {
                None
            }
        }

        let matcher = PatternMatcher::new(vec![
            Box::new(Nothing),
            Box::new(Fixed("first")),
            Box::new(Fixed("second")),
        ]);

        assert_eq!(matcher.matches("anything", &[]), vec!["first"]);
    }
}
