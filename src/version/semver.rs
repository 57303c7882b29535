//! Version normalization and newest-first ordering
//!
//! Upstream version strings are not all valid semver: Mojang publishes ids like
//! `1.20` and Fill groups versions under labels like `1.21`. Everything that needs
//! to compare versions goes through [`normalize`] first.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use semver::Version;
use tracing::debug;

/// First `major[.minor[.patch]]` run in a string, not embedded in a longer digit run.
/// Components are capped at 16 digits so they always fit into a `u64`.
static COERCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d])(\d{1,16})(?:\.(\d{1,16}))?(?:\.(\d{1,16}))?(?:$|[^\d])")
        .expect("coercion pattern is valid")
});

/// Normalize a raw version string into a comparable three-component version.
///
/// Strict semver strings (including pre-release and build metadata) are returned as-is.
/// Anything else is coerced from its first numeric run, padding missing components
/// with zero:
///
/// - "1.20.4" -> 1.20.4
/// - "1.20" -> 1.20.0
/// - "1" -> 1.0.0
/// - "v1.2.3-beta" -> 1.2.3-beta
/// - "b1.7.3" -> 1.7.3
/// - "latest" -> None
pub fn normalize(raw: &str) -> Option<Version> {
    if let Ok(version) = Version::parse(strip_prefix(raw.trim())) {
        return Some(version);
    }

    let normalized = coerce(raw);
    if normalized.is_none() {
        debug!("Could not normalize version to semver: {}", raw);
    }
    normalized
}

/// Strip one leading `=` or `v` the way loose semver parsers accept it
fn strip_prefix(raw: &str) -> &str {
    let raw = raw.strip_prefix('=').unwrap_or(raw).trim_start();
    raw.strip_prefix(['v', 'V']).unwrap_or(raw)
}

fn coerce(raw: &str) -> Option<Version> {
    let captures = COERCE_RE.captures(raw)?;
    let component = |index: usize| -> Option<u64> {
        match captures.get(index) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    Some(Version::new(component(1)?, component(2)?, component(3)?))
}

/// Ordering that sorts version strings newest first.
///
/// Strings that normalize are compared by their normalized form and always precede
/// strings that don't. Equal normalized versions and non-normalizable strings fall
/// back to reverse byte order, so the result is a total order and sorting is
/// deterministic for a fixed input set.
///
/// A mixed pair is never compared by raw bytes: plain reverse byte order for it would
/// make the ordering intransitive (`"9.0"`, `"10.0"` and an unparsable id can form a
/// cycle), so the normalizable string always wins.
pub fn compare_newest_first(a: &str, b: &str) -> Ordering {
    match (normalize(a), normalize(b)) {
        (Some(va), Some(vb)) => vb.cmp(&va).then_with(|| b.cmp(a)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.cmp(a),
    }
}

/// Sort version strings newest first, see [`compare_newest_first`]
pub fn sort_newest_first(versions: &mut [String]) {
    versions.sort_by(|a, b| compare_newest_first(a, b));
}
