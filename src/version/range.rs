//! Version range expressions
//!
//! Supports the npm-style range grammar:
//! - `1.2.3`, `=1.2.3`, `v1.2.3` - exact match
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0)
//! - `~1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `1.2.x`, `1.2.*`, `1.x`, `1.2`, `1`, `*` - wildcards and partial versions
//! - `1.2.3 - 2.3.4` - hyphen ranges
//! - `>=1.0.0 <2.0.0` - space separated, all must satisfy
//! - `^1.0.0 || ^2.0.0` - any must satisfy
//!
//! Every form is lowered to primitive comparators, so matching only ever compares
//! two full versions.

use std::cmp::Ordering;

use semver::{Prerelease, Version};

/// A parsed range expression: a union of comparator sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    sets: Vec<ComparatorSet>,
}

impl VersionRange {
    /// Parse a range expression, returning None if it is not syntactically valid
    pub fn parse(expr: &str) -> Option<Self> {
        let sets = expr
            .split("||")
            .map(ComparatorSet::parse)
            .collect::<Option<Vec<_>>>()?;

        Some(Self { sets })
    }

    /// Check if a version satisfies any of the comparator sets
    pub fn satisfies(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| set.satisfies(version))
    }
}

/// Comparators that must all hold. An empty set matches any release version.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComparatorSet(Vec<Comparator>);

impl ComparatorSet {
    fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();

        if let Some((from, to)) = spec.split_once(" - ") {
            let from = PartialVersion::parse(from.trim())?;
            let to = PartialVersion::parse(to.trim())?;
            return Some(Self(hyphen(&from, &to)));
        }

        let mut comparators = Vec::new();
        for token in Self::split_and_parts(spec) {
            comparators.extend(parse_primitive(&token)?);
        }

        Some(Self(comparators))
    }

    /// Split on whitespace, gluing a bare operator (`>= 1.2`) to its operand
    fn split_and_parts(spec: &str) -> Vec<String> {
        let mut parts = Vec::new();
        let mut pending_operator: Option<&str> = None;

        for word in spec.split_whitespace() {
            match pending_operator.take() {
                Some(operator) => parts.push(format!("{operator}{word}")),
                None if OPERATORS.contains(&word) => pending_operator = Some(word),
                None => parts.push(word.to_string()),
            }
        }

        // dangling operator, rejected by parse_primitive
        if let Some(operator) = pending_operator {
            parts.push(operator.to_string());
        }

        parts
    }

    fn satisfies(&self, version: &Version) -> bool {
        if !self.0.iter().all(|c| c.matches(version)) {
            return false;
        }

        if version.pre.is_empty() {
            return true;
        }

        // A pre-release only matches when the range opts into pre-releases of the
        // same major.minor.patch
        self.0.iter().any(|c| {
            !c.version.pre.is_empty()
                && c.version.major == version.major
                && c.version.minor == version.minor
                && c.version.patch == version.patch
        })
    }
}

/// Operators, longest first so prefixes are stripped greedily
const OPERATORS: &[&str] = &[">=", "<=", "~>", ">", "<", "=", "~", "^"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    fn matches(&self, version: &Version) -> bool {
        let ordering = precedence(version, &self.version);
        match self.op {
            Op::Eq => ordering == Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
        }
    }
}

/// Semver precedence, which ignores build metadata
fn precedence(a: &Version, b: &Version) -> Ordering {
    a.major
        .cmp(&b.major)
        .then(a.minor.cmp(&b.minor))
        .then(a.patch.cmp(&b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}

/// A version whose trailing components may be missing or wildcards (`None`)
#[derive(Debug, Clone, PartialEq, Eq)]
struct PartialVersion {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl PartialVersion {
    fn parse(spec: &str) -> Option<Self> {
        let spec = spec
            .strip_prefix('=')
            .unwrap_or(spec)
            .trim_start_matches(['v', 'V']);

        let (spec, _build) = spec.split_once('+').unwrap_or((spec, ""));
        let (core, pre) = match spec.split_once('-') {
            Some((core, pre)) => (core, Prerelease::new(pre).ok()?),
            None => (spec, Prerelease::EMPTY),
        };

        let mut parts = core.split('.');
        let major = parse_component(parts.next()?)?;
        let minor = parts.next().map(parse_component).unwrap_or(Some(None))?;
        let patch = parts.next().map(parse_component).unwrap_or(Some(None))?;
        if parts.next().is_some() {
            return None;
        }

        // a wildcard swallows everything after it (1.x.3 is 1.x)
        let minor = major.and(minor);
        let patch = minor.and(patch);

        if patch.is_none() && !pre.is_empty() {
            return None;
        }

        Some(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// The full version, with missing components as zero
    fn floor(&self) -> Version {
        let mut version = Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        version.pre = self.pre.clone();
        version
    }
}

/// Parse a single version component: a number, or `None` for a wildcard
fn parse_component(part: &str) -> Option<Option<u64>> {
    match part {
        "x" | "X" | "*" => Some(None),
        _ if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) => {
            part.parse().ok().map(Some)
        }
        _ => None,
    }
}

/// Lowest version of a release line, so `<` excludes its pre-releases too
fn lower_bound(major: u64, minor: u64, patch: u64) -> Version {
    let mut version = Version::new(major, minor, patch);
    version.pre = Prerelease::new("0").unwrap_or(Prerelease::EMPTY);
    version
}

fn parse_primitive(token: &str) -> Option<Vec<Comparator>> {
    let (operator, rest) = OPERATORS
        .iter()
        .find_map(|op| token.strip_prefix(op).map(|rest| (*op, rest)))
        .unwrap_or(("", token));

    let partial = PartialVersion::parse(rest)?;

    Some(match operator {
        "^" => caret(&partial),
        "~" | "~>" => tilde(&partial),
        ">" => comparison(Op::Gt, &partial),
        ">=" => comparison(Op::Gte, &partial),
        "<" => comparison(Op::Lt, &partial),
        "<=" => comparison(Op::Lte, &partial),
        _ => x_range(&partial),
    })
}

/// `1.2.3` exact, `1.2` / `1.2.x` any patch, `1` / `1.x` any minor, `*` anything
fn x_range(p: &PartialVersion) -> Vec<Comparator> {
    match (p.major, p.minor, p.patch) {
        (None, _, _) => Vec::new(),
        (Some(major), None, _) => vec![
            Comparator::new(Op::Gte, Version::new(major, 0, 0)),
            Comparator::new(Op::Lt, lower_bound(major.saturating_add(1), 0, 0)),
        ],
        (Some(major), Some(minor), None) => vec![
            Comparator::new(Op::Gte, Version::new(major, minor, 0)),
            Comparator::new(Op::Lt, lower_bound(major, minor.saturating_add(1), 0)),
        ],
        (Some(_), Some(_), Some(_)) => vec![Comparator::new(Op::Eq, p.floor())],
    }
}

fn comparison(op: Op, p: &PartialVersion) -> Vec<Comparator> {
    let (Some(major), minor, patch) = (p.major, p.minor, p.patch) else {
        return match op {
            // >* and <* can never be satisfied
            Op::Gt | Op::Lt => vec![Comparator::new(Op::Lt, lower_bound(0, 0, 0))],
            _ => Vec::new(),
        };
    };

    if patch.is_some() {
        return vec![Comparator::new(op, p.floor())];
    }

    // Next release line after the partial version
    let next = match minor {
        None => (major.saturating_add(1), 0),
        Some(minor) => (major, minor.saturating_add(1)),
    };
    let minor = minor.unwrap_or(0);

    match op {
        Op::Gt => vec![Comparator::new(Op::Gte, Version::new(next.0, next.1, 0))],
        Op::Gte => vec![Comparator::new(Op::Gte, Version::new(major, minor, 0))],
        Op::Lt => vec![Comparator::new(Op::Lt, lower_bound(major, minor, 0))],
        Op::Lte => vec![Comparator::new(Op::Lt, lower_bound(next.0, next.1, 0))],
        Op::Eq => x_range(p),
    }
}

/// `~1.2.3` means >=1.2.3 <1.3.0, `~1` means >=1.0.0 <2.0.0
fn tilde(p: &PartialVersion) -> Vec<Comparator> {
    match (p.major, p.minor) {
        (None, _) => Vec::new(),
        (Some(major), None) => x_range(&PartialVersion {
            major: Some(major),
            minor: None,
            patch: None,
            pre: Prerelease::EMPTY,
        }),
        (Some(major), Some(minor)) => vec![
            Comparator::new(Op::Gte, p.floor()),
            Comparator::new(Op::Lt, lower_bound(major, minor.saturating_add(1), 0)),
        ],
    }
}

/// `^1.2.3` means >=1.2.3 <2.0.0, with the leftmost non-zero component fixed for 0.x
fn caret(p: &PartialVersion) -> Vec<Comparator> {
    let Some(major) = p.major else {
        return Vec::new();
    };

    let upper = match (major, p.minor, p.patch) {
        (_, None, _) => lower_bound(major.saturating_add(1), 0, 0),
        (0, Some(minor), None) => lower_bound(0, minor.saturating_add(1), 0),
        (0, Some(0), Some(patch)) => lower_bound(0, 0, patch.saturating_add(1)),
        (0, Some(minor), Some(_)) => lower_bound(0, minor.saturating_add(1), 0),
        _ => lower_bound(major.saturating_add(1), 0, 0),
    };

    vec![
        Comparator::new(Op::Gte, p.floor()),
        Comparator::new(Op::Lt, upper),
    ]
}

/// `1.2 - 2.3.4` means >=1.2.0 <=2.3.4, a partial upper bound covers its whole line
fn hyphen(from: &PartialVersion, to: &PartialVersion) -> Vec<Comparator> {
    let mut comparators = Vec::new();

    if from.major.is_some() {
        comparators.push(Comparator::new(Op::Gte, from.floor()));
    }

    match (to.major, to.minor, to.patch) {
        (None, _, _) => {}
        (Some(major), None, _) => {
            comparators.push(Comparator::new(
                Op::Lt,
                lower_bound(major.saturating_add(1), 0, 0),
            ));
        }
        (Some(major), Some(minor), None) => {
            comparators.push(Comparator::new(
                Op::Lt,
                lower_bound(major, minor.saturating_add(1), 0),
            ));
        }
        (Some(_), Some(_), Some(_)) => comparators.push(Comparator::new(Op::Lte, to.floor())),
    }

    comparators
}
