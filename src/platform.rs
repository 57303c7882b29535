//! Hangar platforms and the upstream that governs each of them

use std::fmt;
use std::str::FromStr;

use crate::config::VelocityCandidates;
use crate::version::alias::{self, AliasTable};
use crate::version::error::ResolveError;

/// Platform a Hangar version can declare dependencies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Paper servers, versioned by Minecraft release
    Paper,
    /// Waterfall proxies
    Waterfall,
    /// Velocity proxies
    Velocity,
}

/// Where a platform's candidate versions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSourceKind {
    /// Mojang's release manifest
    ReleaseManifest,
    /// A Fill project, by project name
    FillProject(&'static str),
    /// The upstream ids of a static alias table
    AliasTable(&'static AliasTable),
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Paper, Platform::Waterfall, Platform::Velocity];

    /// Returns the name Hangar uses for the platform
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Paper => "PAPER",
            Platform::Waterfall => "WATERFALL",
            Platform::Velocity => "VELOCITY",
        }
    }

    /// Returns where candidate versions for this platform are fetched from
    pub fn candidate_source(&self, velocity: VelocityCandidates) -> CandidateSourceKind {
        match (self, velocity) {
            (Platform::Paper, _) => CandidateSourceKind::ReleaseManifest,
            (Platform::Waterfall, _) => CandidateSourceKind::FillProject("waterfall"),
            (Platform::Velocity, VelocityCandidates::AliasTable) => {
                CandidateSourceKind::AliasTable(&alias::VELOCITY)
            }
            (Platform::Velocity, VelocityCandidates::Fill) => {
                CandidateSourceKind::FillProject("velocity")
            }
        }
    }

    /// Returns the table translating upstream ids into ids Hangar accepts, if the
    /// platform needs one
    pub fn alias_table(&self) -> Option<&'static AliasTable> {
        match self {
            Platform::Paper | Platform::Waterfall => None,
            Platform::Velocity => Some(&alias::VELOCITY),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAPER" => Ok(Platform::Paper),
            "WATERFALL" => Ok(Platform::Waterfall),
            "VELOCITY" => Ok(Platform::Velocity),
            _ => Err(ResolveError::UnknownPlatform(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn from_str_round_trips_every_platform() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), platform);
        }
    }

    #[rstest]
    #[case("paper")]
    #[case("FOLIA")]
    #[case("")]
    #[case(" PAPER")]
    fn from_str_rejects_unknown_platforms(#[case] name: &str) {
        assert!(matches!(
            name.parse::<Platform>(),
            Err(ResolveError::UnknownPlatform(n)) if n == name
        ));
    }

    #[rstest]
    #[case(Platform::Paper, VelocityCandidates::AliasTable, CandidateSourceKind::ReleaseManifest)]
    #[case(Platform::Waterfall, VelocityCandidates::Fill, CandidateSourceKind::FillProject("waterfall"))]
    #[case(Platform::Velocity, VelocityCandidates::AliasTable, CandidateSourceKind::AliasTable(&alias::VELOCITY))]
    #[case(Platform::Velocity, VelocityCandidates::Fill, CandidateSourceKind::FillProject("velocity"))]
    fn candidate_source_returns_expected(
        #[case] platform: Platform,
        #[case] velocity: VelocityCandidates,
        #[case] expected: CandidateSourceKind,
    ) {
        assert_eq!(platform.candidate_source(velocity), expected);
    }

    #[test]
    fn only_velocity_has_an_alias_table() {
        assert!(Platform::Paper.alias_table().is_none());
        assert!(Platform::Waterfall.alias_table().is_none());
        assert_eq!(Platform::Velocity.alias_table(), Some(&alias::VELOCITY));
    }
}
