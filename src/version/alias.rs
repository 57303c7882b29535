//! Static translation tables between upstream ids and Hangar platform ids
//!
//! Hangar does not accept the version ids Fill publishes for Velocity, it only knows
//! its own spelling of them. There is no API exposing Hangar's ids yet, so the mapping
//! is configuration data kept here.

/// One upstream id and the id the platform accepts for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasEntry {
    pub source_id: &'static str,
    pub platform_id: &'static str,
}

impl AliasEntry {
    const fn new(source_id: &'static str, platform_id: &'static str) -> Self {
        Self {
            source_id,
            platform_id,
        }
    }
}

/// Ordered alias table, lookups return the first matching entry
#[derive(Debug, PartialEq, Eq)]
pub struct AliasTable {
    entries: &'static [AliasEntry],
}

impl AliasTable {
    pub const fn new(entries: &'static [AliasEntry]) -> Self {
        Self { entries }
    }

    /// Translate an upstream id into the platform's id
    pub fn to_platform_id(&self, source_id: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.source_id == source_id)
            .map(|entry| entry.platform_id)
    }

    /// Translate a platform id back into the upstream id
    pub fn to_source_id(&self, platform_id: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.platform_id == platform_id)
            .map(|entry| entry.source_id)
    }

    /// Upstream ids in table order
    pub fn source_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.source_id)
    }
}

/// Fill velocity versions -> Hangar velocity versions
pub static VELOCITY: AliasTable = AliasTable::new(&[
    AliasEntry::new("3.4.0", "3.4"),
    AliasEntry::new("3.3.0", "3.3"),
    AliasEntry::new("3.2.0", "3.2"),
    AliasEntry::new("3.1.1", "3.1.1"),
    AliasEntry::new("3.1.0", "3.1.0"),
    AliasEntry::new("3.0.0", "3.0"),
    AliasEntry::new("1.1.9", "1.1.9"),
    AliasEntry::new("1.1.0", "1.1"),
    AliasEntry::new("1.0.0", "1.0"),
]);
