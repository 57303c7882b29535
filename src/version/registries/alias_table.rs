//! Candidates taken from a static alias table instead of the network

use crate::version::alias::AliasTable;
use crate::version::error::SourceError;
use crate::version::registry::VersionSource;

/// Source whose candidates are the upstream ids of an alias table.
///
/// Used for platforms where only the ids the table knows how to translate are
/// worth matching against.
pub struct AliasTableSource {
    table: &'static AliasTable,
}

impl AliasTableSource {
    pub fn new(table: &'static AliasTable) -> Self {
        Self { table }
    }
}

#[async_trait::async_trait]
impl VersionSource for AliasTableSource {
    fn name(&self) -> &'static str {
        "alias-table"
    }

    async fn fetch_candidates(&self, _key: &str) -> Result<Vec<String>, SourceError> {
        Ok(self.table.source_ids().map(str::to_string).collect())
    }
}
