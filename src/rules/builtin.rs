use super::RuleTable;
use crate::errors::{RuleTableError, RuleTableResult};
use schema::RuleTableData;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

// Encoded by build.rs from data/evolution_rules.ron
static COMPILED_RULES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/evolution_rules.bin"));

// Decoded and indexed on first use, then shared read-only.
static BUILTIN_RULES: LazyLock<RuleTableResult<RuleTable>> =
    LazyLock::new(|| RuleTable::from_compiled(COMPILED_RULES));

impl RuleTable {
    /// The rule table shipped with the crate.
    pub fn builtin() -> RuleTableResult<&'static RuleTable> {
        LazyLock::force(&BUILTIN_RULES).as_ref().map_err(Clone::clone)
    }

    /// Load a table from postcard bytes produced by the build script.
    pub fn from_compiled(bytes: &[u8]) -> RuleTableResult<Self> {
        let data = RuleTableData::from_compiled(bytes).map_err(|e| RuleTableError::Decode(e.to_string()))?;
        Self::from_data(data)
    }

    /// Load a table from RON source in the same format as the shipped file.
    pub fn from_ron_str(source: &str) -> RuleTableResult<Self> {
        let data: RuleTableData =
            ron::from_str(source).map_err(|e| RuleTableError::Parse(e.to_string()))?;
        Self::from_data(data)
    }

    pub fn from_ron_file(path: &Path) -> RuleTableResult<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| RuleTableError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&source)
    }
}
