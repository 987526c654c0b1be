//! In-memory form of a compiled script.

use crate::{LineTable, Token, Variant};

/// Everything a bytecode container holds, decoded: the two interned tables,
/// the sparse line (and, modern only, column) transitions, and the token
/// stream in order.
///
/// Built in full by one pipeline pass and owned exclusively by that run;
/// never mutated incrementally.
#[derive(Debug, Clone, Default)]
pub struct ScriptImage {
    pub identifiers: Vec<String>,
    pub constants: Vec<Variant>,
    pub lines: LineTable,
    /// Empty for legacy containers.
    pub columns: LineTable,
    pub tokens: Vec<Token>,
}

impl ScriptImage {
    pub fn identifier(&self, index: u32) -> Option<&str> {
        self.identifiers.get(index as usize).map(|s| s.as_str())
    }

    pub fn constant(&self, index: u32) -> Option<&Variant> {
        self.constants.get(index as usize)
    }
}
