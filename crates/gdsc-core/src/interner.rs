//! First-seen-wins interning for identifiers and literal constants.
//!
//! Both tables hand out dense indices in `0..len()`, in literal order of
//! first occurrence, and the index assigned to a value never changes — the
//! serialized container references table slots by these indices.

use std::collections::HashMap;

use crate::Variant;

/// Deduplicating identifier table.
///
/// `intern` returns the existing index if the string was seen before, else
/// appends it and returns the new index.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    map: HashMap<String, u32>,
    strings: Vec<String>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning its dense index.
    pub fn intern(&mut self, s: &str) -> u32 {
        if let Some(&idx) = self.map.get(s) {
            return idx;
        }
        let idx = self.strings.len() as u32;
        self.strings.push(s.to_owned());
        self.map.insert(s.to_owned(), idx);
        idx
    }

    /// Resolve an index back to its string, if in range.
    #[inline]
    pub fn try_resolve(&self, idx: u32) -> Option<&str> {
        self.strings.get(idx as usize).map(|s| s.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(|s| s.as_str())
    }

    /// Consume the table in index order.
    pub fn into_vec(self) -> Vec<String> {
        self.strings
    }
}

/// Deduplicating constant table with the same contract as [`Interner`].
///
/// Variants are compared structurally (float payloads by bit pattern), so
/// lookup is a linear scan; constant tables are small in practice.
#[derive(Debug, Clone, Default)]
pub struct ConstantPool {
    values: Vec<Variant>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a value, returning its dense index.
    pub fn intern(&mut self, value: Variant) -> u32 {
        if let Some(idx) = self.values.iter().position(|v| *v == value) {
            return idx as u32;
        }
        let idx = self.values.len() as u32;
        self.values.push(value);
        idx
    }

    #[inline]
    pub fn try_resolve(&self, idx: u32) -> Option<&Variant> {
        self.values.get(idx as usize)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.values.iter()
    }

    pub fn into_vec(self) -> Vec<Variant> {
        self.values
    }
}
