//! Sparse token-position → line/column transition tables.
//!
//! The container records only the positions where the value *changes*; the
//! reader reconstructs absolute values by carrying the last seen value
//! forward across tokens. The same structure backs the modern format's
//! column series.

/// Ordered `(token_index, value)` transition list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTable {
    entries: Vec<(u32, u32)>,
}

impl LineTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<(u32, u32)>) -> Self {
        Self { entries }
    }

    /// Record a transition. Token indices must be pushed in ascending order.
    pub fn push(&mut self, token_index: u32, value: u32) {
        debug_assert!(
            self.entries.last().is_none_or(|&(i, _)| i <= token_index),
            "line table entries must be ordered"
        );
        self.entries.push((token_index, value));
    }

    /// Value recorded exactly at `token_index`, if any.
    pub fn at(&self, token_index: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|&&(i, _)| i == token_index)
            .map(|&(_, v)| v)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.entries.iter().copied()
    }
}

/// Carry-forward cursor over a [`LineTable`].
///
/// Call [`advance`](Self::advance) once per token position, in order; it
/// returns the absolute value for that position.
#[derive(Debug, Clone, Copy)]
pub struct CarryForward<'a> {
    table: &'a LineTable,
    next: usize,
    current: u32,
}

impl<'a> CarryForward<'a> {
    pub fn new(table: &'a LineTable, initial: u32) -> Self {
        Self {
            table,
            next: 0,
            current: initial,
        }
    }

    /// Absolute value at `token_index`, inheriting from the previous token
    /// when the table has no entry there.
    pub fn advance(&mut self, token_index: u32) -> u32 {
        while let Some(&(idx, value)) = self.table.entries.get(self.next) {
            if idx > token_index {
                break;
            }
            self.current = value;
            self.next += 1;
        }
        self.current
    }
}
