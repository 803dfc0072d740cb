//! Edit operation types.
//!
//! `RawOp` rows come straight out of the differ; `DiffOp` is the
//! consolidated form the player executes. Both orderings are playback
//! order: applying the ops front to back to the source snapshot yields
//! the target snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single row of a line alignment, as produced by the differ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawOp {
    /// Line carried over unchanged
    Equal,

    /// Line removed from the source snapshot
    Delete,

    /// Line added by the target snapshot
    Insert(String),

    /// Intra-line annotation for the preceding delete/insert pair.
    ///
    /// Carries a caret mask over the new line: spaces under unchanged
    /// characters, `^` under the rewritten span. Informational only.
    Hint(String),
}

impl RawOp {
    /// Whether this row is an informational hint
    #[must_use]
    pub const fn is_hint(&self) -> bool {
        matches!(self, Self::Hint(_))
    }
}

impl fmt::Display for RawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::Delete => write!(f, "-"),
            Self::Insert(line) => write!(f, "+ {}", line),
            Self::Hint(mask) => write!(f, "? {}", mask),
        }
    }
}

/// A consolidated edit operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiffOp {
    /// Line carried over unchanged; advances the cursor
    Equal,

    /// New line typed at the cursor
    Insert(String),

    /// Line removed at the cursor
    Delete,

    /// Line at the cursor rewritten in place
    Edit(String),
}

impl fmt::Display for DiffOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "="),
            Self::Insert(line) => write!(f, "+ {}", line),
            Self::Delete => write!(f, "-"),
            Self::Edit(line) => write!(f, "~ {}", line),
        }
    }
}

/// An ordered line alignment between two snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    rows: Vec<RawOp>,
}

impl Alignment {
    /// Create an empty alignment
    #[must_use]
    pub const fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Create from existing rows
    #[must_use]
    pub fn from_rows(rows: Vec<RawOp>) -> Self {
        Self { rows }
    }

    /// Append a row
    pub fn push(&mut self, row: RawOp) {
        self.rows.push(row);
    }

    /// Number of rows, hints included
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the alignment has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as a slice
    #[must_use]
    pub fn rows(&self) -> &[RawOp] {
        &self.rows
    }

    /// Iterate over rows
    pub fn iter(&self) -> std::slice::Iter<'_, RawOp> {
        self.rows.iter()
    }

    /// Consume into the underlying rows
    #[must_use]
    pub fn into_rows(self) -> Vec<RawOp> {
        self.rows
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered, consolidated edit sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    ops: Vec<DiffOp>,
}

impl Delta {
    /// Create an empty delta
    #[must_use]
    pub const fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Create from existing operations
    #[must_use]
    pub fn from_ops(ops: Vec<DiffOp>) -> Self {
        Self { ops }
    }

    /// Append an operation
    pub fn push(&mut self, op: DiffOp) {
        self.ops.push(op);
    }

    /// Number of operations
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether the delta has no operations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Operation at `index`, if in range
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DiffOp> {
        self.ops.get(index)
    }

    /// Replace the operation at `index`; out-of-range indices are ignored
    pub fn set(&mut self, index: usize, op: DiffOp) {
        if let Some(slot) = self.ops.get_mut(index) {
            *slot = op;
        }
    }

    /// Operations as a slice
    #[must_use]
    pub fn ops(&self) -> &[DiffOp] {
        &self.ops
    }

    /// Iterate over operations
    pub fn iter(&self) -> std::slice::Iter<'_, DiffOp> {
        self.ops.iter()
    }

    /// Consume into the underlying operations
    #[must_use]
    pub fn into_ops(self) -> Vec<DiffOp> {
        self.ops
    }
}

impl Default for Delta {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_op_display() {
        assert_eq!(RawOp::Equal.to_string(), "=");
        assert_eq!(RawOp::Delete.to_string(), "-");
        assert_eq!(RawOp::Insert("fn main() {".to_string()).to_string(), "+ fn main() {");
        assert_eq!(RawOp::Hint("    ^^^".to_string()).to_string(), "?     ^^^");
    }

    #[test]
    fn test_diff_op_display() {
        assert_eq!(DiffOp::Equal.to_string(), "=");
        assert_eq!(DiffOp::Delete.to_string(), "-");
        assert_eq!(DiffOp::Insert("x".to_string()).to_string(), "+ x");
        assert_eq!(DiffOp::Edit("y".to_string()).to_string(), "~ y");
    }

    #[test]
    fn test_raw_op_is_hint() {
        assert!(RawOp::Hint(String::new()).is_hint());
        assert!(!RawOp::Equal.is_hint());
        assert!(!RawOp::Insert("x".to_string()).is_hint());
    }

    #[test]
    fn test_delta_get_and_set() {
        let mut delta = Delta::from_ops(vec![
            DiffOp::Delete,
            DiffOp::Insert("a".to_string()),
        ]);

        assert_eq!(delta.get(0), Some(&DiffOp::Delete));
        assert_eq!(delta.get(2), None);

        delta.set(0, DiffOp::Equal);
        assert_eq!(delta.get(0), Some(&DiffOp::Equal));

        // Out of range is a no-op
        delta.set(9, DiffOp::Delete);
        assert_eq!(delta.len(), 2);
    }

    #[test]
    fn test_alignment_push_and_iter() {
        let mut alignment = Alignment::new();
        assert!(alignment.is_empty());

        alignment.push(RawOp::Equal);
        alignment.push(RawOp::Insert("line".to_string()));

        assert_eq!(alignment.len(), 2);
        assert_eq!(alignment.iter().filter(|row| row.is_hint()).count(), 0);
    }

    #[test]
    fn test_ops_serde_roundtrip() {
        let delta = Delta::from_ops(vec![
            DiffOp::Equal,
            DiffOp::Edit("    return 1".to_string()),
        ]);

        let json = serde_json::to_string(&delta).unwrap();
        let back: Delta = serde_json::from_str(&json).unwrap();
        assert_eq!(delta, back);
    }
}
