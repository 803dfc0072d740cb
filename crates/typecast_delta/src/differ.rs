//! Line-level differ.
//!
//! Alignment is computed from a longest-common-subsequence table over
//! whole lines. Within each change region the differ interleaves
//! deletes and inserts pairwise, so a rewritten line always shows up
//! as a delete immediately followed by its replacement. Consolidation
//! depends on that adjacency.

use crate::ops::{Alignment, RawOp};
use typecast_core::text::{char_len, common_prefix_chars, common_suffix_chars};

/// Line differ producing an [`Alignment`] between two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiffer {
    emit_hints: bool,
}

impl LineDiffer {
    /// Create a differ with hint rows disabled
    #[must_use]
    pub const fn new() -> Self {
        Self { emit_hints: false }
    }

    /// Enable or disable intra-line hint rows
    #[must_use]
    pub const fn with_hints(mut self, emit_hints: bool) -> Self {
        self.emit_hints = emit_hints;
        self
    }

    /// Align two snapshots line by line.
    ///
    /// Every source line appears exactly once as an `Equal` or a
    /// `Delete`, every target line exactly once as an `Equal` or an
    /// `Insert`, and relative order is preserved on both sides. Empty
    /// inputs are fine: an empty source yields pure inserts, an empty
    /// target pure deletes.
    #[must_use]
    pub fn align(&self, source: &[String], target: &[String]) -> Alignment {
        let mut alignment = Alignment::new();
        let mut pending_deletes: Vec<usize> = Vec::new();
        let mut pending_inserts: Vec<usize> = Vec::new();

        for row in lcs_rows(source, target) {
            match row {
                LcsRow::Equal => {
                    self.flush_region(
                        &mut alignment,
                        &mut pending_deletes,
                        &mut pending_inserts,
                        source,
                        target,
                    );
                    alignment.push(RawOp::Equal);
                }
                LcsRow::Delete(index) => pending_deletes.push(index),
                LcsRow::Insert(index) => pending_inserts.push(index),
            }
        }
        self.flush_region(
            &mut alignment,
            &mut pending_deletes,
            &mut pending_inserts,
            source,
            target,
        );

        alignment
    }

    /// Emit one change region, pairing deletes with inserts.
    ///
    /// The first `min(deletes, inserts)` rows interleave as
    /// delete/insert pairs; the excess trails in source order.
    fn flush_region(
        &self,
        out: &mut Alignment,
        deletes: &mut Vec<usize>,
        inserts: &mut Vec<usize>,
        source: &[String],
        target: &[String],
    ) {
        let pairs = deletes.len().min(inserts.len());
        for k in 0..pairs {
            out.push(RawOp::Delete);
            out.push(RawOp::Insert(target[inserts[k]].clone()));
            if self.emit_hints {
                if let Some(mask) = hint_mask(&source[deletes[k]], &target[inserts[k]]) {
                    out.push(RawOp::Hint(mask));
                }
            }
        }
        for _ in pairs..deletes.len() {
            out.push(RawOp::Delete);
        }
        for k in pairs..inserts.len() {
            out.push(RawOp::Insert(target[inserts[k]].clone()));
        }
        deletes.clear();
        inserts.clear();
    }
}

impl Default for LineDiffer {
    fn default() -> Self {
        Self::new()
    }
}

/// One step of the LCS backtrack
enum LcsRow {
    Equal,
    Delete(usize),
    Insert(usize),
}

/// Standard LCS table with backtrack.
///
/// The tie-break keeps deletes ahead of inserts inside each change
/// region, and regions come out grouped between equal anchors.
fn lcs_rows(source: &[String], target: &[String]) -> Vec<LcsRow> {
    let n = source.len();
    let m = target.len();

    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            table[i][j] = if source[i - 1] == target[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut rows = Vec::with_capacity(n + m);
    let mut i = n;
    let mut j = m;
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && source[i - 1] == target[j - 1] {
            rows.push(LcsRow::Equal);
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i][j - 1] >= table[i - 1][j]) {
            rows.push(LcsRow::Insert(j - 1));
            j -= 1;
        } else {
            rows.push(LcsRow::Delete(i - 1));
            i -= 1;
        }
    }
    rows.reverse();
    rows
}

/// Caret mask over the new line for a delete/insert pair.
///
/// Returns `None` when the lines share no affix, or when nothing in
/// the new line differs (a pure shrink).
fn hint_mask(old: &str, new: &str) -> Option<String> {
    if old == new {
        return None;
    }

    let shortest = char_len(old).min(char_len(new));
    let prefix = common_prefix_chars(old, new);
    let suffix = common_suffix_chars(old, new, shortest - prefix);
    if prefix == 0 && suffix == 0 {
        return None;
    }

    let new_len = char_len(new);
    let mut mask = String::with_capacity(new_len);
    for position in 0..new_len {
        if position >= prefix && position < new_len - suffix {
            mask.push('^');
        } else {
            mask.push(' ');
        }
    }

    let mask = mask.trim_end().to_string();
    if mask.is_empty() { None } else { Some(mask) }
}
