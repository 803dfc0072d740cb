//! Delta consolidation.
//!
//! Collapses each delete immediately followed by an insert into a
//! single in-place edit. Hint rows are stripped before adjacency is
//! judged, so an annotated pair still consolidates.

use tracing::debug;

use crate::differ::LineDiffer;
use crate::ops::{Alignment, Delta, DiffOp, RawOp};

/// Consolidate an alignment into an executable delta.
///
/// Only strictly adjacent delete/insert pairs merge; a delete separated
/// from the next insert by an equal row stays a delete.
#[must_use]
pub fn consolidate(alignment: Alignment) -> Delta {
    let rows: Vec<RawOp> = alignment
        .into_rows()
        .into_iter()
        .filter(|row| !row.is_hint())
        .collect();

    let mut delta = Delta::new();
    let mut index = 0;
    while index < rows.len() {
        match &rows[index] {
            RawOp::Equal => {
                delta.push(DiffOp::Equal);
                index += 1;
            }
            RawOp::Delete => {
                if let Some(RawOp::Insert(line)) = rows.get(index + 1) {
                    delta.push(DiffOp::Edit(line.clone()));
                    index += 2;
                } else {
                    delta.push(DiffOp::Delete);
                    index += 1;
                }
            }
            RawOp::Insert(line) => {
                delta.push(DiffOp::Insert(line.clone()));
                index += 1;
            }
            RawOp::Hint(_) => {
                index += 1;
            }
        }
    }
    delta
}

/// Diff two snapshots and consolidate in one step
#[must_use]
pub fn delta_between(source: &[String], target: &[String]) -> Delta {
    let alignment = LineDiffer::new().align(source, target);
    let delta = consolidate(alignment);
    debug!(
        source_lines = source.len(),
        target_lines = target.len(),
        ops = delta.len(),
        "computed delta"
    );
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn make_lines(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|line| (*line).to_string()).collect()
    }

    /// Replay a consolidated delta against its source snapshot
    fn apply(delta: &Delta, source: &[String]) -> Vec<String> {
        let mut result = Vec::new();
        let mut cursor = 0usize;
        for op in delta.iter() {
            match op {
                DiffOp::Equal => {
                    result.push(source[cursor].clone());
                    cursor += 1;
                }
                DiffOp::Delete => cursor += 1,
                DiffOp::Insert(line) => result.push(line.clone()),
                DiffOp::Edit(line) => {
                    result.push(line.clone());
                    cursor += 1;
                }
            }
        }
        assert_eq!(cursor, source.len());
        result
    }

    #[test]
    fn test_adjacent_pair_merges() {
        let alignment = Alignment::from_rows(vec![
            RawOp::Delete,
            RawOp::Insert("new".to_string()),
        ]);
        let delta = consolidate(alignment);
        assert_eq!(delta.ops(), &[DiffOp::Edit("new".to_string())]);
    }

    #[test]
    fn test_separated_pair_stays_apart() {
        let alignment = Alignment::from_rows(vec![
            RawOp::Delete,
            RawOp::Equal,
            RawOp::Insert("new".to_string()),
        ]);
        let delta = consolidate(alignment);
        assert_eq!(
            delta.ops(),
            &[
                DiffOp::Delete,
                DiffOp::Equal,
                DiffOp::Insert("new".to_string()),
            ]
        );
    }

    #[test]
    fn test_hint_does_not_block_merge() {
        let alignment = Alignment::from_rows(vec![
            RawOp::Delete,
            RawOp::Hint("^^^".to_string()),
            RawOp::Insert("new".to_string()),
        ]);
        let delta = consolidate(alignment);
        assert_eq!(delta.ops(), &[DiffOp::Edit("new".to_string())]);
    }

    #[test]
    fn test_blocked_region_merges_middle_pair() {
        // Without interleaving, only the innermost pair is adjacent
        let alignment = Alignment::from_rows(vec![
            RawOp::Delete,
            RawOp::Delete,
            RawOp::Insert("x".to_string()),
            RawOp::Insert("y".to_string()),
        ]);
        let delta = consolidate(alignment);
        assert_eq!(
            delta.ops(),
            &[
                DiffOp::Delete,
                DiffOp::Edit("x".to_string()),
                DiffOp::Insert("y".to_string()),
            ]
        );
    }

    #[test]
    fn test_delta_between_edit_scenario() {
        let source = make_lines(&["def f():", "    pass"]);
        let target = make_lines(&["def f():", "    return 1"]);
        let delta = delta_between(&source, &target);
        assert_eq!(
            delta.ops(),
            &[DiffOp::Equal, DiffOp::Edit("    return 1".to_string())]
        );
    }

    #[test]
    fn test_delta_between_empty_to_one_line() {
        let target = make_lines(&["x"]);
        let delta = delta_between(&[], &target);
        assert_eq!(delta.ops(), &[DiffOp::Insert("x".to_string())]);
    }

    #[test]
    fn test_delta_between_identical() {
        let lines = make_lines(&["a", "b"]);
        let delta = delta_between(&lines, &lines);
        assert_eq!(delta.ops(), &[DiffOp::Equal, DiffOp::Equal]);
    }

    #[test]
    fn test_delta_between_reindent_block() {
        let source = make_lines(&["a", "b"]);
        let target = make_lines(&["    a", "    b"]);
        let delta = delta_between(&source, &target);
        assert_eq!(
            delta.ops(),
            &[
                DiffOp::Edit("    a".to_string()),
                DiffOp::Edit("    b".to_string()),
            ]
        );
    }

    proptest::proptest! {
        #[test]
        fn prop_delta_reproduces_target(
            source in prop::collection::vec("[ab ]{0,3}", 0..8),
            target in prop::collection::vec("[ab ]{0,3}", 0..8),
        ) {
            let delta = delta_between(&source, &target);
            prop_assert_eq!(apply(&delta, &source), target);
        }

        #[test]
        fn prop_identical_snapshots_are_all_equal(
            lines in prop::collection::vec("[ab ]{0,3}", 0..8),
        ) {
            let delta = delta_between(&lines, &lines);
            prop_assert!(delta.iter().all(|op| matches!(op, DiffOp::Equal)));
            prop_assert_eq!(delta.len(), lines.len());
        }

        #[test]
        fn prop_consolidation_never_grows(
            source in prop::collection::vec("[ab]{0,2}", 0..8),
            target in prop::collection::vec("[ab]{0,2}", 0..8),
        ) {
            let alignment = LineDiffer::new().align(&source, &target);
            let rows = alignment.len();
            let delta = consolidate(alignment);
            prop_assert!(delta.len() <= rows);
        }

        #[test]
        fn prop_edit_count_matches_adjacent_pairs(
            source in prop::collection::vec("[abc]{0,2}", 0..8),
            target in prop::collection::vec("[abc]{0,2}", 0..8),
        ) {
            let alignment = LineDiffer::new().align(&source, &target);
            let pairs = alignment
                .rows()
                .windows(2)
                .filter(|pair| matches!(pair, [RawOp::Delete, RawOp::Insert(_)]))
                .count();

            let delta = consolidate(alignment);
            let edits = delta
                .iter()
                .filter(|op| matches!(op, DiffOp::Edit(_)))
                .count();
            prop_assert_eq!(edits, pairs);
        }
    }
}
