//! Forward scans over the delta that make playback read naturally.
//!
//! Both heuristics look ahead from the operation about to execute and
//! never allocate; they return indices and shifts into the existing
//! delta. The resolver keeps one piece of state: the exclusive end of
//! the last scanned edit run, so interior members of a grouped run are
//! not re-grouped when the cursor reaches them.

use typecast_core::text::{is_blank, leading_whitespace};
use typecast_delta::{Delta, DiffOp};

/// A run of consecutive edits sharing one indentation shift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentRun {
    /// Number of edits in the run
    pub len: usize,
    /// Indentation change in characters, negative for a dedent
    pub shift: isize,
}

/// Look-ahead scanner over a consolidated delta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookaheadResolver {
    covered: usize,
}

impl LookaheadResolver {
    /// Create a resolver with nothing scanned yet
    #[must_use]
    pub const fn new() -> Self {
        Self { covered: 0 }
    }

    /// Exclusive end of the last scanned edit run
    #[must_use]
    pub const fn covered(&self) -> usize {
        self.covered
    }

    /// Find a blank line to open early.
    ///
    /// When the operation at `from` is a non-blank insert, scans the
    /// run of consecutive inserts that follows it and returns the index
    /// of the first all-whitespace one. The caller types that line
    /// immediately and overwrites its slot with `Equal`: by the time
    /// the cursor reaches the slot, the early line sits exactly where
    /// the cursor is, and `Equal` walks past it.
    #[must_use]
    pub fn promotable_blank(&self, delta: &Delta, from: usize) -> Option<usize> {
        match delta.get(from) {
            Some(DiffOp::Insert(line)) if !is_blank(line) => {}
            _ => return None,
        }

        let mut index = from + 1;
        while let Some(DiffOp::Insert(line)) = delta.get(index) {
            if is_blank(line) {
                return Some(index);
            }
            index += 1;
        }
        None
    }

    /// Detect a block of edits that all shift indentation the same way.
    ///
    /// `cursor` is the buffer line the edit at `from` is about to
    /// rewrite; consecutive edits map to consecutive buffer lines. The
    /// scanned range is recorded as covered whatever the outcome, and a
    /// run is only returned when it is longer than one edit and
    /// actually moves.
    pub fn indent_run(
        &mut self,
        delta: &Delta,
        from: usize,
        buffer: &[String],
        cursor: usize,
    ) -> Option<IndentRun> {
        if from < self.covered {
            return None;
        }
        let Some(DiffOp::Edit(target)) = delta.get(from) else {
            return None;
        };
        let current = buffer.get(cursor)?;
        let shift = indent_shift(current, target);

        let mut len = 1usize;
        loop {
            let Some(DiffOp::Edit(next_target)) = delta.get(from + len) else {
                break;
            };
            let Some(next_current) = buffer.get(cursor + len) else {
                break;
            };
            if indent_shift(next_current, next_target) != shift {
                break;
            }
            len += 1;
        }

        self.covered = from + len;
        if len > 1 && shift != 0 {
            Some(IndentRun { len, shift })
        } else {
            None
        }
    }
}

impl Default for LookaheadResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn indent_shift(current: &str, target: &str) -> isize {
    leading_whitespace(target) as isize - leading_whitespace(current) as isize
}
