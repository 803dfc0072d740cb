//! TYPECAST Delta Computation
//!
//! Turns pairs of whole-file snapshots into ordered edit operations.
//! The differ produces a line-level alignment; consolidation merges
//! adjacent delete/insert pairs into in-place edits, which is what the
//! player executes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod consolidate;
pub mod differ;
pub mod ops;

// Re-exports
pub use consolidate::{consolidate, delta_between};
pub use differ::LineDiffer;
pub use ops::{Alignment, Delta, DiffOp, RawOp};
