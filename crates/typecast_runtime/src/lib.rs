//! TYPECAST Session Runtime
//!
//! Drives playback across an ordered list of snapshots: reads each
//! one at its transition boundary, computes the delta against the
//! live buffer, and plays it, reporting lifecycle events along the
//! way. Sessions run inline or on a background task with a handle.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod session;
pub mod source;

// Re-exports
pub use session::{CastHandle, CastSession, SessionStatus};
pub use source::{SnapshotSource, SourceError};
