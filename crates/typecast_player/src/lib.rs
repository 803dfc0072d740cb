//! TYPECAST Playback Engine
//!
//! Executes consolidated deltas against a line buffer one keystroke at
//! a time, emitting an event per visible change. Two look-ahead
//! heuristics make the replay read like a human typing: trailing blank
//! lines are opened early, and uniformly re-indented blocks shift as a
//! group.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod event;
pub mod lookahead;
pub mod player;

// Re-exports
pub use event::{CastEvent, EventSink, PlaybackEvent};
pub use lookahead::{IndentRun, LookaheadResolver};
pub use player::EditPlayer;
