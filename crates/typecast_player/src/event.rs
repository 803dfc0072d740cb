//! Playback event types and delivery.

use serde::{Deserialize, Serialize};
use tracing::trace;

/// A single visible change during playback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackEvent {
    /// Line the cursor is on (zero-based)
    pub line: usize,
    /// Characters revealed so far on that line
    pub column: usize,
    /// Full buffer contents after the change
    pub snapshot: Vec<String>,
}

impl PlaybackEvent {
    /// Create a new playback event
    #[must_use]
    pub fn new(line: usize, column: usize, snapshot: Vec<String>) -> Self {
        Self {
            line,
            column,
            snapshot,
        }
    }
}

/// Everything a playback session can report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastEvent {
    /// The buffer changed
    Updated(PlaybackEvent),

    /// Playback moved on to a new snapshot
    FileChanged {
        /// Identifier of the snapshot now playing
        source: String,
    },

    /// A snapshot finished playing (also sent when playback is cut short)
    FileComplete {
        /// Identifier of the finished snapshot
        source: String,
        /// Buffer contents at the end of the transition
        snapshot: Vec<String>,
    },

    /// Overall progress through the snapshot list
    Progress {
        /// Percentage of snapshots fully played, 0 to 100
        percent: u8,
    },

    /// The session is over; no further events follow
    Completed,
}

/// Destination for playback events.
///
/// Implemented for plain `Vec` collection in tests and for an
/// unbounded tokio sender when playback runs on a background task.
pub trait EventSink {
    /// Deliver one event
    fn emit(&mut self, event: CastEvent);
}

impl EventSink for Vec<CastEvent> {
    fn emit(&mut self, event: CastEvent) {
        self.push(event);
    }
}

impl EventSink for tokio::sync::mpsc::UnboundedSender<CastEvent> {
    fn emit(&mut self, event: CastEvent) {
        if self.send(event).is_err() {
            trace!("event receiver dropped");
        }
    }
}
