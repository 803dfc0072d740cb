//! Cast sessions.
//!
//! A session is one full run over an ordered snapshot list: the first
//! snapshot loads as the starting buffer, every later one plays as an
//! incremental edit against it. The session is the sole writer of the
//! buffer; observers only ever see it through event snapshots.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use typecast_core::text::char_len;
use typecast_core::{CoreError, CoreResult, PacingConfig};
use typecast_delta::delta_between;
use typecast_player::{CastEvent, EditPlayer, EventSink, PlaybackEvent};

use crate::source::{SnapshotSource, SourceError};

/// How a finished session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Every transition played to the end
    Completed,
    /// The token fired; playback stopped at a step boundary
    Cancelled,
}

/// Plays an ordered list of snapshots as one continuous cast.
///
/// Lifecycle events, progress and every keystroke go out through the
/// sink passed to [`run`](Self::run); [`spawn`](Self::spawn) moves the
/// whole run onto a background task and hands back a channel instead.
pub struct CastSession {
    sources: Vec<SnapshotSource>,
    pacing: PacingConfig,
    cancel: CancellationToken,
}

impl CastSession {
    /// Create a session over the given snapshots.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` when `sources` is empty.
    pub fn new(sources: Vec<SnapshotSource>) -> CoreResult<Self> {
        if sources.is_empty() {
            return Err(SourceError::NoSources.into());
        }
        Ok(Self {
            sources,
            pacing: PacingConfig::default(),
            cancel: CancellationToken::new(),
        })
    }

    /// Set the pacing configuration
    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token the session observes at step boundaries
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Number of snapshots in the run
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Run the session to completion or cancellation.
    ///
    /// Emits `Completed` exactly once in either case and reports which
    /// way the run ended.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SourceRead` when a snapshot cannot be read
    /// and `CoreError::InvalidConfig` when the pacing is invalid; no
    /// `Completed` event is emitted on those paths.
    pub async fn run<S: EventSink>(self, sink: &mut S) -> CoreResult<SessionStatus> {
        let status = match self.drive(sink).await {
            Ok(()) => SessionStatus::Completed,
            Err(CoreError::Cancelled) => SessionStatus::Cancelled,
            Err(err) => return Err(err),
        };
        sink.emit(CastEvent::Completed);
        info!(?status, "session finished");
        Ok(status)
    }

    /// Move the session onto a background task.
    ///
    /// Events arrive on the returned channel; the handle cancels and
    /// joins the task. Dropping the receiver does not stop playback.
    #[must_use]
    pub fn spawn(self) -> (CastHandle, UnboundedReceiver<CastEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = self.cancel.clone();
        let task = tokio::spawn(async move {
            let mut sink = tx;
            self.run(&mut sink).await
        });
        (CastHandle { cancel, task }, rx)
    }

    /// The full lifecycle, with cancellation surfacing as
    /// `Err(Cancelled)` from whichever step boundary it hit.
    async fn drive<S: EventSink>(&self, sink: &mut S) -> CoreResult<()> {
        self.pacing.validate()?;
        let total = self.sources.len();

        sink.emit(CastEvent::Progress { percent: 0 });

        let first = &self.sources[0];
        let identifier = first.identifier();
        let initial = first.read_lines().await?;
        debug!(source = %identifier, lines = initial.len(), "initial snapshot loaded");

        sink.emit(CastEvent::FileChanged {
            source: identifier.clone(),
        });
        sink.emit(CastEvent::FileComplete {
            source: identifier,
            snapshot: initial.clone(),
        });

        let mut player = EditPlayer::new(initial)
            .with_pacing(self.pacing.clone())
            .with_cancellation(self.cancel.clone());

        // Paint the starting buffer, cursor at the end of the last line
        if let Some(last) = player.buffer().last() {
            sink.emit(CastEvent::Updated(PlaybackEvent::new(
                player.buffer().len() - 1,
                char_len(last),
                player.buffer().to_vec(),
            )));
        }
        self.pace(self.pacing.initial_pause()).await?;
        sink.emit(CastEvent::Progress {
            percent: percent_of(1, total),
        });

        for (index, source) in self.sources.iter().enumerate().skip(1) {
            if self.cancel.is_cancelled() {
                return Err(CoreError::Cancelled);
            }

            let identifier = source.identifier();
            info!(source = %identifier, "transition started");
            sink.emit(CastEvent::FileChanged {
                source: identifier.clone(),
            });

            let target = source.read_lines().await?;
            let delta = delta_between(player.buffer(), &target);

            match player.play(delta, sink).await {
                Ok(()) => {
                    sink.emit(CastEvent::FileComplete {
                        source: identifier,
                        snapshot: player.buffer().to_vec(),
                    });
                    sink.emit(CastEvent::Progress {
                        percent: percent_of(index + 1, total),
                    });
                }
                Err(CoreError::Cancelled) => {
                    // The transition still closes; progress does not move
                    warn!(source = %identifier, "playback interrupted");
                    sink.emit(CastEvent::FileComplete {
                        source: identifier,
                        snapshot: player.buffer().to_vec(),
                    });
                    return Err(CoreError::Cancelled);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    /// Wait out the initial pause, aborting early on cancellation
    async fn pace(&self, delay: Duration) -> CoreResult<()> {
        if self.cancel.is_cancelled() {
            return Err(CoreError::Cancelled);
        }
        if delay.is_zero() {
            return Ok(());
        }
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(CoreError::Cancelled),
            () = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

/// Handle to a session running on a background task
pub struct CastHandle {
    cancel: CancellationToken,
    task: JoinHandle<CoreResult<SessionStatus>>,
}

impl CastHandle {
    /// Request cooperative cancellation; takes effect at the next step
    /// boundary
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the session to finish and return how it ended.
    ///
    /// # Errors
    ///
    /// Returns the session's own error, or `CoreError::Internal` if
    /// the task panicked.
    pub async fn join(self) -> CoreResult<SessionStatus> {
        match self.task.await {
            Ok(result) => result,
            Err(err) => Err(CoreError::Internal {
                message: format!("session task failed: {}", err),
            }),
        }
    }
}

fn percent_of(done: usize, total: usize) -> u8 {
    ((done * 100) / total.max(1)) as u8
}
