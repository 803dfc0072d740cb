//! Character-level edit player.
//!
//! Owns the line buffer for the duration of a playback session and is
//! the only code that mutates it. Every visible change goes out as an
//! event carrying an independent snapshot, so observers never alias
//! the live buffer.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use typecast_core::text::{
    char_len, chunk_sizes, common_prefix_chars, common_suffix_chars, leading_whitespace,
    slice_chars,
};
use typecast_core::{CoreError, CoreResult, PacingConfig};
use typecast_delta::{Delta, DiffOp};

use crate::event::{CastEvent, EventSink, PlaybackEvent};
use crate::lookahead::LookaheadResolver;

/// Executes consolidated deltas against a mutable line buffer.
///
/// Operations are applied in delta order; character reveals, indent
/// chunks and pauses between them come from the pacing config. A
/// cancelled token stops playback after the step in flight, leaving
/// the buffer in the last fully-applied state.
pub struct EditPlayer {
    /// Line buffer, lines stored without terminators
    buffer: Vec<String>,
    /// Timing configuration
    pacing: PacingConfig,
    /// Cooperative cancellation
    cancel: CancellationToken,
}

impl EditPlayer {
    /// Create a player over an initial snapshot
    #[must_use]
    pub fn new(initial: Vec<String>) -> Self {
        Self {
            buffer: initial,
            pacing: PacingConfig::default(),
            cancel: CancellationToken::new(),
        }
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

    /// Current buffer contents
    #[must_use]
    pub fn buffer(&self) -> &[String] {
        &self.buffer
    }

    /// Consume the player, returning the buffer
    #[must_use]
    pub fn into_buffer(self) -> Vec<String> {
        self.buffer
    }

    /// Play one delta to completion.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Cancelled` when the token fires mid-playback
    /// and `CoreError::Internal` if the delta does not fit the buffer.
    pub async fn play<S: EventSink>(&mut self, mut delta: Delta, sink: &mut S) -> CoreResult<()> {
        debug!(ops = delta.len(), lines = self.buffer.len(), "replaying delta");

        let mut resolver = LookaheadResolver::new();
        let mut cursor = 0usize;
        let mut index = 0usize;

        while index < delta.len() {
            self.checkpoint()?;
            let Some(op) = delta.get(index).cloned() else {
                break;
            };
            match op {
                DiffOp::Equal => cursor += 1,
                DiffOp::Delete => {
                    self.delete_line(cursor, sink)?;
                    self.pace(self.pacing.delete_pause()).await?;
                }
                DiffOp::Insert(line) => {
                    if let Some(promoted) = resolver.promotable_blank(&delta, index) {
                        if let Some(DiffOp::Insert(blank)) = delta.get(promoted).cloned() {
                            self.insert_line(cursor, &blank, sink).await?;
                            delta.set(promoted, DiffOp::Equal);
                        }
                    }
                    self.insert_line(cursor, &line, sink).await?;
                    cursor += 1;
                    self.pace(self.pacing.insert_pause()).await?;
                }
                DiffOp::Edit(target) => {
                    if let Some(run) = resolver.indent_run(&delta, index, &self.buffer, cursor) {
                        debug!(lines = run.len, shift = run.shift, "grouped indent run");
                        self.block_indent(cursor, run.len, run.shift, sink).await?;
                    }
                    // A block shift can leave the line already in target
                    // form; walk past it without the usual pause
                    if self.line_at(cursor)? == target {
                        cursor += 1;
                    } else {
                        self.edit_line(cursor, &target, sink).await?;
                        cursor += 1;
                        self.pace(self.pacing.insert_pause()).await?;
                    }
                }
            }
            index += 1;
        }

        debug!(lines = self.buffer.len(), "delta replayed");
        Ok(())
    }

    /// Type a new line at `at`: open an empty line, reveal leading
    /// whitespace a group at a time, then the rest character by
    /// character.
    async fn insert_line<S: EventSink>(
        &mut self,
        at: usize,
        line: &str,
        sink: &mut S,
    ) -> CoreResult<()> {
        if at > self.buffer.len() {
            return Err(CoreError::Internal {
                message: format!("insert position {} out of range", at),
            });
        }

        self.buffer.insert(at, String::new());
        self.emit(at, 0, sink);
        self.pace(self.pacing.type_delay()).await?;

        let group = self.pacing.indent_group.max(1);
        let groups = leading_whitespace(line) / group;
        for step in 1..=groups {
            let column = step * group;
            self.buffer[at] = slice_chars(line, 0, column).to_string();
            self.emit(at, column, sink);
            self.pace(self.pacing.type_delay()).await?;
        }

        for column in (groups * group + 1)..=char_len(line) {
            self.buffer[at] = slice_chars(line, 0, column).to_string();
            self.emit(at, column, sink);
            self.pace(self.pacing.type_delay()).await?;
        }

        Ok(())
    }

    /// Rewrite the line at `at` into `target`: fix the indentation,
    /// then retype the span between the common prefix and suffix.
    async fn edit_line<S: EventSink>(
        &mut self,
        at: usize,
        target: &str,
        sink: &mut S,
    ) -> CoreResult<()> {
        let current = self.line_at(at)?;
        let current_ws = leading_whitespace(&current);
        let target_ws = leading_whitespace(target);
        if target_ws > current_ws {
            self.indent_line(at, target_ws - current_ws, sink).await?;
        } else if current_ws > target_ws {
            self.dedent_line(at, current_ws - target_ws, sink).await?;
        }

        let current = self.line_at(at)?;
        if current == target {
            return Ok(());
        }

        let current_len = char_len(&current);
        let target_len = char_len(target);
        let prefix_len = common_prefix_chars(&current, target);
        let suffix_len =
            common_suffix_chars(&current, target, current_len.min(target_len) - prefix_len);

        let prefix = slice_chars(&current, 0, prefix_len);
        let suffix = slice_chars(&current, current_len - suffix_len, current_len);
        let middle = slice_chars(target, prefix_len, target_len - suffix_len);

        for typed in 0..=char_len(middle) {
            let head = slice_chars(middle, 0, typed);
            self.buffer[at] = format!("{}{}{}", prefix, head, suffix);
            self.emit(at, prefix_len + typed, sink);
            self.pace(self.pacing.type_delay()).await?;
        }

        Ok(())
    }

    /// Grow leading whitespace by `amount` characters, a group at a time
    async fn indent_line<S: EventSink>(
        &mut self,
        at: usize,
        amount: usize,
        sink: &mut S,
    ) -> CoreResult<()> {
        for chunk in chunk_sizes(amount, self.pacing.indent_group) {
            let line = self.line_at(at)?;
            self.buffer[at] = format!("{}{}", " ".repeat(chunk), line);
            let column = leading_whitespace(&self.buffer[at]);
            self.emit(at, column, sink);
            self.pace(self.pacing.type_delay()).await?;
        }
        Ok(())
    }

    /// Shrink leading whitespace by `amount` characters, a group at a time
    async fn dedent_line<S: EventSink>(
        &mut self,
        at: usize,
        amount: usize,
        sink: &mut S,
    ) -> CoreResult<()> {
        for chunk in chunk_sizes(amount, self.pacing.indent_group) {
            let line = self.line_at(at)?;
            self.buffer[at] = slice_chars(&line, chunk, char_len(&line)).to_string();
            let column = leading_whitespace(&self.buffer[at]);
            self.emit(at, column, sink);
            self.pace(self.pacing.type_delay()).await?;
        }
        Ok(())
    }

    /// Remove the line at `at` in one step
    fn delete_line<S: EventSink>(&mut self, at: usize, sink: &mut S) -> CoreResult<()> {
        if at >= self.buffer.len() {
            return Err(CoreError::Internal {
                message: format!("delete position {} out of range", at),
            });
        }
        self.buffer.remove(at);
        self.emit(at, 0, sink);
        Ok(())
    }

    /// Shift `lines` consecutive lines starting at `at` by `shift`
    /// characters of indentation, one group-sized chunk across the
    /// whole block per event.
    async fn block_indent<S: EventSink>(
        &mut self,
        at: usize,
        lines: usize,
        shift: isize,
        sink: &mut S,
    ) -> CoreResult<()> {
        if lines == 0 || shift == 0 {
            return Ok(());
        }

        for chunk in chunk_sizes(shift.unsigned_abs(), self.pacing.indent_group) {
            for index in at..at + lines {
                let line = self.line_at(index)?;
                self.buffer[index] = if shift > 0 {
                    format!("{}{}", " ".repeat(chunk), line)
                } else {
                    slice_chars(&line, chunk, char_len(&line)).to_string()
                };
            }
            let column = leading_whitespace(&self.buffer[at]);
            self.emit(at, column, sink);
            self.pace(self.pacing.type_delay()).await?;
        }

        Ok(())
    }

    fn emit<S: EventSink>(&self, line: usize, column: usize, sink: &mut S) {
        sink.emit(CastEvent::Updated(PlaybackEvent::new(
            line,
            column,
            self.buffer.clone(),
        )));
    }

    fn line_at(&self, at: usize) -> CoreResult<String> {
        self.buffer.get(at).cloned().ok_or_else(|| CoreError::Internal {
            message: format!("line {} out of range", at),
        })
    }

    fn checkpoint(&self) -> CoreResult<()> {
        if self.cancel.is_cancelled() {
            Err(CoreError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// Wait out one pacing delay, aborting early on cancellation.
    /// Zero delays return without touching a timer.
    async fn pace(&self, delay: Duration) -> CoreResult<()> {
        self.checkpoint()?;
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
