//! Pacing configuration for playback timing.
//!
//! All delays are expressed in milliseconds so configs can travel as
//! plain JSON. Zero delays are meaningful: playback applies the same
//! edits without waiting, which is what tests use.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// Pacing configuration for the edit player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    /// Delay between individual keystrokes in milliseconds
    pub type_delay_ms: u64,
    /// Pause after a completed insert or edit in milliseconds
    pub insert_pause_ms: u64,
    /// Pause after a line deletion in milliseconds
    pub delete_pause_ms: u64,
    /// Pause after the initial snapshot is painted in milliseconds
    pub initial_pause_ms: u64,
    /// Number of spaces revealed per indentation keystroke
    pub indent_group: usize,
}

impl PacingConfig {
    /// Default delay between keystrokes
    pub const DEFAULT_TYPE_DELAY_MS: u64 = 50;
    /// Default pause after an insert or edit
    pub const DEFAULT_INSERT_PAUSE_MS: u64 = 1_000;
    /// Default pause after a deletion
    pub const DEFAULT_DELETE_PAUSE_MS: u64 = 500;
    /// Default pause after the initial snapshot
    pub const DEFAULT_INITIAL_PAUSE_MS: u64 = 3_000;
    /// Default indentation group width
    pub const DEFAULT_INDENT_GROUP: usize = 4;

    /// Create a config with the default human-watchable timings
    #[must_use]
    pub const fn new() -> Self {
        Self {
            type_delay_ms: Self::DEFAULT_TYPE_DELAY_MS,
            insert_pause_ms: Self::DEFAULT_INSERT_PAUSE_MS,
            delete_pause_ms: Self::DEFAULT_DELETE_PAUSE_MS,
            initial_pause_ms: Self::DEFAULT_INITIAL_PAUSE_MS,
            indent_group: Self::DEFAULT_INDENT_GROUP,
        }
    }

    /// Create a config with every delay zeroed
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            type_delay_ms: 0,
            insert_pause_ms: 0,
            delete_pause_ms: 0,
            initial_pause_ms: 0,
            indent_group: Self::DEFAULT_INDENT_GROUP,
        }
    }

    /// Set the keystroke delay
    #[must_use]
    pub fn with_type_delay_ms(mut self, millis: u64) -> Self {
        self.type_delay_ms = millis;
        self
    }

    /// Set the pause after an insert or edit
    #[must_use]
    pub fn with_insert_pause_ms(mut self, millis: u64) -> Self {
        self.insert_pause_ms = millis;
        self
    }

    /// Set the pause after a deletion
    #[must_use]
    pub fn with_delete_pause_ms(mut self, millis: u64) -> Self {
        self.delete_pause_ms = millis;
        self
    }

    /// Set the pause after the initial snapshot
    #[must_use]
    pub fn with_initial_pause_ms(mut self, millis: u64) -> Self {
        self.initial_pause_ms = millis;
        self
    }

    /// Set the indentation group width
    #[must_use]
    pub fn with_indent_group(mut self, width: usize) -> Self {
        self.indent_group = width;
        self
    }

    /// Keystroke delay as a duration
    #[must_use]
    pub const fn type_delay(&self) -> Duration {
        Duration::from_millis(self.type_delay_ms)
    }

    /// Insert pause as a duration
    #[must_use]
    pub const fn insert_pause(&self) -> Duration {
        Duration::from_millis(self.insert_pause_ms)
    }

    /// Delete pause as a duration
    #[must_use]
    pub const fn delete_pause(&self) -> Duration {
        Duration::from_millis(self.delete_pause_ms)
    }

    /// Initial pause as a duration
    #[must_use]
    pub const fn initial_pause(&self) -> Duration {
        Duration::from_millis(self.initial_pause_ms)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the indent group width is zero
    pub fn validate(&self) -> CoreResult<()> {
        if self.indent_group == 0 {
            return Err(CoreError::InvalidConfig {
                reason: "indent_group must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacing_defaults() {
        let pacing = PacingConfig::new();
        assert_eq!(pacing.type_delay_ms, 50);
        assert_eq!(pacing.insert_pause_ms, 1_000);
        assert_eq!(pacing.delete_pause_ms, 500);
        assert_eq!(pacing.initial_pause_ms, 3_000);
        assert_eq!(pacing.indent_group, 4);
    }

    #[test]
    fn test_pacing_zero() {
        let pacing = PacingConfig::zero();
        assert_eq!(pacing.type_delay(), Duration::ZERO);
        assert_eq!(pacing.insert_pause(), Duration::ZERO);
        assert_eq!(pacing.delete_pause(), Duration::ZERO);
        assert_eq!(pacing.initial_pause(), Duration::ZERO);
        assert_eq!(pacing.indent_group, 4);
    }

    #[test]
    fn test_pacing_builders() {
        let pacing = PacingConfig::zero()
            .with_type_delay_ms(10)
            .with_insert_pause_ms(20)
            .with_delete_pause_ms(30)
            .with_initial_pause_ms(40)
            .with_indent_group(2);

        assert_eq!(pacing.type_delay(), Duration::from_millis(10));
        assert_eq!(pacing.insert_pause(), Duration::from_millis(20));
        assert_eq!(pacing.delete_pause(), Duration::from_millis(30));
        assert_eq!(pacing.initial_pause(), Duration::from_millis(40));
        assert_eq!(pacing.indent_group, 2);
    }

    #[test]
    fn test_pacing_validate() {
        assert!(PacingConfig::new().validate().is_ok());

        let bad = PacingConfig::new().with_indent_group(0);
        assert!(bad.validate().is_err());
    }
}
