//! Snapshot sources.
//!
//! A session consumes an ordered list of whole-file snapshots. Disk
//! sources are read lazily at transition boundaries, so the file only
//! has to exist by the time its turn comes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use typecast_core::text::split_lines;
use typecast_core::{CoreError, CoreResult};

/// Errors raised while acquiring snapshots
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// Snapshot file could not be read
    #[error("Failed to read {path}: {reason}")]
    Unreadable {
        /// Path of the snapshot that failed
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// A session needs at least one snapshot
    #[error("Snapshot list is empty")]
    NoSources,
}

impl From<SourceError> for CoreError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Unreadable { path, reason } => Self::SourceRead {
                source: path,
                reason,
            },
            SourceError::NoSources => Self::InvalidConfig {
                reason: "snapshot list is empty".to_string(),
            },
        }
    }
}

/// Where one snapshot comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotSource {
    /// Whole-file snapshot read from disk
    Path(PathBuf),

    /// In-memory snapshot
    Memory {
        /// Name used in lifecycle events
        name: String,
        /// Snapshot lines, without terminators
        lines: Vec<String>,
    },
}

impl SnapshotSource {
    /// Create a disk-backed source
    #[must_use]
    pub fn path(path: PathBuf) -> Self {
        Self::Path(path)
    }

    /// Create an in-memory source from snapshot text
    #[must_use]
    pub fn memory(name: String, text: &str) -> Self {
        Self::Memory {
            name,
            lines: split_lines(text),
        }
    }

    /// Identifier used in lifecycle events and read errors
    #[must_use]
    pub fn identifier(&self) -> String {
        match self {
            Self::Path(path) => path.display().to_string(),
            Self::Memory { name, .. } => name.clone(),
        }
    }

    /// Read the snapshot lines.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::SourceRead` when a disk source cannot be
    /// read.
    pub async fn read_lines(&self) -> CoreResult<Vec<String>> {
        match self {
            Self::Path(path) => match tokio::fs::read_to_string(path).await {
                Ok(text) => Ok(split_lines(&text)),
                Err(err) => Err(SourceError::Unreadable {
                    path: path.display().to_string(),
                    reason: err.to_string(),
                }
                .into()),
            },
            Self::Memory { lines, .. } => Ok(lines.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_memory_source() {
        let source = SnapshotSource::memory("demo".to_string(), "a\nb\n");
        assert_eq!(source.identifier(), "demo");
    }

    #[tokio::test]
    async fn test_memory_read_lines() {
        let source = SnapshotSource::memory("demo".to_string(), "a\nb");
        let lines = source.read_lines().await.unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_path_read_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fn main() {{").unwrap();
        writeln!(file, "}}").unwrap();

        let source = SnapshotSource::path(file.path().to_path_buf());
        let lines = source.read_lines().await.unwrap();
        assert_eq!(lines, vec!["fn main() {", "}"]);
    }

    #[tokio::test]
    async fn test_path_missing_final_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a\nb").unwrap();

        let source = SnapshotSource::path(file.path().to_path_buf());
        let lines = source.read_lines().await.unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_path_read_error() {
        let source = SnapshotSource::path(PathBuf::from("/definitely/not/here.py"));
        let result = source.read_lines().await;
        assert!(matches!(result, Err(CoreError::SourceRead { .. })));
    }

    #[test]
    fn test_source_error_converts() {
        let err: CoreError = SourceError::NoSources.into();
        assert!(matches!(err, CoreError::InvalidConfig { .. }));

        let err: CoreError = SourceError::Unreadable {
            path: "x.py".to_string(),
            reason: "gone".to_string(),
        }
        .into();
        assert_eq!(
            err,
            CoreError::SourceRead {
                source: "x.py".to_string(),
                reason: "gone".to_string(),
            }
        );
    }
}
