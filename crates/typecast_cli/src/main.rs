//! TYPECAST CLI
//!
//! Replays an ordered series of file snapshots as an incremental
//! typing cast, or prints the edit operations between two snapshots.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use typecast_core::PacingConfig;
use typecast_core::text::split_lines;
use typecast_delta::{LineDiffer, delta_between};
use typecast_player::CastEvent;
use typecast_runtime::{CastSession, SessionStatus, SnapshotSource};

#[derive(Parser)]
#[command(name = "typecast")]
#[command(about = "TYPECAST - replay file snapshots as a typing cast", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a series of snapshots in order
    Play {
        /// Snapshot files; the first is the starting state
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// File rewritten with the live buffer after every keystroke
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Delay between keystrokes in milliseconds
        #[arg(long, default_value_t = PacingConfig::DEFAULT_TYPE_DELAY_MS)]
        type_delay_ms: u64,

        /// Pause after a completed insert or edit in milliseconds
        #[arg(long, default_value_t = PacingConfig::DEFAULT_INSERT_PAUSE_MS)]
        insert_pause_ms: u64,

        /// Pause after a line deletion in milliseconds
        #[arg(long, default_value_t = PacingConfig::DEFAULT_DELETE_PAUSE_MS)]
        delete_pause_ms: u64,

        /// Pause on the initial snapshot in milliseconds
        #[arg(long, default_value_t = PacingConfig::DEFAULT_INITIAL_PAUSE_MS)]
        initial_pause_ms: u64,

        /// Spaces revealed per indentation keystroke
        #[arg(long, default_value_t = PacingConfig::DEFAULT_INDENT_GROUP)]
        indent_group: usize,
    },
    /// Print the edit operations between two snapshots
    Delta {
        /// Source snapshot
        left: PathBuf,
        /// Target snapshot
        right: PathBuf,
        /// Show the raw alignment, hint rows included
        #[arg(long)]
        raw: bool,
        /// Emit JSON instead of prefixed text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "typecast=info".to_string()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Play {
            files,
            out,
            type_delay_ms,
            insert_pause_ms,
            delete_pause_ms,
            initial_pause_ms,
            indent_group,
        } => {
            let pacing = PacingConfig::new()
                .with_type_delay_ms(type_delay_ms)
                .with_insert_pause_ms(insert_pause_ms)
                .with_delete_pause_ms(delete_pause_ms)
                .with_initial_pause_ms(initial_pause_ms)
                .with_indent_group(indent_group);
            play(files, out, pacing).await
        }
        Commands::Delta {
            left,
            right,
            raw,
            json,
        } => print_delta(&left, &right, raw, json),
    }
}

/// Spawn a session over the files and mirror its events until it ends.
async fn play(files: Vec<PathBuf>, out: Option<PathBuf>, pacing: PacingConfig) -> Result<()> {
    let sources = files.into_iter().map(SnapshotSource::path).collect();
    let cancel = CancellationToken::new();
    let session = CastSession::new(sources)?
        .with_pacing(pacing)
        .with_cancellation(cancel.clone());

    let (handle, mut events) = session.spawn();

    // Ctrl-C requests cooperative cancellation; the session stops at
    // the next keystroke boundary
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    while let Some(event) = events.recv().await {
        match event {
            CastEvent::Updated(frame) => {
                if let Some(path) = &out {
                    write_snapshot(path, &frame.snapshot)?;
                }
            }
            CastEvent::FileChanged { source } => println!("Playing: {}", source),
            CastEvent::FileComplete { source, snapshot } => {
                if let Some(path) = &out {
                    write_snapshot(path, &snapshot)?;
                }
                debug!(source = %source, "transition closed");
            }
            CastEvent::Progress { percent } => debug!(percent, "progress"),
            CastEvent::Completed => {}
        }
    }

    match handle.join().await? {
        SessionStatus::Completed => println!("Done"),
        SessionStatus::Cancelled => println!("Cancelled"),
    }
    Ok(())
}

/// Print the operations between two snapshots, consolidated by
/// default, as the raw alignment with `--raw`.
fn print_delta(left: &Path, right: &Path, raw: bool, json: bool) -> Result<()> {
    let source = read_snapshot(left)?;
    let target = read_snapshot(right)?;

    if raw {
        let alignment = LineDiffer::new()
            .with_hints(true)
            .align(&source, &target);
        if json {
            println!("{}", serde_json::to_string_pretty(&alignment)?);
        } else {
            for row in alignment.iter() {
                println!("{}", row);
            }
        }
    } else {
        let delta = delta_between(&source, &target);
        if json {
            println!("{}", serde_json::to_string_pretty(&delta)?);
        } else {
            for op in delta.iter() {
                println!("{}", op);
            }
        }
    }
    Ok(())
}

fn read_snapshot(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading {}", path.display()))?;
    Ok(split_lines(&text))
}

/// Rewrite the playback surface with the current buffer
fn write_snapshot(path: &Path, lines: &[String]) -> Result<()> {
    let mut text = lines.join("\n");
    if !lines.is_empty() {
        text.push('\n');
    }
    std::fs::write(path, text).wrap_err_with(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_snapshot_round_trips() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let lines = vec!["fn main() {".to_string(), "}".to_string()];

        write_snapshot(file.path(), &lines).unwrap();
        assert_eq!(read_snapshot(file.path()).unwrap(), lines);

        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "fn main() {\n}\n");
    }

    #[test]
    fn test_write_snapshot_empty_buffer() {
        let file = tempfile::NamedTempFile::new().unwrap();

        write_snapshot(file.path(), &[]).unwrap();
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "");
    }

    #[test]
    fn test_write_snapshot_single_blank_line() {
        let file = tempfile::NamedTempFile::new().unwrap();

        write_snapshot(file.path(), &[String::new()]).unwrap();
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "\n");
    }
}
