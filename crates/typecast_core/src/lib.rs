//! TYPECAST Core Types
//!
//! This crate contains pure types and helpers with no I/O.
//! Everything downstream (diffing, playback, sessions) builds on the
//! primitives defined here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod pacing;
pub mod text;

// Re-exports
pub use error::{CoreError, CoreResult};
pub use pacing::PacingConfig;
