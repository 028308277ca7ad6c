//! Character-service access for Tally.
//!
//! Fetches raw character documents over HTTP (or reads cached snapshots),
//! normalizes them for stable diffs, and drives the two-stage pipeline:
//! every player is summarized concurrently, and the party is aggregated
//! only once all of them have finished.

/// HTTP client for the character service.
pub mod client;
/// Error types for fetching and running the pipeline.
pub mod error;
/// Per-player summarization and the stage barrier.
pub mod pipeline;
/// Raw document normalization.
pub mod snapshot;
/// Where raw documents come from: live service or cached snapshots.
pub mod source;

#[cfg(test)]
mod test_support;

/// Re-export client types.
pub use client::{BeyondClient, BeyondConfig, DEFAULT_API_BASE};
/// Re-export error types.
pub use error::{FetchError, PipelineError};
/// Re-export pipeline entry points.
pub use pipeline::{run_party, summarize_player, summarize_players};
/// Re-export document sources.
pub use source::{CachedSource, CharacterSource};
