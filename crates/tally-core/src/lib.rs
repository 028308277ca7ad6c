//! Core types for Tally: character documents, player summaries, and the
//! party aggregate.
//!
//! This crate is independent of the network. It turns an already-fetched
//! [`CharacterDocument`] into a [`PlayerSummary`], folds a roster's
//! summaries into a [`PartySummary`], and owns the on-disk layout of the
//! files both stages read and write.

/// Ability scores and sparse stat blocks.
pub mod ability;
/// Roster, ignored items, and run configuration.
pub mod config;
/// Typed view of the raw character-service document.
pub mod document;
/// Error types used throughout the crate.
pub mod error;
/// Inventory name resolution and equipment partitioning.
pub mod inventory;
/// Party-level aggregation: count-and-collapse, unions, money.
pub mod party;
/// Files on disk: raw snapshots, player summaries, the party file.
pub mod store;
/// Per-player summary extraction.
pub mod summary;

/// Re-export ability types.
pub use ability::{Ability, StatBlock};
/// Re-export configuration types.
pub use config::{IgnoredItems, MoneyRule, Roster, TallyConfig};
/// Re-export the raw document type.
pub use document::CharacterDocument;
/// Re-export error types.
pub use error::{TallyError, TallyResult};
/// Re-export party aggregation types.
pub use party::{Bucket, PartySummary, aggregate_stored};
/// Re-export the file store.
pub use store::SummaryStore;
/// Re-export player summary types.
pub use summary::{HitPoints, PlayerSummary, summarize};
