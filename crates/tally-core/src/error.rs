use std::path::PathBuf;

/// Alias for `Result<T, TallyError>`.
pub type TallyResult<T> = Result<T, TallyError>;

/// Errors that can occur while summarizing players or aggregating the party.
#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    /// The raw character document did not have the expected shape.
    #[error("malformed character document for \"{player}\": {source}")]
    MalformedDocument {
        /// The player whose document failed to decode.
        player: String,
        /// The underlying decode error.
        source: serde_json::Error,
    },

    /// A player's summary file was not present when the party was aggregated.
    #[error("missing summary for \"{player}\": {} does not exist", path.display())]
    MissingSummary {
        /// The roster player without a summary.
        player: String,
        /// The path that was expected to hold the summary.
        path: PathBuf,
    },

    /// A player's raw snapshot was not present when reading from the cache.
    #[error("no cached document for \"{player}\": {} does not exist", path.display())]
    MissingSnapshot {
        /// The player without a snapshot.
        player: String,
        /// The path that was expected to hold the snapshot.
        path: PathBuf,
    },

    /// A player's summary file exists but could not be decoded.
    #[error("invalid summary for \"{player}\": {source}")]
    InvalidSummary {
        /// The player whose summary failed to decode.
        player: String,
        /// The underlying decode error.
        source: serde_json::Error,
    },

    /// A player name that is not part of the roster.
    #[error("player \"{0}\" is not on the roster")]
    UnknownPlayer(String),

    /// The roster configuration could not be used.
    #[error("invalid roster: {0}")]
    InvalidRoster(String),

    /// A filesystem operation failed.
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A value could not be serialized to JSON.
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl TallyError {
    /// The player this error concerns, if any.
    pub fn player(&self) -> Option<&str> {
        match self {
            Self::MalformedDocument { player, .. }
            | Self::MissingSummary { player, .. }
            | Self::MissingSnapshot { player, .. }
            | Self::InvalidSummary { player, .. } => Some(player),
            Self::UnknownPlayer(player) => Some(player),
            _ => None,
        }
    }
}
