use reqwest::StatusCode;
use tally_core::TallyError;

/// Errors that can occur while fetching or summarizing one player.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("cannot build HTTP client: {0}")]
    Client(reqwest::Error),

    /// The request could not be sent or the body could not be read.
    #[error("request for \"{player}\" failed: {source}")]
    Http {
        /// The player being fetched.
        player: String,
        /// The underlying transport error.
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("character service returned {status} for \"{player}\": {body}")]
    Status {
        /// The player being fetched.
        player: String,
        /// HTTP status code.
        status: StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response envelope carried no character document.
    #[error("character service returned no data for \"{player}\": {message}")]
    EmptyEnvelope {
        /// The player being fetched.
        player: String,
        /// The service's message, if any.
        message: String,
    },

    /// The response body was not JSON.
    #[error("cannot decode response for \"{player}\": {source}")]
    Decode {
        /// The player being fetched.
        player: String,
        /// The underlying decode error.
        source: serde_json::Error,
    },

    /// Summarizing or persisting failed.
    #[error(transparent)]
    Tally(#[from] TallyError),
}

impl FetchError {
    /// The player this error concerns, if any.
    pub fn player(&self) -> Option<&str> {
        match self {
            Self::Http { player, .. }
            | Self::Status { player, .. }
            | Self::EmptyEnvelope { player, .. }
            | Self::Decode { player, .. } => Some(player),
            Self::Tally(e) => e.player(),
            Self::Client(_) => None,
        }
    }
}

/// Errors from a full run of both stages.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// One or more players could not be summarized; the party was not aggregated.
    #[error("{} of {total} players failed to summarize", .failures.len())]
    PlayersFailed {
        /// One error per failed player.
        failures: Vec<FetchError>,
        /// Number of players attempted.
        total: usize,
    },

    /// Aggregation failed.
    #[error(transparent)]
    Tally(#[from] TallyError),
}
