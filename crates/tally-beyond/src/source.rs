//! Where raw character documents come from.

use std::future::Future;

use tally_core::SummaryStore;

use crate::client::BeyondClient;
use crate::error::FetchError;
use crate::snapshot::normalize;

/// A provider of raw character documents.
pub trait CharacterSource {
    /// Load the normalized raw document of one player.
    fn load(
        &self,
        player: &str,
        character_id: u64,
    ) -> impl Future<Output = Result<serde_json::Value, FetchError>> + Send;

    /// Whether loaded documents are fresh and should be stored as snapshots.
    fn is_live(&self) -> bool;
}

impl CharacterSource for BeyondClient {
    async fn load(&self, player: &str, character_id: u64) -> Result<serde_json::Value, FetchError> {
        let document = self.fetch_document(player, character_id).await?;
        Ok(normalize(document))
    }

    fn is_live(&self) -> bool {
        true
    }
}

/// Reads the snapshots a previous live run left under `json/`.
#[derive(Debug, Clone)]
pub struct CachedSource {
    store: SummaryStore,
}

impl CachedSource {
    /// A source reading from the given store.
    pub fn new(store: SummaryStore) -> Self {
        Self { store }
    }
}

impl CharacterSource for CachedSource {
    async fn load(&self, player: &str, _character_id: u64) -> Result<serde_json::Value, FetchError> {
        Ok(self.store.read_raw(player)?)
    }

    fn is_live(&self) -> bool {
        false
    }
}
