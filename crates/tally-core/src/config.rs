//! Run configuration: the roster, the ignored-item denylist, and the money rule.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{TallyError, TallyResult};

/// Item names left out of every inventory and equipment list by default.
pub const DEFAULT_IGNORED_ITEMS: [&str; 6] = [
    "Stress I",
    "Stress II",
    "Stress III",
    "Stress IV",
    "Stress V",
    "Emotional Baggage",
];

/// The fixed set of players and their character-service ids.
///
/// Order matters: the party file lists classes in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IndexMap<String, u64>", into = "IndexMap<String, u64>")]
pub struct Roster {
    players: Vec<(String, u64)>,
}

impl Roster {
    /// Build a roster from `(player, character id)` pairs.
    pub fn new<I, S>(players: I) -> TallyResult<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let map: IndexMap<String, u64> = players
            .into_iter()
            .map(|(name, id)| (name.into(), id))
            .collect();
        Self::try_from(map)
    }

    /// Parse a roster from a JSON object of `{"player": characterId}`.
    pub fn from_json(json: &str) -> TallyResult<Self> {
        serde_json::from_str(json).map_err(|e| TallyError::InvalidRoster(e.to_string()))
    }

    /// Read a roster file.
    pub fn load(path: &Path) -> TallyResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| TallyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Player names in roster order.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|(name, _)| name.as_str())
    }

    /// Character id of a rostered player.
    pub fn character_id(&self, player: &str) -> TallyResult<u64> {
        self.players
            .iter()
            .find(|(name, _)| name == player)
            .map(|(_, id)| *id)
            .ok_or_else(|| TallyError::UnknownPlayer(player.to_string()))
    }

    /// Resolve a selection of players, defaulting to the whole roster.
    ///
    /// Every name must be on the roster. The result is in the order given.
    pub fn select(&self, names: &[String]) -> TallyResult<Vec<(String, u64)>> {
        if names.is_empty() {
            return Ok(self.players.clone());
        }
        names
            .iter()
            .map(|name| Ok((name.clone(), self.character_id(name)?)))
            .collect()
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster has no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl TryFrom<IndexMap<String, u64>> for Roster {
    type Error = TallyError;

    fn try_from(map: IndexMap<String, u64>) -> Result<Self, Self::Error> {
        if map.is_empty() {
            return Err(TallyError::InvalidRoster("no players listed".into()));
        }
        if let Some(bad) = map.keys().find(|name| !is_safe_player_name(name.as_str())) {
            return Err(TallyError::InvalidRoster(format!(
                "player name \"{bad}\" cannot be used as a file name"
            )));
        }
        let players = map.into_iter().collect();
        Ok(Self { players })
    }
}

impl From<Roster> for IndexMap<String, u64> {
    fn from(roster: Roster) -> Self {
        roster.players.into_iter().collect()
    }
}

/// Whether a name can be used as a file stem under `json/` and `summary/`.
pub fn is_safe_player_name(name: &str) -> bool {
    !name.is_empty()
        && name != "party"
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Item names that never appear in a persisted inventory or equipment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredItems(BTreeSet<String>);

impl Default for IgnoredItems {
    fn default() -> Self {
        Self(DEFAULT_IGNORED_ITEMS.iter().map(|s| s.to_string()).collect())
    }
}

impl IgnoredItems {
    /// An empty denylist.
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    /// Add a name to the denylist.
    pub fn with_item(mut self, name: impl Into<String>) -> Self {
        self.0.insert(name.into());
        self
    }

    /// Add several names to the denylist.
    pub fn with_items<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(names.into_iter().map(Into::into));
        self
    }

    /// Whether an item name is ignored.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Iterate over ignored names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// How per-player money is summed into the party total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoneyRule {
    /// Truncate the running total to three decimals before each addition:
    /// `floor(acc * 1000) / 1000 + next`.
    #[default]
    Truncating,
    /// Ordinary floating-point summation.
    Plain,
}

/// Configuration shared by both pipeline stages.
#[derive(Debug, Clone)]
pub struct TallyConfig {
    /// Root directory holding `json/` and `summary/`.
    pub data_dir: PathBuf,
    /// Item names dropped from inventory and equipment lists.
    pub ignored_items: IgnoredItems,
    /// Party money summation rule.
    pub money_rule: MoneyRule,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            ignored_items: IgnoredItems::default(),
            money_rule: MoneyRule::default(),
        }
    }
}

impl TallyConfig {
    /// Set the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Replace the ignored-item denylist.
    pub fn with_ignored_items(mut self, ignored: IgnoredItems) -> Self {
        self.ignored_items = ignored;
        self
    }

    /// Set the party money rule.
    pub fn with_money_rule(mut self, rule: MoneyRule) -> Self {
        self.money_rule = rule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_keeps_file_order() {
        let roster = Roster::from_json(r#"{"todd": 3, "corey": 1, "jen": 2}"#).unwrap();
        let players: Vec<_> = roster.players().collect();
        assert_eq!(players, ["todd", "corey", "jen"]);
        assert_eq!(roster.character_id("corey").unwrap(), 1);
    }

    #[test]
    fn roster_rejects_empty_and_unsafe_names() {
        assert!(matches!(Roster::from_json("{}"), Err(TallyError::InvalidRoster(_))));
        assert!(Roster::from_json(r#"{"../etc": 1}"#).is_err());
        assert!(Roster::from_json(r#"{"party": 1}"#).is_err());
        assert!(Roster::from_json(r#"{"todd": "abc"}"#).is_err());
    }

    #[test]
    fn roster_round_trips_through_json() {
        let roster = Roster::new([("b", 2), ("a", 1)]).unwrap();
        let json = serde_json::to_string(&roster).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);
    }

    #[test]
    fn select_defaults_to_everyone() {
        let roster = Roster::new([("a", 1), ("b", 2)]).unwrap();
        assert_eq!(roster.select(&[]).unwrap().len(), 2);
        let picked = roster.select(&["b".to_string()]).unwrap();
        assert_eq!(picked, [("b".to_string(), 2)]);
        assert!(matches!(
            roster.select(&["zed".to_string()]),
            Err(TallyError::UnknownPlayer(name)) if name == "zed"
        ));
    }

    #[test]
    fn default_ignored_items() {
        let ignored = IgnoredItems::default();
        assert!(ignored.contains("Stress III"));
        assert!(ignored.contains("Emotional Baggage"));
        assert!(!ignored.contains("Backpack"));
        assert!(ignored.clone().with_item("Backpack").contains("Backpack"));
    }

    #[test]
    fn config_builder_chain() {
        let config = TallyConfig::default()
            .with_data_dir("/tmp/party")
            .with_money_rule(MoneyRule::Plain)
            .with_ignored_items(IgnoredItems::none());
        assert_eq!(config.data_dir, PathBuf::from("/tmp/party"));
        assert_eq!(config.money_rule, MoneyRule::Plain);
        assert!(!config.ignored_items.contains("Stress I"));
    }
}
