pub mod party;
pub mod run;
pub mod show;
pub mod summarize;

use std::path::PathBuf;
use std::time::Duration;

use colored::Colorize;
use tally_beyond::{BeyondClient, BeyondConfig, FetchError};
use tally_core::{IgnoredItems, MoneyRule, PlayerSummary, Roster, SummaryStore, TallyConfig};

const ROSTER_FILE: &str = "roster.json";

/// Settings shared by every command.
pub struct Context {
    config: TallyConfig,
    roster_path: PathBuf,
    beyond: BeyondConfig,
}

impl Context {
    pub fn new(
        dir: PathBuf,
        roster: Option<PathBuf>,
        ignore: Vec<String>,
        api_base: String,
        timeout_secs: u64,
    ) -> Self {
        let roster_path = roster.unwrap_or_else(|| dir.join(ROSTER_FILE));
        let config = TallyConfig::default()
            .with_data_dir(dir)
            .with_ignored_items(IgnoredItems::default().with_items(ignore));
        let beyond = BeyondConfig::default()
            .with_api_base(api_base)
            .with_timeout(Duration::from_secs(timeout_secs));
        Self {
            config,
            roster_path,
            beyond,
        }
    }

    /// The run configuration with the chosen money rule.
    fn config_with(&self, plain_money: bool) -> TallyConfig {
        let rule = if plain_money {
            MoneyRule::Plain
        } else {
            MoneyRule::Truncating
        };
        self.config.clone().with_money_rule(rule)
    }

    fn store(&self) -> SummaryStore {
        SummaryStore::new(&self.config.data_dir)
    }

    fn load_roster(&self) -> Result<Roster, String> {
        let roster = Roster::load(&self.roster_path).map_err(|e| e.to_string())?;
        tracing::debug!(
            path = %self.roster_path.display(),
            players = roster.len(),
            "loaded roster"
        );
        Ok(roster)
    }

    fn client(&self) -> Result<BeyondClient, String> {
        BeyondClient::new(self.beyond.clone()).map_err(|e| e.to_string())
    }
}

/// Print one line per player and fail if any player failed.
fn report(outcomes: &[(String, Result<PlayerSummary, FetchError>)]) -> Result<(), String> {
    let mut failed = 0;
    for (player, result) in outcomes {
        match result {
            Ok(summary) => println!(
                "  {} {:<12} {} ({})",
                "ok".green(),
                player,
                summary.name.bold(),
                summary.classes.join(", ").dimmed()
            ),
            Err(e) => {
                failed += 1;
                println!("  {} {:<12} {e}", "failed".red(), player);
            }
        }
    }

    if failed > 0 {
        Err(format!("{failed} of {} players failed", outcomes.len()))
    } else {
        Ok(())
    }
}
