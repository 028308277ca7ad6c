//! CLI frontend for Tally: summarize characters and total up the party.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tally_beyond::DEFAULT_API_BASE;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::Context;

#[derive(Parser)]
#[command(
    name = "tally",
    about = "Tally: per-player character summaries and party totals",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding json/ and summary/ (default: current directory)
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Roster file mapping player names to character ids (default: <dir>/roster.json)
    #[arg(short, long, global = true)]
    roster: Option<PathBuf>,

    /// Extra item name to leave out of inventory and equipment lists (repeatable)
    #[arg(long = "ignore", global = true, value_name = "ITEM")]
    ignore: Vec<String>,

    /// Character-service base URL
    #[arg(long, global = true, env = "TALLY_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch characters and write summary/<player>.json
    Summarize {
        /// Players to summarize (default: the whole roster)
        players: Vec<String>,

        /// Read json/<player>.json instead of calling the character service
        #[arg(long)]
        offline: bool,
    },

    /// Aggregate every roster summary into summary/party.json
    Party {
        /// Sum money plainly instead of truncating the running total
        #[arg(long)]
        plain_money: bool,
    },

    /// Summarize the whole roster, then aggregate the party
    Run {
        /// Read json/<player>.json instead of calling the character service
        #[arg(long)]
        offline: bool,

        /// Sum money plainly instead of truncating the running total
        #[arg(long)]
        plain_money: bool,
    },

    /// Display a stored summary
    Show {
        /// Player to show (default: the party)
        player: Option<String>,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,tally_core=info,tally_beyond=info,tally_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let ctx = Context::new(cli.dir, cli.roster, cli.ignore, cli.api_base, cli.timeout);

    let result = match cli.command {
        Commands::Summarize { players, offline } => {
            commands::summarize::run(&ctx, &players, offline).await
        }
        Commands::Party { plain_money } => commands::party::run(&ctx, plain_money),
        Commands::Run {
            offline,
            plain_money,
        } => commands::run::run(&ctx, offline, plain_money).await,
        Commands::Show { player } => commands::show::run(&ctx, player.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
