//! # Favorites Sync CLI (`favs`)
//!
//! The `favs` binary is the trigger surface for the sync engine. It
//! provides commands for database initialization, scanning, and
//! inspecting the reconciled state.
//!
//! ## Usage
//!
//! ```bash
//! favs --config ./config/favs.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `favs init` | Create the SQLite database and run schema migrations |
//! | `favs sources` | List candidate favorites locations and their status |
//! | `favs scan` | Run one reconciliation (skipped if the source is unchanged) |
//! | `favs enable` | Enable the integration: an initial forced scan |
//! | `favs list` | List reconciled favorites |
//! | `favs history` | Show recent scan attempts |
//! | `favs stats` | Database summary |

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use favorites_sync::models::ScanType;
use favorites_sync::{config, list, migrate, reconcile, scan_log, sources, stats};

/// Favorites Sync CLI — a differential favorites-to-library sync engine.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/favs.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "favs",
    about = "Favorites Sync — a differential favorites-to-library sync engine",
    version,
    long_about = "Favorites Sync reads a media-center favorites document, classifies and \
    normalizes each entry, matches media targets against the library catalog, and reconciles \
    the result into SQLite without ever modifying the favorites document itself."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/favs.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Initialize the database schema.
    ///
    /// Creates the SQLite database file and all required tables (media,
    /// favorite, scan_log). Idempotent — running it multiple times is safe.
    Init,

    /// List candidate favorites locations and their status.
    ///
    /// Shows every configured location in search order and marks the one
    /// a scan would read.
    Sources,

    /// Run one reconciliation scan.
    ///
    /// Locates the favorites document, and — unless its modification time
    /// matches the last successful scan — reads, classifies, matches, and
    /// commits the result in a single transaction.
    Scan {
        /// Ignore the change check — re-scan even if the source is unchanged.
        #[arg(long)]
        force: bool,

        /// Classify and match without writing to the database.
        #[arg(long)]
        dry_run: bool,
    },

    /// Enable the favorites integration.
    ///
    /// Runs the initial forced scan that brings the store up to date with
    /// the current favorites document.
    Enable,

    /// List reconciled favorites.
    ///
    /// Shows rows present in the most recent scan by default.
    List {
        /// Only media favorites with no library match.
        #[arg(long)]
        unmapped: bool,

        /// Only favorites whose backing file is unreachable.
        #[arg(long)]
        missing: bool,

        /// Show retired rows (absent from the last scan) instead.
        #[arg(long)]
        absent: bool,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Show recent scan attempts, newest first.
    History {
        /// Maximum number of scans to show.
        #[arg(long, default_value_t = 20)]
        limit: i64,

        /// Emit JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Database summary: favorite counts, mapping coverage, scan activity.
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            migrate::run_migrations(&cfg).await?;
            println!("Database initialized successfully.");
        }
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
        Commands::Scan { force, dry_run } => {
            reconcile::run_scan(&cfg, ScanType::Manual, force, dry_run).await?;
        }
        Commands::Enable => {
            println!("Enabling favorites integration — running initial scan.");
            reconcile::run_scan(&cfg, ScanType::Initial, true, false).await?;
        }
        Commands::List {
            unmapped,
            missing,
            absent,
            json,
        } => {
            let filter = list::ListFilter {
                unmapped,
                missing,
                absent,
            };
            list::run_list(&cfg, filter, json).await?;
        }
        Commands::History { limit, json } => {
            scan_log::run_history(&cfg, limit, json).await?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg).await?;
        }
    }

    Ok(())
}
