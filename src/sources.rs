use anyhow::Result;

use crate::config::Config;
use crate::source::{self, FavoritesSource};
use crate::stats::format_ts_iso;

/// List the candidate favorites locations and which one a scan would use.
pub fn list_sources(config: &Config) -> Result<()> {
    let favorites = FavoritesSource::from_config(&config.favorites);
    let active = favorites.locate();

    println!("{:<8} {:<9} {:<18} PATH", "ACTIVE", "STATUS", "MODIFIED");
    for candidate in favorites.candidates() {
        let status = if candidate.is_file() { "PRESENT" } else { "ABSENT" };
        let modified = source::modified_time(candidate)
            .map(|ms| format_ts_iso(ms / 1000))
            .unwrap_or_else(|| "-".to_string());
        let marker = match &active {
            Some(path) if path == candidate => "*",
            _ => "",
        };
        println!(
            "{:<8} {:<9} {:<18} {}",
            marker,
            status,
            modified,
            candidate.display()
        );
    }

    if active.is_none() {
        println!();
        println!("no favorites document found; a scan would fail");
    }

    Ok(())
}
