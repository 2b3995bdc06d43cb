//! Database statistics and health overview.
//!
//! Provides a quick summary of the reconciled state: favorite counts,
//! mapping coverage, and recent scan activity. Used by `favs stats` to
//! give confidence that scans are doing what they should.

use anyhow::Result;
use sqlx::Row;

use crate::config::Config;
use crate::db;
use crate::scan_log;

/// Run the stats command: query the database and print a summary.
pub async fn run_stats(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorite")
        .fetch_one(&pool)
        .await?;
    let present: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorite WHERE present = 1")
        .fetch_one(&pool)
        .await?;
    let mapped: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM favorite WHERE present = 1 AND is_mapped = 1")
            .fetch_one(&pool)
            .await?;
    let missing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM favorite WHERE present = 1 AND is_missing = 1")
            .fetch_one(&pool)
            .await?;
    let scans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scan_log")
        .fetch_one(&pool)
        .await?;
    let failed_scans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM scan_log WHERE success = 0")
        .fetch_one(&pool)
        .await?;

    let db_size = std::fs::metadata(&config.db.path)
        .map(|m| m.len())
        .unwrap_or(0);

    println!("Favorites Sync — Database Stats");
    println!("===============================");
    println!();
    println!("  Database:    {}", config.db.path.display());
    println!("  Size:        {}", format_bytes(db_size));
    println!();
    println!("  Favorites:   {} ({} present, {} retired)", total, present, total - present);
    println!(
        "  Mapped:      {} / {} ({}%)",
        mapped,
        present,
        if present > 0 { (mapped * 100) / present } else { 0 }
    );
    println!("  Missing:     {}", missing);

    // Per-type breakdown of present rows
    let type_rows = sqlx::query(
        r#"
        SELECT favorite_type, COUNT(*) AS n
        FROM favorite
        WHERE present = 1
        GROUP BY favorite_type
        ORDER BY n DESC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    if !type_rows.is_empty() {
        println!();
        println!("  By type:");
        for row in &type_rows {
            println!(
                "  {:<12} {:>6}",
                row.get::<String, _>("favorite_type"),
                row.get::<i64, _>("n")
            );
        }
    }

    println!();
    println!("  Scans:       {} ({} failed)", scans, failed_scans);

    if let Some(last) = scan_log::recent(&pool, 1).await?.into_iter().next() {
        println!(
            "  Last scan:   {} ({}, {} found, {})",
            format_ts_relative(last.created_at),
            last.scan_type,
            last.items_found,
            if last.success { "ok" } else { "failed" }
        );
    } else {
        println!("  Last scan:   never");
    }

    println!();

    pool.close().await;
    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Format a Unix timestamp as a relative time string (e.g. "3 hours ago").
fn format_ts_relative(ts: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let delta = now - ts;

    if delta < 0 {
        return format_ts_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if delta < 86400 * 30 {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_ts_iso(ts)
    }
}

pub(crate) fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
