//! Append-only audit of reconciliation attempts.
//!
//! Every completed scan — including failures — leaves exactly one row
//! here. Rows are never updated. The latest successful row per source
//! path doubles as the change-detection checkpoint.

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use crate::models::ScanRecord;

/// Append one scan record. Write-once; no retries here.
pub async fn record(pool: &SqlitePool, rec: &ScanRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO scan_log (id, scan_type, file_path, file_modified, items_found,
                              items_mapped, items_added, items_updated, scan_duration_ms,
                              success, error_message, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&rec.id)
    .bind(&rec.scan_type)
    .bind(&rec.file_path)
    .bind(rec.file_modified)
    .bind(rec.items_found)
    .bind(rec.items_mapped)
    .bind(rec.items_added)
    .bind(rec.items_updated)
    .bind(rec.scan_duration_ms)
    .bind(rec.success)
    .bind(&rec.error_message)
    .bind(rec.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Most recent successful scan of the given source path, if any. Feeds
/// the exact-mtime change check.
pub async fn latest_successful(pool: &SqlitePool, file_path: &str) -> Result<Option<ScanRecord>> {
    let row = sqlx::query(
        r#"
        SELECT id, scan_type, file_path, file_modified, items_found, items_mapped,
               items_added, items_updated, scan_duration_ms, success, error_message, created_at
        FROM scan_log
        WHERE file_path = ? AND success = 1
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(file_path)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| row_to_record(&r)))
}

/// Most recent scan attempts, newest first.
pub async fn recent(pool: &SqlitePool, limit: i64) -> Result<Vec<ScanRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT id, scan_type, file_path, file_modified, items_found, items_mapped,
               items_added, items_updated, scan_duration_ms, success, error_message, created_at
        FROM scan_log
        ORDER BY created_at DESC, id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(row_to_record).collect())
}

/// CLI entry point for `favs history`: print recent scan attempts.
pub async fn run_history(config: &crate::config::Config, limit: i64, json: bool) -> Result<()> {
    let pool = crate::db::connect(config).await?;
    let records = recent(&pool, limit).await?;
    pool.close().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("no scans recorded");
        return Ok(());
    }

    println!(
        "{:<18} {:<8} {:>6} {:>7} {:>6} {:>8} {:>7}  STATUS",
        "CREATED", "TYPE", "FOUND", "MAPPED", "ADDED", "UPDATED", "MS"
    );
    for rec in &records {
        println!(
            "{:<18} {:<8} {:>6} {:>7} {:>6} {:>8} {:>7}  {}",
            crate::stats::format_ts_iso(rec.created_at),
            rec.scan_type,
            rec.items_found,
            rec.items_mapped,
            rec.items_added,
            rec.items_updated,
            rec.scan_duration_ms,
            if rec.success { "ok" } else { "FAILED" }
        );
        if let Some(ref err) = rec.error_message {
            println!("{:<18} {}", "", err);
        }
    }

    Ok(())
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> ScanRecord {
    ScanRecord {
        id: row.get("id"),
        scan_type: row.get("scan_type"),
        file_path: row.get("file_path"),
        file_modified: row.get("file_modified"),
        items_found: row.get("items_found"),
        items_mapped: row.get("items_mapped"),
        items_added: row.get("items_added"),
        items_updated: row.get("items_updated"),
        scan_duration_ms: row.get("scan_duration_ms"),
        success: row.get("success"),
        error_message: row.get("error_message"),
        created_at: row.get("created_at"),
    }
}
