use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db;

pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    create_schema(&pool).await?;
    pool.close().await;
    Ok(())
}

/// Create all tables and indexes. Idempotent — safe to run repeatedly.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // Media catalog. Populated by an external ingestion pipeline; this
    // crate only reads it (library matching) and keeps the favorite FK
    // resolvable.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS media (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            year INTEGER,
            file_path TEXT NOT NULL,
            normalized_path TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Reconciled favorite state. Rows are retired in place via `present`,
    // never deleted, so external references to them stay valid.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS favorite (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            normalized_path TEXT NOT NULL DEFAULT '',
            original_path TEXT NOT NULL DEFAULT '',
            favorite_type TEXT NOT NULL,
            target_raw TEXT NOT NULL,
            target_classification TEXT NOT NULL,
            normalized_key TEXT NOT NULL UNIQUE,
            library_movie_id TEXT REFERENCES media(id),
            is_mapped INTEGER NOT NULL DEFAULT 0,
            is_missing INTEGER NOT NULL DEFAULT 0,
            present INTEGER NOT NULL DEFAULT 1,
            thumb_ref TEXT,
            first_seen INTEGER NOT NULL,
            last_seen INTEGER NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Append-only audit of reconciliation attempts.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS scan_log (
            id TEXT PRIMARY KEY,
            scan_type TEXT NOT NULL,
            file_path TEXT NOT NULL,
            file_modified INTEGER,
            items_found INTEGER NOT NULL,
            items_mapped INTEGER NOT NULL,
            items_added INTEGER NOT NULL,
            items_updated INTEGER NOT NULL,
            scan_duration_ms INTEGER NOT NULL,
            success INTEGER NOT NULL,
            error_message TEXT,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_media_normalized_path ON media(normalized_path)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_favorite_library_movie_id ON favorite(library_movie_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_favorite_is_mapped ON favorite(is_mapped)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_favorite_present ON favorite(present)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_scan_log_file_path ON scan_log(file_path)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_scan_log_created_at ON scan_log(created_at DESC)")
        .execute(pool)
        .await?;

    Ok(())
}
