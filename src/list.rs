//! Favorite listing for the CLI.
//!
//! Read-only surface over the reconciled store. Defaults to rows present
//! in the most recent scan; `--absent` shows retired rows instead. Output
//! is a text table or, with `--json`, a machine-readable array.

use anyhow::Result;
use sqlx::Row;

use crate::config::Config;
use crate::db;
use crate::models::PersistedFavorite;

/// Filters for `favs list`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    /// Media favorites with no library match.
    pub unmapped: bool,
    /// Favorites whose backing file is unreachable.
    pub missing: bool,
    /// Show retired rows (absent from the last scan) instead of present ones.
    pub absent: bool,
}

pub async fn run_list(config: &Config, filter: ListFilter, json: bool) -> Result<()> {
    let pool = db::connect(config).await?;

    let mut sql = String::from(
        r#"
        SELECT id, name, normalized_path, original_path, favorite_type, target_raw,
               target_classification, library_movie_id, is_mapped, is_missing, present,
               thumb_ref, first_seen, last_seen, created_at, updated_at
        FROM favorite
        WHERE present = ?
        "#,
    );
    if filter.unmapped {
        sql.push_str(" AND favorite_type = 'media' AND is_mapped = 0");
    }
    if filter.missing {
        sql.push_str(" AND is_missing = 1");
    }
    sql.push_str(" ORDER BY name COLLATE NOCASE ASC");

    let rows = sqlx::query(&sql)
        .bind(!filter.absent)
        .fetch_all(&pool)
        .await?;

    let favorites: Vec<PersistedFavorite> = rows
        .iter()
        .map(|r| PersistedFavorite {
            id: r.get("id"),
            name: r.get("name"),
            normalized_path: r.get("normalized_path"),
            original_path: r.get("original_path"),
            favorite_type: r.get("favorite_type"),
            target_raw: r.get("target_raw"),
            target_classification: r.get("target_classification"),
            library_movie_id: r.get("library_movie_id"),
            is_mapped: r.get("is_mapped"),
            is_missing: r.get("is_missing"),
            present: r.get("present"),
            thumb_ref: r.get("thumb_ref"),
            first_seen: r.get("first_seen"),
            last_seen: r.get("last_seen"),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        })
        .collect();

    pool.close().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&favorites)?);
        return Ok(());
    }

    if favorites.is_empty() {
        println!("no favorites match");
        return Ok(());
    }

    println!(
        "{:<28} {:<10} {:<7} {:<8} PATH",
        "NAME", "TYPE", "MAPPED", "MISSING"
    );
    for fav in &favorites {
        // Only the credential-stripped path is ever displayed
        println!(
            "{:<28} {:<10} {:<7} {:<8} {}",
            fav.name,
            fav.favorite_type,
            if fav.is_mapped { "yes" } else { "-" },
            if fav.is_missing { "yes" } else { "-" },
            fav.normalized_path
        );
    }
    println!();
    println!("{} favorite(s)", favorites.len());

    Ok(())
}
