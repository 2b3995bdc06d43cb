//! Library matching and reachability seams.
//!
//! [`LibraryIndex`] answers "does this normalized path belong to a library
//! movie?" against the externally-maintained `media` catalog. It is
//! read-only from this crate's perspective. [`ReachabilityProbe`] is the
//! pluggable check behind `is_missing`: it runs during matching, before
//! the commit transaction, so a slow storage stat can never stretch the
//! transaction's hold.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::path::Path;

/// Read-only lookup from normalized path to library media identifier.
#[async_trait]
pub trait LibraryIndex: Send + Sync {
    async fn find_by_normalized_path(&self, normalized_path: &str) -> Result<Option<String>>;
}

/// Index over the `media` table. The catalog keeps `normalized_path`
/// current itself; this side only supplies already-normalized paths.
pub struct SqliteLibraryIndex {
    pool: SqlitePool,
}

impl SqliteLibraryIndex {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LibraryIndex for SqliteLibraryIndex {
    async fn find_by_normalized_path(&self, normalized_path: &str) -> Result<Option<String>> {
        let id: Option<String> =
            sqlx::query_scalar("SELECT id FROM media WHERE normalized_path = ?")
                .bind(normalized_path)
                .fetch_optional(&self.pool)
                .await?;
        Ok(id)
    }
}

/// Answer from a reachability probe. Only a definite `Unreachable` marks a
/// favorite as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    Unreachable,
    Unknown,
}

/// Checks whether a media target's backing file is reachable. Probes get
/// the *original* path spelling, since the normalized form is case-folded
/// and may not exist on case-sensitive storage.
pub trait ReachabilityProbe: Send + Sync {
    fn probe(&self, original_path: &str) -> Reachability;
}

/// Stats local filesystem paths; answers `Unknown` for network schemes
/// rather than blocking a scan on remote storage.
pub struct LocalFsProbe;

impl ReachabilityProbe for LocalFsProbe {
    fn probe(&self, original_path: &str) -> Reachability {
        let path = original_path.trim();
        if path.is_empty() {
            return Reachability::Unknown;
        }

        let local = if let Some(rest) = strip_file_scheme(path) {
            rest
        } else if path.contains("://") {
            return Reachability::Unknown;
        } else {
            path
        };

        if Path::new(local).exists() {
            Reachability::Reachable
        } else {
            Reachability::Unreachable
        }
    }
}

/// Probe that never answers — used when local probing is disabled.
pub struct NoProbe;

impl ReachabilityProbe for NoProbe {
    fn probe(&self, _original_path: &str) -> Reachability {
        Reachability::Unknown
    }
}

fn strip_file_scheme(path: &str) -> Option<&str> {
    let rest = path
        .strip_prefix("file://")
        .or_else(|| path.strip_prefix("FILE://"))?;
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_local_probe_existing_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.mkv");
        fs::write(&file, b"x").unwrap();

        let probe = LocalFsProbe;
        assert_eq!(
            probe.probe(file.to_str().unwrap()),
            Reachability::Reachable
        );
    }

    #[test]
    fn test_local_probe_missing_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("gone.mkv");
        let probe = LocalFsProbe;
        assert_eq!(
            probe.probe(file.to_str().unwrap()),
            Reachability::Unreachable
        );
    }

    #[test]
    fn test_network_paths_are_unknown() {
        let probe = LocalFsProbe;
        assert_eq!(probe.probe("smb://host/share/a.mkv"), Reachability::Unknown);
        assert_eq!(probe.probe("nfs://host/export/a.mkv"), Reachability::Unknown);
        assert_eq!(probe.probe(""), Reachability::Unknown);
    }

    #[test]
    fn test_file_scheme_probed_locally() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("b.mkv");
        fs::write(&file, b"x").unwrap();

        let probe = LocalFsProbe;
        let uri = format!("file://{}", file.display());
        assert_eq!(probe.probe(&uri), Reachability::Reachable);
    }

    #[test]
    fn test_no_probe_always_unknown() {
        assert_eq!(NoProbe.probe("/anything"), Reachability::Unknown);
    }
}
