//! Favorites source document location and parsing.
//!
//! The favorites document is external state this crate reads but never
//! writes. Parsing is deliberately forgiving: a record missing its name or
//! target is skipped with a warning, and only a document that is malformed
//! at the top level surfaces as [`DocumentError::Malformed`] — which the
//! reconciler then treats according to [`MALFORMED_DOCUMENT_IS_EMPTY`].

use std::path::{Path, PathBuf};

use quick_xml::events::Event;

use crate::config::FavoritesConfig;
use crate::models::RawFavoriteEntry;

/// Policy for a document that fails to parse at the top level: `true`
/// means it is treated as "zero favorites currently resolvable" (the scan
/// completes and sweeps presence), not as a failed scan.
pub const MALFORMED_DOCUMENT_IS_EMPTY: bool = true;

/// Top-level document fault. Record-level problems never produce this;
/// they are skipped inside [`read_favorites`].
#[derive(Debug)]
pub enum DocumentError {
    Malformed(String),
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentError::Malformed(e) => write!(f, "malformed favorites document: {}", e),
        }
    }
}

impl std::error::Error for DocumentError {}

/// Locates the favorites document among the configured candidate paths.
pub struct FavoritesSource {
    candidates: Vec<PathBuf>,
}

impl FavoritesSource {
    /// Build the candidate list: the profile-relative primary location
    /// first, then any extra paths for non-standard deployments.
    pub fn from_config(config: &FavoritesConfig) -> Self {
        let mut candidates = vec![config.profile_dir.join(&config.file_name)];
        candidates.extend(config.extra_paths.iter().cloned());
        Self { candidates }
    }

    /// All candidate locations in search order.
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First existing candidate, or `None` when no document is present.
    pub fn locate(&self) -> Option<PathBuf> {
        self.candidates.iter().find(|p| p.is_file()).cloned()
    }
}

/// Source mtime in Unix milliseconds. Millisecond precision keeps the
/// exact-match change check sensitive to sub-second edits.
pub fn modified_time(path: &Path) -> Option<i64> {
    let modified = std::fs::metadata(path).ok()?.modified().ok()?;
    let since_epoch = modified
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .ok()?;
    Some(since_epoch.as_millis() as i64)
}

/// Parse the favorites document into its ordered records.
///
/// Each record is `<favourite name=".." thumb="..">target</favourite>`.
/// Records with a missing name or empty target are skipped with a warning
/// on stderr; whatever valid records exist are returned in document order.
pub fn read_favorites(path: &Path) -> Result<Vec<RawFavoriteEntry>, DocumentError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DocumentError::Malformed(format!("unreadable: {}", e)))?;

    let mut reader = quick_xml::Reader::from_reader(content.as_bytes());
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut text_buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"favourite" => {
                let (name, thumb, attrs_ok) = read_record_attributes(&e);
                let target = read_record_target(&mut reader, &mut text_buf)?;

                if !attrs_ok {
                    eprintln!("Warning: skipping favorite with malformed attributes");
                } else {
                    match name {
                        Some(ref n) if !n.trim().is_empty() && !target.trim().is_empty() => {
                            entries.push(RawFavoriteEntry {
                                name: n.trim().to_string(),
                                target_raw: target.trim().to_string(),
                                thumb,
                            });
                        }
                        Some(n) => {
                            eprintln!("Warning: skipping favorite '{}' with empty target", n);
                        }
                        None => {
                            eprintln!("Warning: skipping favorite record without a name");
                        }
                    }
                }
            }
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"favourite" => {
                let (name, _, _) = read_record_attributes(&e);
                eprintln!(
                    "Warning: skipping favorite '{}' with no target",
                    name.as_deref().unwrap_or("(unnamed)")
                );
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(DocumentError::Malformed(e.to_string())),
            Ok(_) => {}
        }
        buf.clear();
    }

    Ok(entries)
}

/// Pull `name` and `thumb` off a favourite start tag. The bool is false
/// when an attribute failed to decode (record-level fault).
fn read_record_attributes(
    e: &quick_xml::events::BytesStart<'_>,
) -> (Option<String>, Option<String>, bool) {
    let mut name = None;
    let mut thumb = None;
    for attr in e.attributes() {
        let attr = match attr {
            Ok(a) => a,
            Err(_) => return (name, thumb, false),
        };
        let value = match attr.unescape_value() {
            Ok(v) => v.into_owned(),
            Err(_) => return (name, thumb, false),
        };
        match attr.key.as_ref() {
            b"name" => name = Some(value),
            b"thumb" => thumb = Some(value),
            _ => {}
        }
    }
    (name, thumb, true)
}

/// Accumulate the text content of one favourite record up to its closing
/// tag. A document ending mid-record is a top-level fault.
fn read_record_target(
    reader: &mut quick_xml::Reader<&[u8]>,
    buf: &mut Vec<u8>,
) -> Result<String, DocumentError> {
    let mut target = String::new();
    loop {
        buf.clear();
        match reader.read_event_into(buf) {
            Ok(Event::Text(t)) => {
                target.push_str(t.unescape().unwrap_or_default().as_ref());
            }
            Ok(Event::CData(c)) => {
                target.push_str(&String::from_utf8_lossy(&c.into_inner()));
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"favourite" => break,
            Ok(Event::Eof) => {
                return Err(DocumentError::Malformed(
                    "document ended inside a favourite record".to_string(),
                ))
            }
            Err(e) => return Err(DocumentError::Malformed(e.to_string())),
            Ok(_) => {}
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_doc(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("favourites.xml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parses_records_in_document_order() {
        let tmp = TempDir::new().unwrap();
        let path = write_doc(
            &tmp,
            r#"<favourites>
                <favourite name="Movie A" thumb="a.png">PlayMedia("/m/a.mkv")</favourite>
                <favourite name="Movie B">PlayMedia("/m/b.mkv")</favourite>
            </favourites>"#,
        );

        let entries = read_favorites(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Movie A");
        assert_eq!(entries[0].thumb.as_deref(), Some("a.png"));
        assert_eq!(entries[1].name, "Movie B");
        assert!(entries[1].thumb.is_none());
        assert_eq!(entries[1].target_raw, r#"PlayMedia("/m/b.mkv")"#);
    }

    #[test]
    fn test_entity_escapes_unescaped() {
        let tmp = TempDir::new().unwrap();
        let path = write_doc(
            &tmp,
            r#"<favourites>
                <favourite name="A &amp; B">PlayMedia(&quot;/m/a.mkv&quot;)</favourite>
            </favourites>"#,
        );

        let entries = read_favorites(&path).unwrap();
        assert_eq!(entries[0].name, "A & B");
        assert_eq!(entries[0].target_raw, r#"PlayMedia("/m/a.mkv")"#);
    }

    #[test]
    fn test_bad_record_skipped_rest_kept() {
        let tmp = TempDir::new().unwrap();
        let path = write_doc(
            &tmp,
            r#"<favourites>
                <favourite>PlayMedia("/m/orphan.mkv")</favourite>
                <favourite name="Empty Target"></favourite>
                <favourite name="No Target"/>
                <favourite name="Good">PlayMedia("/m/good.mkv")</favourite>
            </favourites>"#,
        );

        let entries = read_favorites(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Good");
    }

    #[test]
    fn test_empty_document_is_zero_entries() {
        let tmp = TempDir::new().unwrap();
        let path = write_doc(&tmp, "<favourites></favourites>");
        assert!(read_favorites(&path).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_document_is_error_not_panic() {
        let tmp = TempDir::new().unwrap();
        let path = write_doc(&tmp, "<favourites><favourite name=\"X\">PlayMedia(");
        let err = read_favorites(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Malformed(_)));
    }

    #[test]
    fn test_malformed_document_policy_constant() {
        // The reconciler relies on this: an unreadable document sweeps
        // presence rather than failing the scan.
        assert!(MALFORMED_DOCUMENT_IS_EMPTY);
    }

    #[test]
    fn test_locate_prefers_primary_then_fallbacks() {
        let tmp = TempDir::new().unwrap();
        let primary_dir = tmp.path().join("profile");
        let fallback = tmp.path().join("alt").join("favourites.xml");
        fs::create_dir_all(fallback.parent().unwrap()).unwrap();
        fs::write(&fallback, "<favourites/>").unwrap();

        let config = FavoritesConfig {
            profile_dir: primary_dir.clone(),
            file_name: "favourites.xml".to_string(),
            extra_paths: vec![fallback.clone()],
        };
        let source = FavoritesSource::from_config(&config);
        assert_eq!(source.locate().unwrap(), fallback);

        fs::create_dir_all(&primary_dir).unwrap();
        let primary = primary_dir.join("favourites.xml");
        fs::write(&primary, "<favourites/>").unwrap();
        assert_eq!(source.locate().unwrap(), primary);
    }

    #[test]
    fn test_locate_none_when_absent() {
        let tmp = TempDir::new().unwrap();
        let config = FavoritesConfig {
            profile_dir: tmp.path().join("nope"),
            file_name: "favourites.xml".to_string(),
            extra_paths: vec![],
        };
        assert!(FavoritesSource::from_config(&config).locate().is_none());
    }

    #[test]
    fn test_modified_time_millis() {
        let tmp = TempDir::new().unwrap();
        let path = write_doc(&tmp, "<favourites/>");
        let mtime = modified_time(&path).unwrap();
        assert!(mtime > 0);
        assert!(modified_time(&tmp.path().join("missing.xml")).is_none());
    }
}
