//! Target classification for favorite command strings.
//!
//! A favorite's target is a media-center command like
//! `PlayMedia("smb://host/share/movie.mkv")` or
//! `ActivateWindow(videos,"videodb://movies/titles/")`. Classification
//! inspects the command shape and assigns a coarse category that gates
//! library matching; it is advisory, never a validity gate — unrecognized
//! shapes come back as [`Classification::Unknown`] rather than an error.

use crate::models::Classification;

/// Inspect a raw command string and return the extracted path argument (if
/// the class carries one) plus its classification. Only `FileOrMedia` and
/// `StackFile` yield a path; other classes are never library-matched.
pub fn classify(target_raw: &str) -> (Option<String>, Classification) {
    let target = target_raw.trim();
    let lower = target.to_lowercase();

    if let Some(arg) = command_argument(target, &lower, "playmedia(") {
        return classify_resource(&arg);
    }

    if lower.starts_with("runscript(")
        || lower.starts_with("runplugin(")
        || lower.starts_with("runaddon(")
    {
        return (None, Classification::PluginOrScript);
    }

    if lower.starts_with("activatewindow(") {
        if lower.contains("videodb://") || lower.contains("musicdb://") {
            return (None, Classification::DatabaseItem);
        }
        if lower.contains("plugin://") || lower.contains("script://") {
            return (None, Classification::PluginOrScript);
        }
        return (None, Classification::Unknown);
    }

    // Bare resource references appear in hand-edited documents
    if lower.starts_with("stack://")
        || lower.starts_with("videodb://")
        || lower.starts_with("musicdb://")
        || lower.starts_with("plugin://")
        || lower.starts_with("script://")
    {
        return classify_resource(target);
    }

    (None, Classification::Unknown)
}

/// Classify an already-extracted resource argument by its scheme.
fn classify_resource(arg: &str) -> (Option<String>, Classification) {
    let lower = arg.to_lowercase();
    if lower.starts_with("stack://") {
        return (
            Some(first_stack_part(&arg[8..]).to_string()),
            Classification::StackFile,
        );
    }
    if lower.starts_with("videodb://") || lower.starts_with("musicdb://") {
        return (None, Classification::DatabaseItem);
    }
    if lower.starts_with("plugin://") || lower.starts_with("script://") {
        return (None, Classification::PluginOrScript);
    }
    if arg.is_empty() {
        return (None, Classification::Unknown);
    }
    (Some(arg.to_string()), Classification::FileOrMedia)
}

/// Extract the first argument of `name(...)`, accepting both quoted and
/// unquoted forms. Returns `None` when the command name does not match.
fn command_argument(target: &str, lower: &str, prefix: &str) -> Option<String> {
    if !lower.starts_with(prefix) {
        return None;
    }
    let body = &target[prefix.len()..];
    let body = body.strip_suffix(')').unwrap_or(body);

    let arg = if let Some(rest) = body.strip_prefix('"') {
        rest.split('"').next().unwrap_or("")
    } else if let Some(rest) = body.strip_prefix('\'') {
        rest.split('\'').next().unwrap_or("")
    } else {
        // unquoted: the argument runs to the first comma
        body.split(',').next().unwrap_or("").trim()
    };

    Some(arg.to_string())
}

/// First component of a stacked-file reference. Parts are joined with
/// `" , "`; matching resolves against the first part.
fn first_stack_part(parts: &str) -> &str {
    parts.split(" , ").next().unwrap_or(parts).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playmedia_quoted() {
        let (path, class) = classify(r#"PlayMedia("smb://host/share/A.mkv")"#);
        assert_eq!(class, Classification::FileOrMedia);
        assert_eq!(path.as_deref(), Some("smb://host/share/A.mkv"));
    }

    #[test]
    fn test_playmedia_unquoted() {
        let (path, class) = classify("PlayMedia(/media/movies/a.mkv)");
        assert_eq!(class, Classification::FileOrMedia);
        assert_eq!(path.as_deref(), Some("/media/movies/a.mkv"));
    }

    #[test]
    fn test_playmedia_extra_arguments() {
        let (path, class) = classify(r#"PlayMedia("/media/movies/a.mkv",resume)"#);
        assert_eq!(class, Classification::FileOrMedia);
        assert_eq!(path.as_deref(), Some("/media/movies/a.mkv"));
    }

    #[test]
    fn test_playmedia_case_insensitive() {
        let (_, class) = classify(r#"playmedia("/m/a.mkv")"#);
        assert_eq!(class, Classification::FileOrMedia);
    }

    #[test]
    fn test_stack_file_extracts_first_part() {
        let (path, class) =
            classify(r#"PlayMedia("stack://smb://h/a-cd1.avi , smb://h/a-cd2.avi")"#);
        assert_eq!(class, Classification::StackFile);
        assert_eq!(path.as_deref(), Some("smb://h/a-cd1.avi"));
    }

    #[test]
    fn test_database_reference_yields_no_path() {
        let (path, class) = classify(r#"PlayMedia("videodb://movies/titles/42")"#);
        assert_eq!(class, Classification::DatabaseItem);
        assert!(path.is_none());
    }

    #[test]
    fn test_activatewindow_database() {
        let (path, class) =
            classify(r#"ActivateWindow(videos,"videodb://movies/titles/",return)"#);
        assert_eq!(class, Classification::DatabaseItem);
        assert!(path.is_none());
    }

    #[test]
    fn test_plugin_invocations() {
        for target in [
            r#"RunScript(script.cinemavision)"#,
            r#"RunPlugin("plugin://plugin.video.example/?mode=1")"#,
            r#"RunAddon(plugin.video.example)"#,
            r#"PlayMedia("plugin://plugin.video.example/play/1")"#,
            r#"ActivateWindow(videos,"plugin://plugin.video.example/",return)"#,
        ] {
            let (path, class) = classify(target);
            assert_eq!(class, Classification::PluginOrScript, "target: {}", target);
            assert!(path.is_none());
        }
    }

    #[test]
    fn test_bare_references() {
        let (path, class) = classify("stack:///m/a-1.avi , /m/a-2.avi");
        assert_eq!(class, Classification::StackFile);
        assert_eq!(path.as_deref(), Some("/m/a-1.avi"));

        let (_, class) = classify("videodb://movies/titles/7");
        assert_eq!(class, Classification::DatabaseItem);
    }

    #[test]
    fn test_unrecognized_is_unknown_not_error() {
        for target in [
            "ActivateWindow(10025)",
            "SetFocus(50)",
            "",
            "just some text",
        ] {
            let (path, class) = classify(target);
            assert_eq!(class, Classification::Unknown, "target: {}", target);
            assert!(path.is_none());
        }
    }

    #[test]
    fn test_empty_playmedia_argument() {
        let (path, class) = classify("PlayMedia()");
        assert_eq!(class, Classification::Unknown);
        assert!(path.is_none());
    }
}
