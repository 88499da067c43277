use std::collections::BTreeMap;
use std::path::Path;
use std::time::UNIX_EPOCH;

use walkdir::WalkDir;

/// File path relative to the served root, mapped to its mtime in seconds
/// since the epoch. Values are compared only for equality; the magnitude is
/// never interpreted, so they must survive a JSON round-trip through the
/// client unchanged.
pub type Snapshot = BTreeMap<String, f64>;

const TRACKED_EXTENSIONS: [&str; 4] = ["html", "css", "js", "json"];

fn tracked(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| TRACKED_EXTENSIONS.contains(&ext))
}

/// Walks `root` and records the mtime of every regular file with a tracked
/// extension. Unreadable entries and stat failures are skipped rather than
/// aborting the scan.
pub fn scan(root: &Path) -> Snapshot {
    let mut files = Snapshot::new();

    for entry in WalkDir::new(root).into_iter().filter_map(|entry| entry.ok()) {
        if !entry.file_type().is_file() || !tracked(entry.path()) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        let mtime = entry
            .metadata()
            .ok()
            .and_then(|meta| meta.modified().ok())
            .and_then(|time| time.duration_since(UNIX_EPOCH).ok());

        if let Some(mtime) = mtime {
            files.insert(relative.to_string_lossy().into_owned(), mtime.as_secs_f64());
        }
    }

    files
}

/// A file counts as changed when it is missing from the previous snapshot or
/// its timestamp differs. Files present only in `previous` (deleted since the
/// last poll) do not count. An empty `previous` against a non-empty scan
/// therefore reports a change; the client reloads once on initial connect and
/// that behavior is kept as-is.
pub fn changed(previous: &Snapshot, current: &Snapshot) -> bool {
    current
        .iter()
        .any(|(path, mtime)| previous.get(path) != Some(mtime))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn scan_tracks_only_known_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("style.css"), "body {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("image.png"), [0u8; 4]).unwrap();

        let files = scan(dir.path());
        assert_eq!(
            files.keys().collect::<Vec<_>>(),
            ["index.html", "style.css"]
        );
    }

    #[test]
    fn scan_recurses_and_keys_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("js")).unwrap();
        fs::write(dir.path().join("js").join("app.js"), "// app").unwrap();

        let files = scan(dir.path());
        assert!(files.contains_key("js/app.js"));
    }

    #[test]
    fn unchanged_snapshot_reports_false() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.html"), "a").unwrap();

        let first = scan(dir.path());
        let second = scan(dir.path());
        assert!(!changed(&first, &second));
    }

    #[test]
    fn unknown_file_reports_true() {
        let previous = Snapshot::new();
        let current = Snapshot::from([("a.html".to_string(), 1.5)]);
        assert!(changed(&previous, &current));
    }

    #[test]
    fn timestamp_drift_reports_true() {
        let previous = Snapshot::from([("a.html".to_string(), 1.5)]);
        let current = Snapshot::from([("a.html".to_string(), 2.0)]);
        assert!(changed(&previous, &current));
    }

    #[test]
    fn deleted_file_alone_reports_false() {
        let previous = Snapshot::from([
            ("a.html".to_string(), 1.5),
            ("gone.css".to_string(), 3.0),
        ]);
        let current = Snapshot::from([("a.html".to_string(), 1.5)]);
        assert!(!changed(&previous, &current));
    }
}
