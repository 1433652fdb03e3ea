use chrono::{DateTime, Local};
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::warn;

/// One directory child. Metadata fields are `None` when the stat failed;
/// the entry itself is never dropped from a listing.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
    pub size: Option<u64>,
    pub modified: Option<DateTime<Local>>,
}

/// The directory itself could not be opened or read.
#[derive(Debug, Error)]
#[error("failed to read directory {}: {source}", path.display())]
pub struct DirectoryReadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// List a directory's children, sorted directories-first then
/// case-insensitive by name.
///
/// Per-child stats run concurrently and are keyed by enumeration index, so
/// ties in the sort keep the order the filesystem returned them in. A child
/// whose stat fails is logged and kept as a degraded entry rather than
/// hiding the rest of the directory.
pub async fn list_directory(path: &Path) -> Result<Vec<Entry>, DirectoryReadError> {
    let read_error = |source| DirectoryReadError {
        path: path.to_path_buf(),
        source,
    };

    let mut dir = tokio::fs::read_dir(path).await.map_err(read_error)?;
    let mut children = Vec::new();
    while let Some(child) = dir.next_entry().await.map_err(read_error)? {
        let name = child.file_name().to_string_lossy().into_owned();
        children.push((name, child.path()));
    }

    let child_count = children.len();
    let mut stats = JoinSet::new();
    for (index, (name, full_path)) in children.into_iter().enumerate() {
        stats.spawn(async move { (index, stat_entry(name, full_path).await) });
    }

    let mut slots: Vec<Option<Entry>> = std::iter::repeat_with(|| None)
        .take(child_count)
        .collect();
    while let Some(joined) = stats.join_next().await {
        match joined {
            Ok((index, entry)) => slots[index] = Some(entry),
            Err(err) => warn!("stat task failed: {err}"),
        }
    }

    let mut entries: Vec<Entry> = slots.into_iter().flatten().collect();
    sort_entries(&mut entries);
    Ok(entries)
}

async fn stat_entry(name: String, full_path: PathBuf) -> Entry {
    match tokio::fs::metadata(&full_path).await {
        Ok(meta) => Entry {
            name,
            is_directory: meta.is_dir(),
            size: Some(meta.len()),
            modified: meta.modified().ok().map(DateTime::<Local>::from),
            path: full_path,
        },
        Err(err) => {
            warn!("cannot stat {}: {err}", full_path.display());
            // Keep the name visible even when the child is unreadable.
            Entry {
                name,
                is_directory: false,
                size: None,
                modified: None,
                path: full_path,
            }
        }
    }
}

/// Directories before files, case-insensitive alphabetical within each
/// group. The sort is stable, so identical case-folded names keep their
/// enumeration order.
pub fn sort_entries(entries: &mut [Entry]) {
    entries.sort_by(|a, b| {
        b.is_directory
            .cmp(&a.is_directory)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });
}

/// Lexical parent of a path; the root is its own parent.
pub fn parent_path(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from(std::path::MAIN_SEPARATOR_STR),
    }
}

pub fn is_root(path: &Path) -> bool {
    path.parent().is_none()
}

/// Expand a leading `~`, make the path absolute, and clean `.`/`..`
/// segments lexically. No filesystem access.
pub fn resolve_path(input: &str) -> PathBuf {
    let expanded = if let Some(rest) = input.strip_prefix('~') {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_default();
        Path::new(&home).join(rest.trim_start_matches(['/', '\\']))
    } else {
        PathBuf::from(input)
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from(std::path::MAIN_SEPARATOR_STR))
            .join(expanded)
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            // Popping at the root is a no-op, so `..` never escapes it.
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[tokio::test]
    async fn directories_sort_before_files() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("zeta")).unwrap();
        std::fs::create_dir(temp.path().join("Alpha")).unwrap();
        touch(temp.path(), "beta.txt");
        touch(temp.path(), "ALPHA.txt");

        let entries = list_directory(temp.path()).await.unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "zeta", "ALPHA.txt", "beta.txt"]);
        assert!(entries[0].is_directory);
        assert!(entries[1].is_directory);
        assert!(!entries[2].is_directory);
    }

    #[tokio::test]
    async fn listing_is_deterministic() {
        let temp = TempDir::new().unwrap();
        for name in ["c.txt", "a.txt", "B.txt"] {
            touch(temp.path(), name);
        }
        std::fs::create_dir(temp.path().join("sub")).unwrap();

        let first: Vec<String> = list_directory(temp.path())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        let second: Vec<String> = list_directory(temp.path())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn empty_directory_lists_nothing() {
        let temp = TempDir::new().unwrap();
        let entries = list_directory(temp.path()).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = list_directory(&missing).await.unwrap_err();
        assert_eq!(err.path, missing);
    }

    #[tokio::test]
    async fn file_path_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "plain.txt");
        assert!(list_directory(&temp.path().join("plain.txt")).await.is_err());
    }

    #[tokio::test]
    async fn stat_fills_metadata() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "sized.txt");
        let entries = list_directory(temp.path()).await.unwrap();
        assert_eq!(entries[0].size, Some(1));
        assert!(entries[0].modified.is_some());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_child_is_kept_degraded() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "ok.txt");
        // A dangling symlink makes the follow-the-link stat fail.
        std::os::unix::fs::symlink("does-not-exist", temp.path().join("dangling")).unwrap();

        let entries = list_directory(temp.path()).await.unwrap();
        assert_eq!(entries.len(), 2);
        let broken = entries.iter().find(|e| e.name == "dangling").unwrap();
        assert!(!broken.is_directory);
        assert!(broken.size.is_none());
        assert!(broken.modified.is_none());
    }

    #[test]
    fn degraded_entry_sorts_among_files() {
        let mk = |name: &str, is_directory: bool, size: Option<u64>| Entry {
            name: name.to_string(),
            path: PathBuf::from("/t").join(name),
            is_directory,
            size,
            modified: None,
        };
        let mut entries = vec![
            mk("zzz.log", false, Some(4)),
            mk("broken", false, None),
            mk("docs", true, Some(0)),
            mk("a.txt", false, Some(4)),
        ];
        sort_entries(&mut entries);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["docs", "a.txt", "broken", "zzz.log"]);
    }

    #[test]
    fn parent_of_root_is_root() {
        assert_eq!(parent_path(Path::new("/")), PathBuf::from("/"));
        assert_eq!(parent_path(Path::new("/tmp/sub")), PathBuf::from("/tmp"));
        assert!(is_root(Path::new("/")));
        assert!(!is_root(Path::new("/tmp")));
    }

    #[test]
    fn resolve_cleans_dot_segments() {
        assert_eq!(resolve_path("/a/b/../c/./d"), PathBuf::from("/a/c/d"));
        assert_eq!(resolve_path("/.."), PathBuf::from("/"));
        assert_eq!(resolve_path("/a/.."), PathBuf::from("/"));
    }

    #[test]
    fn resolve_makes_relative_absolute() {
        assert!(resolve_path("some/relative/dir").is_absolute());
    }

    #[test]
    fn resolve_expands_tilde() {
        if let Ok(home) = std::env::var("HOME") {
            if !home.is_empty() {
                assert_eq!(resolve_path("~/notes"), Path::new(&home).join("notes"));
            }
        }
    }
}
