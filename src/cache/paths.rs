// Cache path utilities.
// One directory holds the comment snapshot, the image selections, and the log.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// File holding the last successful comment fetch.
pub const COMMENTS_FILE: &str = "comments.json";

/// File holding the comment id → image reference map.
pub const SELECTIONS_FILE: &str = "selected_images.json";

/// Log file written by the tracing subscriber.
pub const LOG_FILE: &str = "lpl.log";

/// Get the base cache directory (~/.cache/lpl on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "lpl").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the comment snapshot under `root`.
pub fn comments_path(root: &Path) -> PathBuf {
    root.join(COMMENTS_FILE)
}

/// Path to the persisted image selections under `root`.
pub fn selections_path(root: &Path) -> PathBuf {
    root.join(SELECTIONS_FILE)
}

/// Path to the log file under `root`.
pub fn log_path(root: &Path) -> PathBuf {
    root.join(LOG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_root() {
        let root = Path::new("/tmp/lpl-cache");
        assert_eq!(comments_path(root), root.join("comments.json"));
        assert_eq!(selections_path(root), root.join("selected_images.json"));
        assert_eq!(log_path(root), root.join("lpl.log"));
    }
}
