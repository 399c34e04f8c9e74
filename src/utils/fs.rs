use std::path::{Path, PathBuf};
use tokio::fs;

/// Whether `dir` directly contains a file ending in `.{extension}`
pub async fn has_file_with_extension(dir: &Path, extension: &str) -> bool {
    let Ok(mut entries) = fs::read_dir(dir).await else {
        return false;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            return true;
        }
    }
    false
}

/// Nearest `file_name` that is a regular file in `start` or one of its ancestors
pub async fn find_file_upwards(start: &Path, file_name: &str) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(file_name);
        if let Ok(metadata) = fs::metadata(&candidate).await {
            if metadata.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// Closest ancestor of `path` that exists on disk
pub async fn highest_valid_dir(path: &Path) -> PathBuf {
    for dir in path.ancestors().skip(1) {
        if fs::metadata(dir).await.is_ok() {
            return dir.to_path_buf();
        }
    }
    PathBuf::from("/")
}
