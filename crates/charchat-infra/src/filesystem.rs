//! Data directory layout.

use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "CHARCHAT_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `CHARCHAT_DATA_DIR` environment variable
/// 2. `~/.charchat`
/// 3. `.charchat` in the working directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".charchat");
    }

    PathBuf::from(".charchat")
}

/// Resolve a configured directory: absolute paths are kept, relative ones
/// live inside the data directory.
pub fn resolve_in_data_dir(data_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        data_dir.join(path)
    }
}
