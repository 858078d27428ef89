//! Paths under ~/.tugwar/ and JSON file loading.

use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory name under the home directory.
pub const DATA_DIR_NAME: &str = ".tugwar";

/// Get the ~/.tugwar/ directory path, creating it if needed.
pub fn tugwar_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(DATA_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.tugwar/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(tugwar_dir()?.join(filename))
}

/// Read and parse a JSON file. A missing file is `Ok(None)`; malformed
/// JSON is an `InvalidData` error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
