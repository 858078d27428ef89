//! File-backed logging.
//!
//! The terminal is in raw mode on the alternate screen while playing, so log
//! lines go to ~/.tugwar/tugwar.log instead of stderr. `RUST_LOG` sets the
//! level as usual.

use super::persistence::data_path;
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "tugwar.log";

/// Level used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Install the global logger. Returns the log file path.
pub fn init_logging() -> io::Result<PathBuf> {
    let path = data_path(LOG_FILE_NAME)?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(path)
}
