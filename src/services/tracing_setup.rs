//! Diagnostics go to a file; the terminal belongs to the viewer.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log file used when `--log-file` is not given
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("cursexml.log")
}

/// Filter from `RUST_LOG`, falling back to `info`
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `log_file`.
///
/// Returns false when the file cannot be created or a subscriber is already
/// installed; the viewer then runs without logging.
pub fn init_global(log_file: &Path) -> bool {
    let file = match File::create(log_file) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", log_file.display(), e);
            return false;
        }
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(env_filter())
        .try_init()
        .is_ok()
}
