use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::{KeysmashError, Result};

/// Environment variable holding the log filter, e.g. `KEYSMASH_LOG=debug`.
pub const LOG_ENV: &str = "KEYSMASH_LOG";

/// Send `tracing` output to `path`. The terminal belongs to the UI, so logs
/// never go to stdout or stderr.
pub fn init(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| KeysmashError::Logging(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("keysmash.log");

        // A global subscriber may already be installed by another test;
        // either way the file must exist afterwards.
        let _ = init(&path);

        assert!(path.exists());
    }

    #[test]
    fn test_init_reports_unwritable_path() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"").unwrap();

        let err = init(&blocker.join("keysmash.log")).unwrap_err();
        assert!(matches!(err, KeysmashError::Io(_)));
    }
}
