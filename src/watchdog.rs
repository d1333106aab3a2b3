//! Exit when the binary on disk is replaced.
//!
//! Deploying is "copy the new build over the old one"; the service
//! supervisor restarts us, and the new build takes over within a second.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Modification time of `path`.
pub fn modified(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

/// True once `path` has a different mtime than `since`, or can no longer be
/// read.
pub fn binary_changed(path: &Path, since: SystemTime) -> bool {
    !modified(path).is_ok_and(|now| now == since)
}

/// Poll `path` every `interval` and exit the process with status 1 once
/// it changes.
///
/// Fails up front if the file cannot be read now.
pub fn spawn(path: PathBuf, interval: Duration) -> io::Result<JoinHandle<()>> {
    let since = modified(&path)?;
    tracing::info!("Watching {} for rebuilds", path.display());

    Ok(thread::spawn(move || {
        loop {
            thread::sleep(interval);
            if binary_changed(&path, since) {
                tracing::warn!("{} changed on disk; exiting", path.display());
                std::process::exit(1);
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::NamedTempFile;

    #[test]
    fn unchanged_file_is_not_reported() {
        let file = NamedTempFile::new().unwrap();
        let since = modified(file.path()).unwrap();
        assert!(!binary_changed(file.path(), since));
    }

    #[test]
    fn new_mtime_is_reported() {
        let file = NamedTempFile::new().unwrap();
        let since = modified(file.path()).unwrap();

        let later = since + Duration::from_secs(60);
        File::options()
            .write(true)
            .open(file.path())
            .unwrap()
            .set_modified(later)
            .unwrap();
        assert!(binary_changed(file.path(), since));
    }

    #[test]
    fn removed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lights");
        fs::write(&path, b"v1").unwrap();
        let since = modified(&path).unwrap();

        fs::remove_file(&path).unwrap();
        assert!(binary_changed(&path, since));
    }

    #[test]
    fn spawn_requires_readable_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(spawn(missing, POLL_INTERVAL).is_err());
    }
}
