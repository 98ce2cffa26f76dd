//! Reloads the overlay's config file when its modification time changes

use std::time::{Duration, Instant, SystemTime};
use tracing::{info, warn};

use crate::config::CrosshairSettings;
use crate::constants::timing::CONFIG_POLL_MS;
use crate::store::StaticConfigFile;

pub struct ConfigWatcher {
    file: StaticConfigFile,
    last_modified: Option<SystemTime>,
    last_check: Instant,
}

impl ConfigWatcher {
    /// Starts from the file's current state; only later edits are reported
    pub fn new(file: StaticConfigFile) -> Self {
        let last_modified = file.modified();
        Self {
            file,
            last_modified,
            last_check: Instant::now(),
        }
    }

    /// Check the file if the poll interval has passed
    pub fn poll(&mut self) -> Option<CrosshairSettings> {
        if self.last_check.elapsed() < Duration::from_millis(CONFIG_POLL_MS) {
            return None;
        }
        self.last_check = Instant::now();
        self.check()
    }

    /// New settings if the file changed since the last check
    pub(crate) fn check(&mut self) -> Option<CrosshairSettings> {
        let modified = self.file.modified();
        if modified == self.last_modified {
            return None;
        }
        self.last_modified = modified;

        match self.file.fetch() {
            Ok(Some(raw)) => {
                info!(path = %self.file.path().display(), "Config file changed, reloading");
                Some(CrosshairSettings::normalize(&raw))
            }
            Ok(None) => {
                warn!(path = %self.file.path().display(), "Config file removed, keeping current settings");
                None
            }
            Err(e) => {
                warn!(error = ?e, "Config file changed but could not be read, keeping current settings");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("crosshair-watch-{tag}-{}.json", std::process::id()))
    }

    fn bump_mtime(path: &PathBuf, secs: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(secs)).unwrap();
    }

    #[test]
    fn test_unchanged_file_reports_nothing() {
        let path = temp_path("unchanged");
        fs::write(&path, r#"{"size": 33}"#).unwrap();

        let mut watcher = ConfigWatcher::new(StaticConfigFile::new(path.clone()));
        assert_eq!(watcher.check(), None);
        assert_eq!(watcher.poll(), None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_edit_is_reloaded_once() {
        let path = temp_path("edited");
        fs::write(&path, r#"{"size": 33}"#).unwrap();
        let mut watcher = ConfigWatcher::new(StaticConfigFile::new(path.clone()));

        fs::write(&path, r#"{"size": 44, "style": "square"}"#).unwrap();
        bump_mtime(&path, 5);

        let reloaded = watcher.check().unwrap();
        assert_eq!(reloaded.size, 44);
        assert_eq!(watcher.check(), None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_file_appearing_later_is_picked_up() {
        let path = temp_path("appearing");
        let _ = fs::remove_file(&path);
        let mut watcher = ConfigWatcher::new(StaticConfigFile::new(path.clone()));
        assert_eq!(watcher.check(), None);

        fs::write(&path, r#"{"gap": 6}"#).unwrap();
        assert_eq!(watcher.check().map(|s| s.gap), Some(6));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_broken_edit_keeps_current() {
        let path = temp_path("broken");
        fs::write(&path, r#"{"size": 33}"#).unwrap();
        let mut watcher = ConfigWatcher::new(StaticConfigFile::new(path.clone()));

        fs::write(&path, "{ half written").unwrap();
        bump_mtime(&path, 5);
        assert_eq!(watcher.check(), None);

        fs::remove_file(&path).unwrap();
    }
}
