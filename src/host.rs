//! Host Collaborator Boundary
//!
//! The plugin core never touches the clock, the screen, or the disk directly;
//! the embedding client supplies these through small traits. `FileConfigStore`
//! is a ready-made store for hosts that persist plugin settings as files.

use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Read/write access to string-valued plugin settings entries.
pub trait ConfigStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &str, value: &str);
}

/// Outbound sink for one-line notifications shown to the player.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Millisecond wall-clock source, used by integrators to stamp tick events.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Real wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// A [`ConfigStore`] backed by a single JSON file of key/value strings.
///
/// Entries are read once at construction; every `save` rewrites the file.
/// A missing or corrupt file starts empty, and write failures are logged
/// rather than surfaced.
pub struct FileConfigStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => HashMap::new(),
        };
        Self { path, entries }
    }

    fn flush(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string(&self.entries) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(&self.path, contents) {
                    warn!("Failed to write settings file {:?}: {}", self.path, e);
                }
            }
            Err(e) => warn!("Failed to serialize settings: {}", e),
        }
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }
}
