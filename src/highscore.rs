//! Persisted best score
//!
//! A single integer under the `highScore` key, stored as plain text so it
//! stays readable from the browser devtools.

use crate::platform::Storage;

/// Best final score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// Storage key
    const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a finished session's score.
    /// Returns true if it beat the previous best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load from storage (0 when absent or unreadable)
    pub fn load(storage: &impl Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Some(raw) => match serde_json::from_str::<u64>(raw.trim()) {
                Ok(best) => {
                    log::info!("Loaded high score: {}", best);
                    Self { best }
                }
                Err(e) => {
                    log::warn!("Ignoring unreadable high score {:?}: {}", raw, e);
                    Self::default()
                }
            },
            None => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
        }
    }

    /// Save to storage
    pub fn save(&self, storage: &mut impl Storage) {
        storage.set_item(Self::STORAGE_KEY, &self.best.to_string());
        log::info!("High score saved ({})", self.best);
    }
}
