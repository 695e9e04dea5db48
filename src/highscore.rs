//! Persisted best score
//!
//! A single integer under one LocalStorage key - no schema, no versioning.
//! Loaded once at startup; written only when a finished run beats it. Any
//! storage failure degrades to "no prior best" on read and a silent no-op
//! on write.

/// The session-best score tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// Legacy LocalStorage key, kept so existing players keep their record
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "highScoreExtreme";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Whether `score` beats the stored best
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.best
    }

    /// Adopt `score` if it qualifies; returns true when the record changed
    pub fn record(&mut self, score: u64) -> bool {
        if self.beaten_by(score) {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = raw.trim().parse::<u64>() {
                    log::info!("Loaded best score: {}", best);
                    return Self { best };
                }
                log::warn!("Unreadable best score {:?}, starting at 0", raw);
            }
        }

        Self::default()
    }

    /// Persist the best score to LocalStorage, best-effort (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.best.to_string());
            log::info!("Best score saved: {}", self.best);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
