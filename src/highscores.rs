//! Persistent best score.
//!
//! A single value, stored as JSON in LocalStorage on the web build. Read
//! failure (or a missing/corrupt entry) falls back to zero; write failure is
//! logged and never interrupts play.

use serde::{Deserialize, Serialize};

/// Best score achieved across runs; monotonically non-decreasing
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BestScore {
    pub value: u32,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "skyflap_best_score";

    /// Record a run score; raises and persists the best if exceeded.
    /// Returns true when a new best was set.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            self.save();
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
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = serde_json::from_str::<BestScore>(&json) {
                    log::info!("loaded best score: {}", best.value);
                    return best;
                }
                log::warn!("best score entry unreadable, starting from zero");
            }
        }

        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::warn!("LocalStorage unavailable, best score not persisted");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("failed to persist best score");
                }
            }
            Err(e) => log::warn!("failed to serialize best score: {e}"),
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No persistent store off the web build
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_monotone() {
        let mut best = BestScore::default();
        assert!(best.record(3));
        assert!(!best.record(2));
        assert_eq!(best.value, 3);
        assert!(best.record(5));
        assert_eq!(best.value, 5);
        assert!(!best.record(5), "equal score is not a new best");
    }

    #[test]
    fn zero_never_records() {
        let mut best = BestScore::default();
        assert!(!best.record(0));
        assert_eq!(best.value, 0);
    }

    #[test]
    fn json_round_trip() {
        let best = BestScore { value: 17 };
        let json = serde_json::to_string(&best).unwrap();
        let back: BestScore = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value, 17);
    }
}
