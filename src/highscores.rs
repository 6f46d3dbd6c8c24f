//! Best score record
//!
//! A single integer persisted as a decimal string. Reads that fail or do not
//! parse count as 0; failed writes are logged and dropped.

use crate::persistence::KeyValueStore;

/// The best score across all runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "wisdomWings_highScore";

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Read the stored best, defaulting to 0
    pub fn load(store: &impl KeyValueStore) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => {
                let value = parse_score(&raw);
                log::info!("Loaded best score {}", value);
                Self { value }
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                Self::default()
            }
        }
    }

    /// Keep `score` if it beats the current best, persisting best-effort.
    ///
    /// Returns true when `score` became the new best.
    pub fn record(&mut self, score: u64, store: &mut impl KeyValueStore) -> bool {
        if score <= self.value {
            return false;
        }
        self.value = score;
        match store.set(Self::STORAGE_KEY, &score.to_string()) {
            Ok(()) => log::info!("Best score saved ({})", score),
            Err(e) => log::warn!("Best score not saved: {}", e),
        }
        true
    }
}

/// Leading decimal digits, anything else is 0. Too many digits saturate.
fn parse_score(raw: &str) -> u64 {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}
