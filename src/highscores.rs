//! High score persistence
//!
//! Stored as the decimal string of a non-negative integer under a single key.
//! Reads are lenient: the leading integer counts and anything unreadable loads
//! as zero.

use crate::persistence::Storage;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappy_bird_high_score";

    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Coerce a stored value by its leading integer: `"12abc"` is 12, `"3.7"` is 3.
    /// Absent, non-numeric, or negative becomes 0; values past `u32::MAX` saturate.
    pub fn parse(raw: Option<&str>) -> u32 {
        let Some(raw) = raw else { return 0 };
        let text = raw.trim_start();
        let (negative, digits) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let digits = &digits[..end];

        if digits.is_empty() {
            log::warn!("Discarding unreadable high score {:?}", raw);
            return 0;
        }
        if negative {
            return 0;
        }
        digits
            .bytes()
            .try_fold(0u32, |acc, d| acc.checked_mul(10)?.checked_add(u32::from(d - b'0')))
            .unwrap_or(u32::MAX)
    }

    /// Load from storage; never fails
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let best = Self::parse(storage.get(Self::STORAGE_KEY).as_deref());
        log::info!("Loaded high score {}", best);
        Self { best }
    }

    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) {
        storage.set(Self::STORAGE_KEY, &self.best.to_string());
        log::info!("High score saved ({})", self.best);
    }

    /// Explicit overwrite (e.g. a reset from settings); negatives clamp to zero
    pub fn overwrite<S: Storage + ?Sized>(value: i64, storage: &mut S) -> Self {
        let score = Self::new(value.clamp(0, u32::MAX as i64) as u32);
        score.save(storage);
        score
    }
}
