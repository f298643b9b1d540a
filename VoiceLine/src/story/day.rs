//! Day-context tracking for fallback voice file names
//!
//! Story scene ids usually encode the in-game day (`Day3_intro`,
//! `7_elevator`). The last day seen is remembered so that lines without a
//! dialogue key can still be grouped per day in their fallback file name.

use lazy_static::lazy_static;
use regex::Regex;

/// Label used before any day has been observed
pub const DEFAULT_DAY: &str = "Common";

lazy_static! {
    static ref DAY_WORD: Regex = Regex::new(r"(?i)day\s*(\d+)").expect("valid day pattern");
    static ref LEADING_NUMBER: Regex = Regex::new(r"^(\d+)_").expect("valid number pattern");
}

/// Extract a `Day{n}` label from a dialogue key.
///
/// Tries `day<digits>` (any case, optional whitespace) anywhere in the key
/// first, then a key that starts with `<digits>_`. Digits are copied as-is.
pub fn extract_day(key: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }
    DAY_WORD
        .captures(key)
        .or_else(|| LEADING_NUMBER.captures(key))
        .and_then(|caps| caps.get(1))
        .map(|digits| format!("Day{}", digits.as_str()))
}

/// Most recently observed day label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayContext {
    current: String,
}

impl DayContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: DEFAULT_DAY.to_string(),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Update the label from a dialogue key; unmatched keys leave it alone.
    ///
    /// Returns `true` if the label changed.
    pub fn update_from_key(&mut self, key: &str) -> bool {
        match extract_day(key) {
            Some(day) if day != self.current => {
                tracing::debug!("Day context {} -> {}", self.current, day);
                self.current = day;
                true
            }
            _ => false,
        }
    }
}

impl Default for DayContext {
    fn default() -> Self {
        Self::new()
    }
}
