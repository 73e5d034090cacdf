//! Reading-time estimate used to size auto-close timers.

use std::time::Duration;

/// Word count assumed for a missing or blank description.
pub const DEFAULT_WORD_COUNT: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingTime {
    pub ms_per_word: u64,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for ReadingTime {
    fn default() -> Self {
        Self {
            ms_per_word: 300,
            min_ms: 4000,
            max_ms: 15000,
        }
    }
}

impl ReadingTime {
    pub fn estimate(&self, text: Option<&str>) -> Duration {
        let words = word_count(text);
        let ms = words
            .saturating_mul(self.ms_per_word)
            .clamp(self.min_ms, self.max_ms.max(self.min_ms));
        Duration::from_millis(ms)
    }
}

pub fn word_count(text: Option<&str>) -> u64 {
    match text.map(str::split_whitespace) {
        Some(words) => match words.count() {
            0 => DEFAULT_WORD_COUNT,
            n => n as u64,
        },
        None => DEFAULT_WORD_COUNT,
    }
}

/// Estimate with the default 300ms/word policy clamped to 4s..=15s.
pub fn estimate_reading_time(text: Option<&str>) -> Duration {
    ReadingTime::default().estimate(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_words_clamp_up_to_minimum() {
        let text = "one two three four five six seven eight nine ten";
        assert_eq!(estimate_reading_time(Some(text)), Duration::from_millis(4000));
    }

    #[test]
    fn long_text_clamps_to_maximum() {
        let text = "word ".repeat(80);
        assert_eq!(estimate_reading_time(Some(&text)), Duration::from_millis(15000));
    }

    #[test]
    fn mid_length_text_scales_linearly() {
        let text = "word ".repeat(30);
        assert_eq!(estimate_reading_time(Some(&text)), Duration::from_millis(9000));
    }

    #[test]
    fn missing_or_blank_text_counts_as_twenty_words() {
        assert_eq!(word_count(None), 20);
        assert_eq!(word_count(Some("   \n\t")), 20);
        assert_eq!(estimate_reading_time(None), Duration::from_millis(6000));
    }
}
