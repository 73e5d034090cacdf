//! Timing policy and behaviour switches for the tour.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::reading_time::ReadingTime;

pub const DEFAULT_LANDING_URL: &str = "http://localhost/";

/// What a manual close of a tour-opened detail does to the hotspot walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManualClosePolicy {
    /// Close, then continue with the next hotspot after the usual delays.
    #[default]
    Advance,
    /// Close and pause the walk on the current hotspot until stopped.
    Hold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourSettings {
    pub waiting_delay_ms: u64,
    pub inter_detail_delay_ms: u64,
    pub close_settle_ms: u64,
    pub min_detail_dwell_ms: u64,
    pub reading_ms_per_word: u64,
    pub reading_min_ms: u64,
    pub reading_max_ms: u64,
    pub switch_to_back_delay_ms: u64,
    pub scroll_nudge_ms: u64,
    pub slideshow_lead_in_ms: u64,
    pub slideshow_frame_ms: u64,
    pub carousel_item_ms: u64,
    pub skip_settle_ms: u64,
    pub manual_close_policy: ManualClosePolicy,
    pub showcase_features: bool,
    pub landing_url: String,
}

impl Default for TourSettings {
    fn default() -> Self {
        Self {
            waiting_delay_ms: 6000,
            inter_detail_delay_ms: 2000,
            close_settle_ms: 500,
            min_detail_dwell_ms: 7000,
            reading_ms_per_word: 300,
            reading_min_ms: 4000,
            reading_max_ms: 15000,
            switch_to_back_delay_ms: 1500,
            scroll_nudge_ms: 1200,
            slideshow_lead_in_ms: 3000,
            slideshow_frame_ms: 5000,
            carousel_item_ms: 5000,
            skip_settle_ms: 100,
            manual_close_policy: ManualClosePolicy::Advance,
            showcase_features: false,
            landing_url: DEFAULT_LANDING_URL.to_string(),
        }
    }
}

impl TourSettings {
    pub fn waiting_delay(&self) -> Duration {
        Duration::from_millis(self.waiting_delay_ms)
    }

    pub fn inter_detail_delay(&self) -> Duration {
        Duration::from_millis(self.inter_detail_delay_ms)
    }

    pub fn close_settle(&self) -> Duration {
        Duration::from_millis(self.close_settle_ms)
    }

    pub fn min_detail_dwell(&self) -> Duration {
        Duration::from_millis(self.min_detail_dwell_ms)
    }

    pub fn switch_to_back_delay(&self) -> Duration {
        Duration::from_millis(self.switch_to_back_delay_ms)
    }

    /// Time between the end of the back walk and the first slideshow frame.
    pub fn slideshow_lead_in(&self) -> Duration {
        Duration::from_millis(self.scroll_nudge_ms + self.slideshow_lead_in_ms)
    }

    pub fn slideshow_frame(&self) -> Duration {
        Duration::from_millis(self.slideshow_frame_ms)
    }

    pub fn carousel_item(&self) -> Duration {
        Duration::from_millis(self.carousel_item_ms)
    }

    pub fn skip_settle(&self) -> Duration {
        Duration::from_millis(self.skip_settle_ms)
    }

    pub fn reading_time(&self) -> ReadingTime {
        ReadingTime {
            ms_per_word: self.reading_ms_per_word,
            min_ms: self.reading_min_ms,
            max_ms: self.reading_max_ms,
        }
    }

    /// Auto-close dwell for an image detail: the reading estimate, floored at
    /// the minimum dwell.
    pub fn detail_dwell(&self, description: Option<&str>) -> Duration {
        self.reading_time()
            .estimate(description)
            .max(self.min_detail_dwell())
    }

    /// Multiplies every delay by `factor`, e.g. to rehearse a tour quickly.
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: u64| -> u64 {
            if factor.is_finite() && factor > 0.0 {
                (ms as f64 * factor).round() as u64
            } else {
                ms
            }
        };

        Self {
            waiting_delay_ms: scale(self.waiting_delay_ms),
            inter_detail_delay_ms: scale(self.inter_detail_delay_ms),
            close_settle_ms: scale(self.close_settle_ms),
            min_detail_dwell_ms: scale(self.min_detail_dwell_ms),
            reading_ms_per_word: scale(self.reading_ms_per_word),
            reading_min_ms: scale(self.reading_min_ms),
            reading_max_ms: scale(self.reading_max_ms),
            switch_to_back_delay_ms: scale(self.switch_to_back_delay_ms),
            scroll_nudge_ms: scale(self.scroll_nudge_ms),
            slideshow_lead_in_ms: scale(self.slideshow_lead_in_ms),
            slideshow_frame_ms: scale(self.slideshow_frame_ms),
            carousel_item_ms: scale(self.carousel_item_ms),
            skip_settle_ms: scale(self.skip_settle_ms),
            manual_close_policy: self.manual_close_policy,
            showcase_features: self.showcase_features,
            landing_url: self.landing_url.clone(),
        }
    }
}
