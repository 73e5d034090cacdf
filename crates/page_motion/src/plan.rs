use std::time::Duration;

use url::Url;

/// Vertical scroll state of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
    /// The horizontally scrolling feature strip, when the page has one.
    pub strip: Option<StripMetrics>,
}

impl PageMetrics {
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.viewport_height).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripMetrics {
    pub scroll_width: f64,
    pub client_width: f64,
}

impl StripMetrics {
    pub fn overflow(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MotionTimings {
    pub initial_dwell: Duration,
    pub ms_per_px: f64,
    pub scroll_down_min: Duration,
    pub scroll_down_max: Duration,
    pub strip_min: Duration,
    pub strip_max: Duration,
    pub bottom_dwell: Duration,
    pub scroll_up: Duration,
    pub final_dwell: Duration,
    pub nudge_distance: f64,
    pub nudge_duration: Duration,
    pub frame_interval: Duration,
}

impl Default for MotionTimings {
    fn default() -> Self {
        Self {
            initial_dwell: Duration::from_millis(1000),
            ms_per_px: 2.5,
            scroll_down_min: Duration::from_millis(3000),
            scroll_down_max: Duration::from_millis(7000),
            strip_min: Duration::from_millis(1000),
            strip_max: Duration::from_millis(4000),
            bottom_dwell: Duration::from_millis(9000),
            scroll_up: Duration::from_millis(3000),
            final_dwell: Duration::from_millis(1000),
            nudge_distance: 350.0,
            nudge_duration: Duration::from_millis(1200),
            frame_interval: Duration::from_millis(16),
        }
    }
}

impl MotionTimings {
    /// Scales every duration by `factor`; the frame interval is left alone.
    pub fn scaled(&self, factor: f64) -> Self {
        if !(factor.is_finite() && factor > 0.0) {
            return self.clone();
        }
        let scale = |d: Duration| {
            Duration::try_from_secs_f64(d.as_secs_f64() * factor).unwrap_or(Duration::MAX)
        };
        Self {
            initial_dwell: scale(self.initial_dwell),
            ms_per_px: self.ms_per_px * factor,
            scroll_down_min: scale(self.scroll_down_min),
            scroll_down_max: scale(self.scroll_down_max),
            strip_min: scale(self.strip_min),
            strip_max: scale(self.strip_max),
            bottom_dwell: scale(self.bottom_dwell),
            scroll_up: scale(self.scroll_up),
            final_dwell: scale(self.final_dwell),
            nudge_distance: self.nudge_distance,
            nudge_duration: scale(self.nudge_duration),
            frame_interval: self.frame_interval,
        }
    }

    fn distance_duration(&self, px: f64, min: Duration, max: Duration) -> Duration {
        Duration::try_from_secs_f64((px.max(0.0) * self.ms_per_px) / 1000.0)
            .unwrap_or(max)
            .clamp(min, max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MotionStep {
    Dwell(Duration),
    ScrollTo { target: f64, duration: Duration },
    ScrollStripTo { target: f64, duration: Duration },
    Navigate(Url),
}

impl MotionStep {
    pub fn duration(&self) -> Duration {
        match self {
            MotionStep::Dwell(duration)
            | MotionStep::ScrollTo { duration, .. }
            | MotionStep::ScrollStripTo { duration, .. } => *duration,
            MotionStep::Navigate(_) => Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExitPlan {
    pub steps: Vec<MotionStep>,
}

impl ExitPlan {
    pub fn compute(metrics: &PageMetrics, timings: &MotionTimings, landing: &Url) -> Self {
        let bottom = metrics.max_scroll();
        let distance = (bottom - metrics.scroll_y).max(0.0);

        let mut steps = vec![
            MotionStep::Dwell(timings.initial_dwell),
            MotionStep::ScrollTo {
                target: bottom,
                duration: timings.distance_duration(
                    distance,
                    timings.scroll_down_min,
                    timings.scroll_down_max,
                ),
            },
        ];

        if let Some(strip) = metrics.strip.filter(|strip| strip.overflow() > 0.0) {
            let duration =
                timings.distance_duration(strip.overflow(), timings.strip_min, timings.strip_max);
            steps.push(MotionStep::ScrollStripTo {
                target: strip.overflow(),
                duration,
            });
            steps.push(MotionStep::ScrollStripTo {
                target: 0.0,
                duration,
            });
        }

        steps.extend([
            MotionStep::Dwell(timings.bottom_dwell),
            MotionStep::ScrollTo {
                target: 0.0,
                duration: timings.scroll_up,
            },
            MotionStep::Dwell(timings.final_dwell),
            MotionStep::Navigate(landing.clone()),
        ]);

        Self { steps }
    }

    pub fn total_duration(&self) -> Duration {
        self.steps
            .iter()
            .map(MotionStep::duration)
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// The short scroll before the slideshow, capped at the page bottom.
pub fn nudge_step(metrics: &PageMetrics, timings: &MotionTimings) -> MotionStep {
    MotionStep::ScrollTo {
        target: (metrics.scroll_y + timings.nudge_distance).min(metrics.max_scroll()),
        duration: timings.nudge_duration,
    }
}

#[cfg(test)]
#[path = "tests/plan_tests.rs"]
mod tests;
