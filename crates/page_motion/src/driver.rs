use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::time::Instant;
use tour_core::PageMotionDriver;
use tracing::debug;
use url::Url;

use crate::{
    easing::position_at,
    plan::{nudge_step, ExitPlan, MotionStep, MotionTimings},
    viewport::Viewport,
};

#[derive(Debug, Clone, Copy)]
enum Axis {
    Page,
    Strip,
}

/// Runs nudges and exit sequences against a [`Viewport`], animating each
/// scroll frame by frame.
pub struct ScriptedPageMotion<V> {
    viewport: Arc<V>,
    timings: MotionTimings,
    landing: Url,
}

impl<V: Viewport> ScriptedPageMotion<V> {
    pub fn new(viewport: Arc<V>, timings: MotionTimings, landing: Url) -> Self {
        Self {
            viewport,
            timings,
            landing,
        }
    }

    pub async fn run_step(&self, step: &MotionStep) -> anyhow::Result<()> {
        match step {
            MotionStep::Dwell(duration) => {
                tokio::time::sleep(*duration).await;
                Ok(())
            }
            MotionStep::ScrollTo { target, duration } => {
                let from = self.viewport.metrics().await?.scroll_y;
                self.animate(Axis::Page, from, *target, *duration).await
            }
            MotionStep::ScrollStripTo { target, duration } => {
                // the strip is only ever scrolled out from and back to its start
                let from = if *target > 0.0 { 0.0 } else { self.strip_end().await? };
                self.animate(Axis::Strip, from, *target, *duration).await
            }
            MotionStep::Navigate(url) => self.viewport.navigate(url).await,
        }
    }

    async fn strip_end(&self) -> anyhow::Result<f64> {
        let metrics = self.viewport.metrics().await?;
        Ok(metrics.strip.map(|strip| strip.overflow()).unwrap_or(0.0))
    }

    async fn animate(&self, axis: Axis, from: f64, to: f64, duration: Duration) -> anyhow::Result<()> {
        let started = Instant::now();
        loop {
            let elapsed = started.elapsed().min(duration);
            let position = position_at(from, to, elapsed, duration);
            match axis {
                Axis::Page => self.viewport.scroll_to(position).await?,
                Axis::Strip => self.viewport.scroll_strip_to(position).await?,
            }
            if elapsed >= duration {
                return Ok(());
            }
            tokio::time::sleep(self.timings.frame_interval).await;
        }
    }
}

#[async_trait]
impl<V: Viewport + 'static> PageMotionDriver for ScriptedPageMotion<V> {
    async fn scroll_nudge(&self) -> anyhow::Result<()> {
        let metrics = self.viewport.metrics().await?;
        let step = nudge_step(&metrics, &self.timings);
        debug!(?step, "scroll nudge");
        self.run_step(&step).await
    }

    async fn run_exit_sequence(&self) -> anyhow::Result<()> {
        let metrics = self.viewport.metrics().await?;
        let plan = ExitPlan::compute(&metrics, &self.timings, &self.landing);
        debug!(
            steps = plan.steps.len(),
            total_ms = plan.total_duration().as_millis() as u64,
            "exit sequence planned"
        );
        for step in &plan.steps {
            self.run_step(step).await?;
        }
        Ok(())
    }
}
