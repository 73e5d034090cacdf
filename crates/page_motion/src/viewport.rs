use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::watch;
use url::Url;

use crate::plan::{PageMetrics, StripMetrics};

/// The scrollable surface the motion driver acts on.
#[async_trait]
pub trait Viewport: Send + Sync {
    async fn metrics(&self) -> anyhow::Result<PageMetrics>;
    async fn scroll_to(&self, y: f64) -> anyhow::Result<()>;
    async fn scroll_strip_to(&self, x: f64) -> anyhow::Result<()>;
    async fn navigate(&self, url: &Url) -> anyhow::Result<()>;
}

#[derive(Debug)]
struct PageState {
    scroll_y: f64,
    strip_x: f64,
    scroll_height: f64,
    viewport_height: f64,
    strip: Option<StripMetrics>,
    frames: usize,
}

/// In-memory page for headless runs and tests. Navigation is published on a
/// watch channel so a host can wait for the tour to leave.
pub struct SimulatedViewport {
    state: Mutex<PageState>,
    navigated: watch::Sender<Option<Url>>,
}

impl SimulatedViewport {
    pub fn new(scroll_height: f64, viewport_height: f64, strip: Option<StripMetrics>) -> Self {
        let (navigated, _) = watch::channel(None);
        Self {
            state: Mutex::new(PageState {
                scroll_y: 0.0,
                strip_x: 0.0,
                scroll_height,
                viewport_height,
                strip,
                frames: 0,
            }),
            navigated,
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.with_state(|state| state.scroll_y)
    }

    pub fn strip_x(&self) -> f64 {
        self.with_state(|state| state.strip_x)
    }

    /// Number of scroll positions applied so far.
    pub fn frames(&self) -> usize {
        self.with_state(|state| state.frames)
    }

    pub fn navigated_to(&self) -> Option<Url> {
        self.navigated.borrow().clone()
    }

    pub fn subscribe_navigation(&self) -> watch::Receiver<Option<Url>> {
        self.navigated.subscribe()
    }

    fn with_state<T>(&self, read: impl FnOnce(&mut PageState) -> T) -> T {
        let mut guard = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        read(&mut guard)
    }
}

#[async_trait]
impl Viewport for SimulatedViewport {
    async fn metrics(&self) -> anyhow::Result<PageMetrics> {
        Ok(self.with_state(|state| PageMetrics {
            scroll_y: state.scroll_y,
            scroll_height: state.scroll_height,
            viewport_height: state.viewport_height,
            strip: state.strip,
        }))
    }

    async fn scroll_to(&self, y: f64) -> anyhow::Result<()> {
        self.with_state(|state| {
            let max = (state.scroll_height - state.viewport_height).max(0.0);
            state.scroll_y = y.clamp(0.0, max);
            state.frames += 1;
        });
        Ok(())
    }

    async fn scroll_strip_to(&self, x: f64) -> anyhow::Result<()> {
        self.with_state(|state| {
            let max = state.strip.map(|strip| strip.overflow()).unwrap_or(0.0);
            state.strip_x = x.clamp(0.0, max);
            state.frames += 1;
        });
        Ok(())
    }

    async fn navigate(&self, url: &Url) -> anyhow::Result<()> {
        tracing::info!(url = %url, "navigating away from the tour");
        self.navigated.send_replace(Some(url.clone()));
        Ok(())
    }
}
