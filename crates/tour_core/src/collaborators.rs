use std::sync::Arc;

use async_trait::async_trait;
use shared::protocol::{DetailView, GalleryView, SlideView, StageView};

/// Draws the product stage: the active view, its hotspots and the feature
/// cards, plus the accessories gallery overlay.
#[async_trait]
pub trait StageViewer: Send + Sync {
    async fn render(&self, stage: StageView) -> anyhow::Result<()>;
    /// `None` clears the highlight.
    async fn highlight_feature(&self, index: Option<usize>) -> anyhow::Result<()>;
    async fn show_gallery(&self, image: GalleryView) -> anyhow::Result<()>;
    async fn close_gallery(&self) -> anyhow::Result<()>;
}

/// Shows part details and slideshow frames. Manual closes, skips and video
/// completion come back as `TourCommand`s carrying the detail ticket.
#[async_trait]
pub trait DetailPresenter: Send + Sync {
    async fn show_detail(&self, detail: DetailView) -> anyhow::Result<()>;
    async fn close_detail(&self) -> anyhow::Result<()>;
    async fn show_slide(&self, slide: SlideView) -> anyhow::Result<()>;
    async fn close_slideshow(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait PageMotionDriver: Send + Sync {
    async fn scroll_nudge(&self) -> anyhow::Result<()>;
    /// Scrolls through the page and navigates away. Runs to completion.
    async fn run_exit_sequence(&self) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct Collaborators {
    pub viewer: Arc<dyn StageViewer>,
    pub presenter: Arc<dyn DetailPresenter>,
    pub motion: Arc<dyn PageMotionDriver>,
}
