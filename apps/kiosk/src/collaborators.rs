use std::sync::Mutex;

use async_trait::async_trait;
use shared::{
    domain::DetailTicket,
    protocol::{DetailView, GalleryView, SlideView, StageView},
};
use tokio::sync::mpsc;
use tour_core::{DetailPresenter, StageViewer};
use tracing::info;

pub struct LoggingViewer;

#[async_trait]
impl StageViewer for LoggingViewer {
    async fn render(&self, stage: StageView) -> anyhow::Result<()> {
        let names: Vec<&str> = stage.hotspots.iter().map(|h| h.name.as_str()).collect();
        info!(
            view = %stage.view,
            hotspots = ?names,
            clicks_ignored = stage.clicks_ignored,
            "render stage"
        );
        Ok(())
    }

    async fn highlight_feature(&self, index: Option<usize>) -> anyhow::Result<()> {
        info!(feature = ?index, "highlight feature");
        Ok(())
    }

    async fn show_gallery(&self, image: GalleryView) -> anyhow::Result<()> {
        info!(counter = %image.counter_label(), src = %image.src, "gallery image");
        Ok(())
    }

    async fn close_gallery(&self) -> anyhow::Result<()> {
        info!("gallery closed");
        Ok(())
    }
}

/// Logs details and slides. Video details are handed to the playback task,
/// which reports completion back to the tour.
pub struct LoggingPresenter {
    playback_tx: mpsc::UnboundedSender<DetailTicket>,
    current: Mutex<Option<DetailTicket>>,
}

impl LoggingPresenter {
    pub fn new(playback_tx: mpsc::UnboundedSender<DetailTicket>) -> Self {
        Self {
            playback_tx,
            current: Mutex::new(None),
        }
    }

    /// Ticket of the detail on screen, used by stdin `skip` and `close`.
    pub fn current_ticket(&self) -> Option<DetailTicket> {
        match self.current.lock() {
            Ok(current) => *current,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn set_current(&self, ticket: Option<DetailTicket>) {
        match self.current.lock() {
            Ok(mut current) => *current = ticket,
            Err(poisoned) => *poisoned.into_inner() = ticket,
        }
    }
}

#[async_trait]
impl DetailPresenter for LoggingPresenter {
    async fn show_detail(&self, detail: DetailView) -> anyhow::Result<()> {
        info!(
            ticket = detail.ticket.0,
            part = %detail.name,
            origin = ?detail.origin,
            media = %detail.media.src,
            specs = detail.specs.len(),
            "show detail"
        );
        self.set_current(Some(detail.ticket));
        if detail.media.is_video() {
            self.playback_tx
                .send(detail.ticket)
                .map_err(|_| anyhow::anyhow!("video playback task has stopped"))?;
        }
        Ok(())
    }

    async fn close_detail(&self) -> anyhow::Result<()> {
        info!("close detail");
        self.set_current(None);
        Ok(())
    }

    async fn show_slide(&self, slide: SlideView) -> anyhow::Result<()> {
        info!(
            frame = slide.index + 1,
            total = slide.total,
            src = %slide.src,
            "slideshow frame"
        );
        Ok(())
    }

    async fn close_slideshow(&self) -> anyhow::Result<()> {
        info!("slideshow closed");
        Ok(())
    }
}
