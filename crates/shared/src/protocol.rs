use serde::{Deserialize, Serialize};

use crate::domain::{
    DetailTicket, HotspotPosition, MediaDescriptor, PartId, SpecEntry, TourStage, View,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub part_id: PartId,
    pub name: String,
    pub position: HotspotPosition,
}

/// Everything the stage viewer needs to draw the product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageView {
    pub view: View,
    pub hotspots: Vec<Hotspot>,
    pub clicks_ignored: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailOrigin {
    Tour,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailView {
    pub ticket: DetailTicket,
    pub part_id: PartId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub specs: Vec<SpecEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_note: Option<String>,
    pub media: MediaDescriptor,
    pub skippable: bool,
    pub origin: DetailOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideView {
    pub index: usize,
    pub total: usize,
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryView {
    pub index: usize,
    pub total: usize,
    pub src: String,
    pub alt: String,
}

impl GalleryView {
    pub fn counter_label(&self) -> String {
        format!("{} / {}", self.index + 1, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourSnapshot {
    pub stage: TourStage,
    pub view: View,
    pub hotspot_cursor: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slideshow_cursor: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carousel_cursor: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_part: Option<PartId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery_index: Option<usize>,
}

/// Input accepted by a running tour: viewer/presenter events and operator controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum TourCommand {
    PartClicked { part_id: PartId },
    DetailClosed { ticket: DetailTicket },
    SkipRequested { ticket: DetailTicket },
    VideoFinished { ticket: DetailTicket },
    SelectView { view: View },
    CloseSlide,
    OpenGallery { index: usize },
    GalleryNext,
    GalleryPrev,
    CloseGallery,
    Stop,
    Restart,
    Dismiss,
}

impl TourCommand {
    pub fn name(&self) -> &'static str {
        match self {
            TourCommand::PartClicked { .. } => "part_clicked",
            TourCommand::DetailClosed { .. } => "detail_closed",
            TourCommand::SkipRequested { .. } => "skip_requested",
            TourCommand::VideoFinished { .. } => "video_finished",
            TourCommand::SelectView { .. } => "select_view",
            TourCommand::CloseSlide => "close_slide",
            TourCommand::OpenGallery { .. } => "open_gallery",
            TourCommand::GalleryNext => "gallery_next",
            TourCommand::GalleryPrev => "gallery_prev",
            TourCommand::CloseGallery => "close_gallery",
            TourCommand::Stop => "stop",
            TourCommand::Restart => "restart",
            TourCommand::Dismiss => "dismiss",
        }
    }
}
