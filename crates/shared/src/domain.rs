use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(PartId, u32);
id_newtype!(DetailTicket, u64);

pub const PLACEHOLDER_MEDIA_SRC: &str = "/assets/images/placeholder-part.jpg";
pub const PLACEHOLDER_MEDIA_POSTER: &str = "/assets/images/placeholder-poster.jpg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Front,
    Back,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Front => "front",
            View::Back => "back",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hotspot position as percentages of the rendered product image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HotspotPosition {
    pub x: f32,
    pub y: f32,
}

impl HotspotPosition {
    pub fn is_within_bounds(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaDescriptor {
    pub kind: MediaKind,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl MediaDescriptor {
    pub fn placeholder() -> Self {
        Self {
            kind: MediaKind::Image,
            src: PLACEHOLDER_MEDIA_SRC.to_string(),
            poster: Some(PLACEHOLDER_MEDIA_POSTER.to_string()),
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEntry {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_position: Option<HotspotPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_position: Option<HotspotPosition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specs: Vec<SpecEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaDescriptor>,
}

impl Part {
    pub fn position(&self, view: View) -> Option<HotspotPosition> {
        match view {
            View::Front => self.front_position,
            View::Back => self.back_position,
        }
    }

    pub fn is_visible_in(&self, view: View) -> bool {
        self.position(view).is_some()
    }

    /// Media to present, falling back to the placeholder image.
    pub fn media_or_placeholder(&self) -> MediaDescriptor {
        self.media.clone().unwrap_or_else(MediaDescriptor::placeholder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCard {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TourStage {
    Waiting,
    FrontHotspots,
    SwitchingToBack,
    BackHotspots,
    PostBackSlideshow,
    AccessoriesCarousel,
    Done,
    Stopped,
}

impl TourStage {
    /// The view walked by an automatic hotspot stage.
    pub fn hotspot_view(self) -> Option<View> {
        match self {
            TourStage::FrontHotspots => Some(View::Front),
            TourStage::BackHotspots => Some(View::Back),
            _ => None,
        }
    }

    pub fn is_hotspot_walk(self) -> bool {
        self.hotspot_view().is_some()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TourStage::Waiting => "waiting",
            TourStage::FrontHotspots => "front_hotspots",
            TourStage::SwitchingToBack => "switching_to_back",
            TourStage::BackHotspots => "back_hotspots",
            TourStage::PostBackSlideshow => "post_back_slideshow",
            TourStage::AccessoriesCarousel => "accessories_carousel",
            TourStage::Done => "done",
            TourStage::Stopped => "stopped",
        }
    }
}

impl fmt::Display for TourStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerRole {
    Advance,
    OpenDetail,
    Sequence,
}

impl TimerRole {
    pub const ALL: [TimerRole; 3] = [TimerRole::Advance, TimerRole::OpenDetail, TimerRole::Sequence];

    pub fn index(self) -> usize {
        match self {
            TimerRole::Advance => 0,
            TimerRole::OpenDetail => 1,
            TimerRole::Sequence => 2,
        }
    }
}
