use std::time::Duration;

use shared::{
    domain::{TimerRole, TourStage},
    protocol::{DetailView, GalleryView, SlideView, StageView},
};

use crate::timer::TimerToken;

/// Ordered output of the orchestrator. Rendering effects of a stage entry are
/// always emitted before the timers of that stage are armed.
#[derive(Debug, Clone, PartialEq)]
pub enum TourEffect {
    StageChanged { from: TourStage, to: TourStage },
    RenderStage(StageView),
    ShowDetail(DetailView),
    CloseDetail,
    ShowSlide(SlideView),
    CloseSlideshow,
    HighlightFeature(Option<usize>),
    ShowGallery(GalleryView),
    CloseGallery,
    ScrollNudge,
    RunExitSequence,
    /// Abandons any scroll nudge or exit sequence still in flight.
    HaltMotion,
    ArmTimer {
        role: TimerRole,
        token: TimerToken,
        delay: Duration,
    },
    CancelTimer {
        role: TimerRole,
        token: TimerToken,
    },
}
