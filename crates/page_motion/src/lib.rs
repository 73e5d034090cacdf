//! Scripted page scrolling for the tour: the short nudge before the slideshow
//! and the exit sequence that scrolls through the page and navigates away.

mod driver;
pub mod easing;
pub mod plan;
pub mod viewport;

pub use driver::ScriptedPageMotion;
pub use plan::{ExitPlan, MotionStep, MotionTimings, PageMetrics, StripMetrics};
pub use viewport::{SimulatedViewport, Viewport};
