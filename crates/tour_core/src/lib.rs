//! Interactive product tour: the stage machine, its timing policy and the
//! tokio runtime that connects it to rendering and page-motion collaborators.

pub mod collaborators;
pub mod effect;
pub mod gallery;
pub mod orchestrator;
pub mod reading_time;
pub mod runtime;
pub mod settings;
pub mod sim;
pub mod timer;

pub use collaborators::{Collaborators, DetailPresenter, PageMotionDriver, StageViewer};
pub use effect::TourEffect;
pub use orchestrator::TourOrchestrator;
pub use reading_time::{estimate_reading_time, ReadingTime};
pub use runtime::{RuntimeError, TourHandle, TourRuntime};
pub use settings::{ManualClosePolicy, TourSettings, DEFAULT_LANDING_URL};
pub use sim::{TimedEffect, VirtualTour};
pub use timer::TimerToken;
