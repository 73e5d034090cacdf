use std::{sync::Arc, time::Duration};

use page_motion::{MotionTimings, ScriptedPageMotion, SimulatedViewport, StripMetrics};
use tokio::time::Instant;
use tour_core::PageMotionDriver;
use url::Url;

fn landing() -> Url {
    Url::parse("http://kiosk.local/").expect("landing url")
}

#[tokio::test(start_paused = true)]
async fn exit_sequence_scrolls_down_and_back_then_navigates() {
    let viewport = Arc::new(SimulatedViewport::new(2800.0, 800.0, None));
    let motion = ScriptedPageMotion::new(viewport.clone(), MotionTimings::default(), landing());

    let started = Instant::now();
    motion.run_exit_sequence().await.expect("exit sequence");

    // 1000 + 5000 + 9000 + 3000 + 1000
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(19_000));
    assert!(elapsed < Duration::from_millis(19_100));
    assert_eq!(viewport.scroll_y(), 0.0);
    assert_eq!(viewport.navigated_to(), Some(landing()));
    assert!(viewport.frames() > 100);
}

#[tokio::test(start_paused = true)]
async fn exit_sequence_sweeps_an_overflowing_strip() {
    let strip = StripMetrics {
        scroll_width: 1400.0,
        client_width: 1000.0,
    };
    let viewport = Arc::new(SimulatedViewport::new(2800.0, 800.0, Some(strip)));
    let motion = ScriptedPageMotion::new(viewport.clone(), MotionTimings::default(), landing());
    let mut navigation = viewport.subscribe_navigation();

    let run = tokio::spawn(async move { motion.run_exit_sequence().await });

    // 1000 dwell, 5000 down, then 1000 across the strip
    tokio::time::sleep(Duration::from_millis(6500)).await;
    assert_eq!(viewport.scroll_y(), 2000.0);
    assert!(viewport.strip_x() > 0.0);
    assert!(viewport.navigated_to().is_none());

    navigation.changed().await.expect("navigation published");
    assert_eq!(*navigation.borrow(), Some(landing()));
    run.await.expect("join").expect("exit sequence");
    assert_eq!(viewport.strip_x(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn nudge_moves_at_most_350_pixels() {
    let viewport = Arc::new(SimulatedViewport::new(2800.0, 800.0, None));
    let motion = ScriptedPageMotion::new(viewport.clone(), MotionTimings::default(), landing());

    motion.scroll_nudge().await.expect("nudge");
    assert_eq!(viewport.scroll_y(), 350.0);

    let short = Arc::new(SimulatedViewport::new(1000.0, 800.0, None));
    let motion = ScriptedPageMotion::new(short.clone(), MotionTimings::default(), landing());
    motion.scroll_nudge().await.expect("nudge");
    assert_eq!(short.scroll_y(), 200.0);
}
