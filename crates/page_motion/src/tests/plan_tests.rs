use super::*;

fn landing() -> Url {
    Url::parse("http://localhost/").expect("landing url")
}

fn page(scroll_y: f64, scroll_height: f64, strip: Option<StripMetrics>) -> PageMetrics {
    PageMetrics {
        scroll_y,
        scroll_height,
        viewport_height: 800.0,
        strip,
    }
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn exit_plan_follows_the_dwell_scroll_dwell_navigate_order() {
    // 2000px to travel at 2.5ms/px is 5000ms, inside the 3000..=7000 window
    let plan = ExitPlan::compute(&page(0.0, 2800.0, None), &MotionTimings::default(), &landing());

    assert_eq!(
        plan.steps,
        vec![
            MotionStep::Dwell(ms(1000)),
            MotionStep::ScrollTo {
                target: 2000.0,
                duration: ms(5000),
            },
            MotionStep::Dwell(ms(9000)),
            MotionStep::ScrollTo {
                target: 0.0,
                duration: ms(3000),
            },
            MotionStep::Dwell(ms(1000)),
            MotionStep::Navigate(landing()),
        ]
    );
    assert_eq!(plan.total_duration(), ms(19_000));
}

#[test]
fn scroll_down_duration_is_clamped() {
    let timings = MotionTimings::default();

    let short = ExitPlan::compute(&page(0.0, 1000.0, None), &timings, &landing());
    assert_eq!(short.steps[1].duration(), ms(3000));

    let long = ExitPlan::compute(&page(0.0, 10_000.0, None), &timings, &landing());
    assert_eq!(long.steps[1].duration(), ms(7000));

    // a page that cannot scroll still takes the minimum
    let flat = ExitPlan::compute(&page(0.0, 600.0, None), &timings, &landing());
    assert_eq!(
        flat.steps[1],
        MotionStep::ScrollTo {
            target: 0.0,
            duration: ms(3000),
        }
    );
}

#[test]
fn overflowing_strip_is_scrolled_out_and_back() {
    let strip = StripMetrics {
        scroll_width: 1600.0,
        client_width: 1000.0,
    };
    let plan = ExitPlan::compute(&page(0.0, 2800.0, Some(strip)), &MotionTimings::default(), &landing());

    assert_eq!(
        plan.steps[2],
        MotionStep::ScrollStripTo {
            target: 600.0,
            duration: ms(1500),
        }
    );
    assert_eq!(
        plan.steps[3],
        MotionStep::ScrollStripTo {
            target: 0.0,
            duration: ms(1500),
        }
    );
    assert_eq!(plan.steps[4], MotionStep::Dwell(ms(9000)));
}

#[test]
fn strip_that_fits_is_left_alone() {
    let strip = StripMetrics {
        scroll_width: 900.0,
        client_width: 1000.0,
    };
    let plan = ExitPlan::compute(&page(0.0, 2800.0, Some(strip)), &MotionTimings::default(), &landing());
    assert!(!plan
        .steps
        .iter()
        .any(|step| matches!(step, MotionStep::ScrollStripTo { .. })));
}

#[test]
fn nudge_is_capped_at_the_page_bottom() {
    let timings = MotionTimings::default();
    assert_eq!(
        nudge_step(&page(100.0, 2800.0, None), &timings),
        MotionStep::ScrollTo {
            target: 450.0,
            duration: ms(1200),
        }
    );
    assert_eq!(
        nudge_step(&page(1900.0, 2800.0, None), &timings),
        MotionStep::ScrollTo {
            target: 2000.0,
            duration: ms(1200),
        }
    );
}

#[test]
fn scaled_timings_shrink_every_delay() {
    let fast = MotionTimings::default().scaled(0.5);
    assert_eq!(fast.bottom_dwell, ms(4500));
    assert_eq!(fast.scroll_down_max, ms(3500));
    assert_eq!(fast.frame_interval, ms(16));
    assert_eq!(MotionTimings::default().scaled(-1.0), MotionTimings::default());
}

#[test]
fn huge_scale_factors_saturate_instead_of_overflowing() {
    let slow = MotionTimings::default().scaled(1e20);
    assert_eq!(slow.bottom_dwell, Duration::MAX);

    let plan = ExitPlan::compute(&page(0.0, 3200.0, None), &slow, &landing());
    assert_eq!(plan.total_duration(), Duration::MAX);
}
