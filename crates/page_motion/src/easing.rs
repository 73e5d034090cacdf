use std::time::Duration;

/// Quadratic ease-in-out over `t` in `0.0..=1.0`.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Position between `from` and `to` after `elapsed` of a `duration` long
/// animation.
pub fn position_at(from: f64, to: f64, elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return to;
    }
    let progress = elapsed.as_secs_f64() / duration.as_secs_f64();
    from + (to - from) * ease_in_out_quad(progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_is_symmetric_and_pinned_at_the_ends() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert_eq!(ease_in_out_quad(2.0), 1.0);
        let early = ease_in_out_quad(0.25);
        let late = ease_in_out_quad(0.75);
        assert!((early + late - 1.0).abs() < 1e-9);
        assert!(early < 0.25);
    }

    #[test]
    fn position_interpolates_in_both_directions() {
        let duration = Duration::from_millis(3000);
        assert_eq!(position_at(0.0, 900.0, Duration::from_millis(1500), duration), 450.0);
        assert_eq!(position_at(900.0, 0.0, duration, duration), 0.0);
        assert_eq!(position_at(10.0, 20.0, Duration::ZERO, Duration::ZERO), 20.0);
    }
}
