use std::time::{Duration, Instant};

/// Length of one nominal frame. All per-frame tuning assumes this rate.
pub const BASELINE_FRAME: Duration = Duration::from_micros(16_667);

/// Frames covered by `elapsed`, clamped to `[0, max_frame_delta]`.
///
/// The clamp keeps a stalled frame (backgrounded window, long pause in the
/// host) from flinging the carousel.
pub fn frames_in(elapsed: Duration, max_frame_delta: f32) -> f32 {
    let frames = elapsed.as_secs_f32() / BASELINE_FRAME.as_secs_f32();
    frames.clamp(0.0, max_frame_delta)
}

/// Frames between `last` and `now`. No reference point means no time passed.
pub fn frames_since(last: Option<Instant>, now: Instant, max_frame_delta: f32) -> f32 {
    match last {
        Some(last) => frames_in(now.saturating_duration_since(last), max_frame_delta),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_zero() {
        assert_eq!(frames_since(None, Instant::now(), 2.0), 0.0);
    }

    #[test]
    fn one_frame_at_sixty_hertz() {
        let start = Instant::now();
        let delta = frames_since(Some(start), start + BASELINE_FRAME, 2.0);
        assert!((delta - 1.0).abs() < 0.001);
    }

    #[test]
    fn stalled_frame_is_clamped() {
        let start = Instant::now();
        assert_eq!(
            frames_since(Some(start), start + Duration::from_secs(3), 2.0),
            2.0
        );
    }

    #[test]
    fn clock_going_backwards_is_zero() {
        let start = Instant::now();
        let later = start + Duration::from_millis(50);
        assert_eq!(frames_since(Some(later), start, 2.0), 0.0);
    }

    #[test]
    fn high_refresh_rate_gives_fractional_frames() {
        let delta = frames_in(Duration::from_secs_f32(1.0 / 120.0), 2.0);
        assert!((delta - 0.5).abs() < 0.001);
    }
}
