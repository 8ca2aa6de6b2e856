//! Time helpers for transition animations

use std::time::{Duration, Instant};

/// Animation progress at `now`, clamped to [0, 1]
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        assert_eq!(progress(start, duration, start), 0.0);
        assert!((progress(start, duration, start + Duration::from_millis(50)) - 0.25).abs() < 1e-9);
        assert_eq!(progress(start, duration, start + Duration::from_secs(1)), 1.0);
        assert_eq!(progress(start, Duration::ZERO, start), 1.0);
    }

    #[test]
    fn test_is_complete() {
        let start = Instant::now();
        let duration = Duration::from_millis(100);
        assert!(!is_complete(start, duration, start + Duration::from_millis(99)));
        assert!(is_complete(start, duration, start + Duration::from_millis(100)));
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(10.0, 30.0, 0.5), 20.0);
        assert_eq!(lerp(30.0, 10.0, 1.0), 10.0);
    }
}
