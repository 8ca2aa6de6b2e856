//! Transition animator
//!
//! Moves the deck viewport to a section offset. Call `scroll_to()` when the
//! navigation core asks for a section, then `update()` every frame to get the
//! current offset.

use std::time::{Duration, Instant};

use snapdeck_core::MotionStyle;

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Viewport offset along the deck axis, in cells
    offset: f64,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            offset: 0.0,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Final offset once the running animation completes
    pub fn target(&self) -> f64 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.offset)
    }

    /// Jump without animating
    pub fn set_offset(&mut self, offset: f64) {
        self.animation = None;
        self.offset = offset;
    }

    /// Start moving towards `target`.
    ///
    /// A new target supersedes the running animation, continuing from the
    /// currently visible offset.
    pub fn scroll_to(&mut self, target: f64, motion: MotionStyle, now: Instant) {
        if motion == MotionStyle::Immediate || !self.config.is_smooth() {
            self.set_offset(target);
            return;
        }

        if (self.offset - target).abs() < f64::EPSILON {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.offset,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Advance the animation and return the current offset
    pub fn update(&mut self, now: Instant) -> f64 {
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration, now) {
                self.offset = anim.to;
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, anim.duration, now));
                self.offset = lerp(anim.from, anim.to, t);
            }
        }
        self.offset
    }

    pub fn cancel(&mut self) {
        self.animation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smooth(duration_ms: u64) -> ScrollAnimator {
        ScrollAnimator::new(ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: duration_ms,
            easing: EasingType::Linear,
            ..Default::default()
        })
    }

    #[test]
    fn test_immediate_motion_jumps() {
        let mut animator = smooth(100);
        animator.scroll_to(40.0, MotionStyle::Immediate, Instant::now());
        assert_eq!(animator.offset(), 40.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_disabled_smoothing_jumps() {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        });
        animator.scroll_to(40.0, MotionStyle::Smooth, Instant::now());
        assert_eq!(animator.offset(), 40.0);
    }

    #[test]
    fn test_animation_progresses_and_completes() {
        let start = Instant::now();
        let mut animator = smooth(100);

        animator.scroll_to(40.0, MotionStyle::Smooth, start);
        assert!(animator.is_animating());
        assert_eq!(animator.target(), 40.0);

        let mid = animator.update(start + Duration::from_millis(50));
        assert!((mid - 20.0).abs() < 1e-9);

        assert_eq!(animator.update(start + Duration::from_millis(100)), 40.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_retarget_continues_from_current_offset() {
        let start = Instant::now();
        let mut animator = smooth(100);

        animator.scroll_to(40.0, MotionStyle::Smooth, start);
        animator.update(start + Duration::from_millis(50));
        animator.scroll_to(0.0, MotionStyle::Smooth, start + Duration::from_millis(50));

        assert_eq!(animator.target(), 0.0);
        let offset = animator.update(start + Duration::from_millis(100));
        assert!((offset - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_target_is_noop() {
        let mut animator = smooth(100);
        animator.set_offset(12.0);
        animator.scroll_to(12.0, MotionStyle::Smooth, Instant::now());
        assert!(!animator.is_animating());
    }
}
