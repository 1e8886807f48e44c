//! Pollable per-entity position tween
//!
//! Replaces callback-driven tweening: the animator advances each record
//! explicitly, so a tween is just data and can be stepped without a clock.

use crate::math::Vec3;
use super::easing::{Easing, ease};

/// Durations below this are clamped so progress never divides by zero
pub const MIN_DURATION: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub start: Vec3,
    pub target: Vec3,
    /// Seconds of interpolation once the delay has passed
    pub duration: f32,
    /// Seconds before any progress accrues
    pub delay: f32,
    /// Seconds since the tween was (re)armed, delay included
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    /// A dormant tween resting at `at`
    pub fn settled(at: Vec3) -> Self {
        Self {
            start: at,
            target: at,
            duration: MIN_DURATION,
            delay: 0.0,
            elapsed: MIN_DURATION,
            easing: Easing::default(),
        }
    }

    /// Re-arm from `from` toward `to`. Any in-flight interpolation is dropped;
    /// the caller passes the live position so there is no jump.
    pub fn restart(&mut self, from: Vec3, to: Vec3, duration: f32, delay: f32, easing: Easing) {
        self.start = from;
        self.target = to;
        self.duration = duration.max(MIN_DURATION);
        self.delay = delay.max(0.0);
        self.elapsed = 0.0;
        self.easing = easing;
    }

    pub fn is_active(&self) -> bool {
        self.elapsed < self.delay + self.duration
    }

    /// Normalized progress in [0, 1]; zero throughout the delay window
    pub fn progress(&self) -> f32 {
        ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    /// Current interpolated value. Exactly `target` once progress reaches 1.
    pub fn sample(&self) -> Vec3 {
        let p = self.progress();
        if p >= 1.0 {
            self.target
        } else {
            self.start.lerp(&self.target, ease(p, self.easing))
        }
    }

    /// Step by `dt` seconds. Returns the new value while the tween was
    /// active, `None` once it is dormant.
    pub fn advance(&mut self, dt: f32) -> Option<Vec3> {
        if !self.is_active() {
            return None;
        }
        self.elapsed += dt;
        Some(self.sample())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed() -> Tween {
        let mut tween = Tween::settled(Vec3::ZERO);
        tween.restart(Vec3::ZERO, Vec3::new(10.0, -4.0, 2.0), 1.0, 0.5, Easing::Linear);
        tween
    }

    #[test]
    fn test_settled_is_dormant() {
        let mut tween = Tween::settled(Vec3::new(1.0, 2.0, 3.0));
        assert!(!tween.is_active());
        assert_eq!(tween.progress(), 1.0);
        assert_eq!(tween.advance(0.016), None);
        assert_eq!(tween.sample(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_no_progress_during_delay() {
        let mut tween = armed();
        let v = tween.advance(0.4).unwrap();
        assert_eq!(tween.progress(), 0.0);
        assert_eq!(v, Vec3::ZERO);
    }

    #[test]
    fn test_linear_midpoint() {
        let mut tween = armed();
        let v = tween.advance(1.0).unwrap();
        assert!((tween.progress() - 0.5).abs() < 0.0001);
        assert!((v.x - 5.0).abs() < 0.0001);
        assert!((v.y + 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_completion_lands_exactly_on_target() {
        let mut tween = armed();
        tween.easing = Easing::EaseInOut;
        let mut last = None;
        for _ in 0..200 {
            if let Some(v) = tween.advance(0.016) {
                last = Some(v);
            }
        }
        assert!(!tween.is_active());
        assert_eq!(last, Some(Vec3::new(10.0, -4.0, 2.0)));
    }

    #[test]
    fn test_zero_duration_clamped() {
        let mut tween = Tween::settled(Vec3::ZERO);
        tween.restart(Vec3::ZERO, Vec3::ONE, 0.0, 0.0, Easing::EaseOut);
        assert!(tween.duration > 0.0);
        let v = tween.advance(0.016).unwrap();
        assert_eq!(v, Vec3::ONE);
        assert!(v.is_finite());
    }

    #[test]
    fn test_restart_resets_elapsed() {
        let mut tween = armed();
        tween.advance(1.2);
        let mid = tween.sample();
        tween.restart(mid, Vec3::ZERO, 2.0, 0.0, Easing::EaseOut);
        assert_eq!(tween.elapsed, 0.0);
        assert_eq!(tween.sample(), mid);
    }
}
