//! Fixed-duration tweening of a single scalar.
//!
//! [`Tween`] interpolates between two values over a fixed duration with an
//! [`Easing`] curve, optionally seeded with an initial velocity so a released
//! drag keeps its momentum for the first frames. [`TweenAnimator`] wraps it
//! behind the [`ScalarAnimator`] trait that widgets drive once per frame.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// Easing
// =============================================================================

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Quadratic ease out (slow end)
    EaseOut,
    /// Quadratic ease in and out
    EaseInOut,
    /// Cubic ease out
    CubicOut,
    /// Material standard curve, cubic-bezier(0.4, 0.0, 0.2, 1.0)
    #[default]
    FastOutSlowIn,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
                }
            }
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }

    /// Numerical slope of the curve at `t`.
    #[must_use]
    pub fn slope(self, t: f64) -> f64 {
        const H: f64 = 1e-4;
        let lo = (t - H).max(0.0);
        let hi = (t + H).min(1.0);
        if hi <= lo {
            return 0.0;
        }
        (self.apply(hi) - self.apply(lo)) / (hi - lo)
    }
}

/// Evaluate a CSS-style cubic bezier with endpoints (0,0) and (1,1).
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    let sample = |a: f64, b: f64, u: f64| {
        let inv = 1.0 - u;
        3.0 * inv * inv * u * a + 3.0 * inv * u * u * b + u * u * u
    };

    // x(u) is monotonic for control points in [0, 1]
    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    let mut u = t;
    for _ in 0..32 {
        let x = sample(x1, x2, u);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            lo = u;
        } else {
            hi = u;
        }
        u = (lo + hi) / 2.0;
    }
    sample(y1, y2, u)
}

// =============================================================================
// Tween
// =============================================================================

/// Cubic Hermite basis term with unit slope at 0 and zero value at both ends.
fn momentum_basis(s: f64) -> f64 {
    s * (s - 1.0) * (s - 1.0)
}

fn momentum_basis_slope(s: f64) -> f64 {
    (3.0 * s).mul_add(s, (-4.0f64).mul_add(s, 1.0))
}

/// A fixed-duration interpolation between two scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    /// Start value
    pub from: f32,
    /// End value
    pub to: f32,
    /// Total duration
    pub duration: Duration,
    /// Elapsed time
    pub elapsed: Duration,
    /// Easing function
    pub easing: Easing,
    /// Rate of change at the start, in units per second
    pub initial_velocity: f32,
}

impl Tween {
    /// Create a new tween.
    #[must_use]
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::default(),
            initial_velocity: 0.0,
        }
    }

    /// Set easing function.
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Seed the tween with a starting velocity.
    #[must_use]
    pub fn with_initial_velocity(mut self, velocity: f32) -> Self {
        self.initial_velocity = if velocity.is_finite() { velocity } else { 0.0 };
        self
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }

    /// Current value. Exactly `to` once complete.
    #[must_use]
    pub fn value(&self) -> f32 {
        let s = self.progress();
        if s >= 1.0 {
            return self.to;
        }
        let from = f64::from(self.from);
        let to = f64::from(self.to);
        let eased = (to - from).mul_add(self.easing.apply(s), from);
        let momentum =
            f64::from(self.initial_velocity) * self.duration.as_secs_f64() * momentum_basis(s);
        (eased + momentum) as f32
    }

    /// Current rate of change in units per second.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        let s = self.progress();
        if s >= 1.0 || self.duration.is_zero() {
            return 0.0;
        }
        let span = f64::from(self.to - self.from);
        let seconds = self.duration.as_secs_f64();
        let v = span * self.easing.slope(s) / seconds
            + f64::from(self.initial_velocity) * momentum_basis_slope(s);
        v as f32
    }

    /// Whether animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance the tween.
    pub fn update(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

// =============================================================================
// ScalarAnimator
// =============================================================================

/// A single animated scalar driven by the host frame clock.
pub trait ScalarAnimator {
    /// Jump to `value`, stopping any running animation.
    fn snap_to(&mut self, value: f32);

    /// Start animating from the current value to `target`.
    ///
    /// `initial_velocity` falls back to the animator's current velocity.
    fn animate_to(&mut self, target: f32, initial_velocity: Option<f32>);

    /// Advance by `dt` and return the new value.
    fn advance(&mut self, dt: Duration) -> f32;

    /// Current value.
    fn value(&self) -> f32;

    /// Current velocity in units per second.
    fn velocity(&self) -> f32;

    /// Whether an animation is in progress.
    fn is_running(&self) -> bool;

    /// Stop the running animation, keeping the current value.
    fn cancel(&mut self);
}

/// [`ScalarAnimator`] backed by a fixed-duration [`Tween`].
#[derive(Debug, Clone)]
pub struct TweenAnimator {
    value: f32,
    velocity: f32,
    duration: Duration,
    easing: Easing,
    tween: Option<Tween>,
}

impl TweenAnimator {
    /// Create an idle animator at zero.
    #[must_use]
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            value: 0.0,
            velocity: 0.0,
            duration,
            easing,
            tween: None,
        }
    }

    /// Duration of every animation started by this animator.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Target of the running animation.
    #[must_use]
    pub fn target(&self) -> Option<f32> {
        self.tween.as_ref().map(|t| t.to)
    }
}

impl Default for TweenAnimator {
    fn default() -> Self {
        Self::new(Duration::from_millis(150), Easing::default())
    }
}

impl ScalarAnimator for TweenAnimator {
    fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
        self.tween = None;
    }

    fn animate_to(&mut self, target: f32, initial_velocity: Option<f32>) {
        let velocity = initial_velocity.unwrap_or(self.velocity);
        self.tween = Some(
            Tween::new(self.value, target, self.duration)
                .with_easing(self.easing)
                .with_initial_velocity(velocity),
        );
    }

    fn advance(&mut self, dt: Duration) -> f32 {
        if let Some(tween) = self.tween.as_mut() {
            tween.update(dt);
            self.value = tween.value();
            self.velocity = tween.velocity();
            if tween.is_complete() {
                self.tween = None;
                self.velocity = 0.0;
            }
        }
        self.value
    }

    fn value(&self) -> f32 {
        self.value
    }

    fn velocity(&self) -> f32 {
        self.velocity
    }

    fn is_running(&self) -> bool {
        self.tween.is_some()
    }

    fn cancel(&mut self) {
        self.tween = None;
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    // -------------------------------------------------------------------------
    // Easing tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseOut,
            Easing::EaseInOut,
            Easing::CubicOut,
            Easing::FastOutSlowIn,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_easing_clamps_input() {
        assert!((Easing::Linear.apply(-0.5) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(1.5) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_fast_out_slow_in_is_ahead_of_linear_late() {
        let val = Easing::FastOutSlowIn.apply(0.5);
        assert!(val > 0.5);
        assert!(val < 1.0);
    }

    #[test]
    fn test_easing_slope_linear() {
        assert!((Easing::Linear.slope(0.5) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_easing_serde_kebab_case() {
        let easing: Easing = serde_json::from_str("\"fast-out-slow-in\"").unwrap();
        assert_eq!(easing, Easing::FastOutSlowIn);
        let easing: Easing = serde_json::from_str("\"cubic-out\"").unwrap();
        assert_eq!(easing, Easing::CubicOut);
    }

    // -------------------------------------------------------------------------
    // Tween tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_tween_ends_exactly_at_target() {
        let mut tween = Tween::new(0.0, 50.0, Duration::from_millis(150))
            .with_initial_velocity(3000.0);
        while !tween.is_complete() {
            tween.update(FRAME);
        }
        assert_eq!(tween.value(), 50.0);
        assert_eq!(tween.velocity(), 0.0);
    }

    #[test]
    fn test_tween_starts_at_origin() {
        let tween = Tween::new(20.0, 0.0, Duration::from_millis(150));
        assert!((tween.value() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_tween_initial_velocity_pushes_forward() {
        let plain = {
            let mut t = Tween::new(0.0, 50.0, Duration::from_millis(150))
                .with_easing(Easing::Linear);
            t.update(FRAME);
            t.value()
        };
        let seeded = {
            let mut t = Tween::new(0.0, 50.0, Duration::from_millis(150))
                .with_easing(Easing::Linear)
                .with_initial_velocity(2000.0);
            t.update(FRAME);
            t.value()
        };
        assert!(seeded > plain);
    }

    #[test]
    fn test_tween_ignores_non_finite_velocity() {
        let tween = Tween::new(0.0, 1.0, Duration::from_millis(10))
            .with_initial_velocity(f32::NAN);
        assert_eq!(tween.initial_velocity, 0.0);
    }

    #[test]
    fn test_tween_zero_duration_is_complete() {
        let tween = Tween::new(0.0, 10.0, Duration::ZERO);
        assert!(tween.is_complete());
        assert_eq!(tween.value(), 10.0);
    }

    // -------------------------------------------------------------------------
    // TweenAnimator tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_animator_snap_stops_animation() {
        let mut animator = TweenAnimator::default();
        animator.animate_to(10.0, None);
        assert!(animator.is_running());
        animator.snap_to(4.0);
        assert!(!animator.is_running());
        assert_eq!(animator.value(), 4.0);
        assert_eq!(animator.velocity(), 0.0);
    }

    #[test]
    fn test_animator_runs_to_completion() {
        let mut animator = TweenAnimator::new(Duration::from_millis(150), Easing::Linear);
        animator.snap_to(0.0);
        animator.animate_to(50.0, Some(1500.0));
        assert_eq!(animator.target(), Some(50.0));

        let mut frames = 0;
        while animator.is_running() {
            animator.advance(FRAME);
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(animator.value(), 50.0);
        assert_eq!(frames, 10);
    }

    #[test]
    fn test_animator_cancel_keeps_value() {
        let mut animator = TweenAnimator::new(Duration::from_millis(150), Easing::Linear);
        animator.animate_to(100.0, None);
        let mid = animator.advance(Duration::from_millis(75));
        animator.cancel();
        assert!(!animator.is_running());
        assert_eq!(animator.value(), mid);
        assert_eq!(animator.advance(FRAME), mid);
    }

    #[test]
    fn test_animator_zero_duration_finishes_on_next_advance() {
        let mut animator = TweenAnimator::new(Duration::ZERO, Easing::Linear);
        animator.animate_to(7.0, None);
        assert!(animator.is_running());
        assert_eq!(animator.advance(Duration::ZERO), 7.0);
        assert!(!animator.is_running());
    }

    #[test]
    fn test_animator_inherits_velocity_when_unseeded() {
        let mut animator = TweenAnimator::new(Duration::from_millis(150), Easing::Linear);
        animator.animate_to(100.0, None);
        animator.advance(FRAME);
        let velocity = animator.velocity();
        assert!(velocity > 0.0);
        animator.animate_to(0.0, None);
        let seeded = animator.tween.as_ref().map(|t| t.initial_velocity);
        assert_eq!(seeded, Some(velocity));
    }
}
