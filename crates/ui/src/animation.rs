use std::time::Duration;

use gpui::{ease_in_out, linear};
use instant::Instant;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A decelerating curve: starts fast and slows down towards the end.
///
/// `factor` controls how strongly the curve eases out, `1.0` gives the
/// classic `1 - (1 - t)^2` parabola.
pub fn decelerate(factor: f32) -> impl Fn(f32) -> f32 {
    move |t| {
        if factor == 1. {
            1. - (1. - t) * (1. - t)
        } else {
            1. - (1. - t).powf(2. * factor)
        }
    }
}

/// The easing curve used to interpolate a progress animation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    Decelerate,
    EaseInOut,
}

impl Easing {
    /// Apply the easing to `t`, `t` is clamped to `0.0..=1.0` first.
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0. } else { t.clamp(0., 1.) };
        match self {
            Easing::Linear => linear(t),
            Easing::Decelerate => decelerate(1.)(t),
            Easing::EaseInOut => ease_in_out(t),
        }
    }
}

/// An interpolation from one progress value to another over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAnimation {
    pub from: f32,
    pub to: f32,
    pub started_at: Instant,
    pub duration: Duration,
    pub easing: Easing,
}

impl ProgressAnimation {
    pub fn new(from: f32, to: f32, duration: Duration, easing: Easing, now: Instant) -> Self {
        Self {
            from,
            to,
            started_at: now,
            duration,
            easing,
        }
    }

    /// The linear time fraction elapsed at `now`, in `0.0..=1.0`.
    pub fn fraction_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.;
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0., 1.)
    }

    /// The interpolated value at `now`.
    pub fn value_at(&self, now: Instant) -> f32 {
        let t = self.fraction_at(now);
        if t >= 1. {
            return self.to;
        }

        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_bounds() {
        for easing in [Easing::Linear, Easing::Decelerate, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.), 0.);
            assert_eq!(easing.apply(1.), 1.);
            assert_eq!(easing.apply(-1.), 0.);
            assert_eq!(easing.apply(2.), 1.);
            assert_eq!(easing.apply(f32::NAN), 0.);
        }
    }

    #[test]
    fn test_decelerate() {
        let curve = decelerate(1.);
        assert_eq!(curve(0.5), 0.75);
        // Decelerating curves run ahead of linear time.
        assert!(curve(0.25) > 0.25);

        let strong = decelerate(2.);
        assert!(strong(0.25) > curve(0.25));
        assert!((strong(0.5) - 0.9375).abs() < 1e-6);
    }

    #[test]
    fn test_ease_in_out() {
        let easing = Easing::EaseInOut;
        assert_eq!(easing.apply(0.5), 0.5);
        assert!(easing.apply(0.25) < 0.25);
        assert!(easing.apply(0.75) > 0.75);
        assert_eq!(Easing::Linear.apply(0.3), 0.3);
    }

    #[test]
    fn test_easing_serde() {
        assert_eq!(
            serde_json::to_string(&Easing::EaseInOut).unwrap(),
            r#""ease_in_out""#
        );
        assert_eq!(
            serde_json::from_str::<Easing>(r#""decelerate""#).unwrap(),
            Easing::Decelerate
        );
    }

    #[test]
    fn test_progress_animation() {
        let now = Instant::now();
        let animation =
            ProgressAnimation::new(0.2, 0.6, Duration::from_millis(1000), Easing::Linear, now);

        assert_eq!(animation.value_at(now), 0.2);
        assert!((animation.value_at(now + Duration::from_millis(500)) - 0.4).abs() < 1e-4);
        assert_eq!(animation.value_at(now + Duration::from_millis(1000)), 0.6);
        assert_eq!(animation.value_at(now + Duration::from_secs(5)), 0.6);

        assert!(!animation.is_finished(now + Duration::from_millis(999)));
        assert!(animation.is_finished(now + Duration::from_millis(1000)));
    }

    #[test]
    fn test_progress_animation_backwards() {
        let now = Instant::now();
        let animation =
            ProgressAnimation::new(0.8, 0.2, Duration::from_millis(200), Easing::Decelerate, now);

        let mid = animation.value_at(now + Duration::from_millis(100));
        assert!(mid < 0.8 && mid > 0.2);
        // Decelerating towards 0.2, so past the linear midpoint already.
        assert!(mid < 0.5);
        assert_eq!(animation.value_at(now + Duration::from_millis(200)), 0.2);
    }

    #[test]
    fn test_zero_duration() {
        let now = Instant::now();
        let animation = ProgressAnimation::new(0., 1., Duration::ZERO, Easing::Linear, now);
        assert_eq!(animation.fraction_at(now), 1.);
        assert_eq!(animation.value_at(now), 1.);
        assert!(animation.is_finished(now));
    }
}
