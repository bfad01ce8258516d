use std::time::Duration;

use instant::Instant;

use super::clamp_progress;
use crate::{Easing, ProgressAnimation};

/// The outcome of advancing a [`ProgressState`] to a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// No animation is running.
    Idle,
    /// An animation is running, another frame is needed.
    Running,
    /// The animation completed during this tick, the value has snapped to the target.
    Finished,
}

/// The current and target progress of a bar, plus the animation between them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressState {
    current: f32,
    max: f32,
    animation: Option<ProgressAnimation>,
}

impl ProgressState {
    /// The value being drawn, moves towards [`Self::max`] while animating.
    pub fn current(&self) -> f32 {
        self.current
    }

    /// The target value.
    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn animation(&self) -> Option<&ProgressAnimation> {
        self.animation.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Jump to `progress`, cancelling any running animation.
    pub fn set(&mut self, progress: f32) {
        let progress = clamp_progress(progress);
        self.current = progress;
        self.max = progress;
        self.animation = None;
    }

    /// Start animating to `progress`.
    ///
    /// When `from_beginning` is true the fill restarts from zero, otherwise
    /// it continues from the value currently drawn, which also covers an
    /// animation that is still running.
    pub fn animate(
        &mut self,
        progress: f32,
        from_beginning: bool,
        duration: Duration,
        easing: Easing,
        now: Instant,
    ) {
        let progress = clamp_progress(progress);
        if let Some(animation) = self.animation {
            self.current = animation.value_at(now);
        }
        if from_beginning {
            self.current = 0.;
        }

        self.max = progress;
        self.animation = Some(ProgressAnimation::new(
            self.current,
            progress,
            duration,
            easing,
            now,
        ));
    }

    /// Advance the animation to `now`.
    pub fn tick(&mut self, now: Instant) -> Tick {
        let Some(animation) = self.animation else {
            return Tick::Idle;
        };

        if animation.is_finished(now) {
            self.current = self.max;
            self.animation = None;
            return Tick::Finished;
        }

        self.current = clamp_progress(animation.value_at(now));
        Tick::Running
    }

    /// Stop the animation and snap to the target value.
    pub fn finish(&mut self) -> bool {
        if self.animation.take().is_some() {
            self.current = self.max;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(1000);

    #[test]
    fn test_set_clamps() {
        let mut state = ProgressState::default();
        for (input, expected) in [
            (0.5, 0.5),
            (-0.3, 0.),
            (1.7, 1.),
            (f32::INFINITY, 1.),
            (f32::NEG_INFINITY, 0.),
            (f32::NAN, 0.),
        ] {
            state.set(input);
            assert_eq!(state.current(), expected, "input: {}", input);
            assert_eq!(state.max(), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_animate_completes_at_target() {
        let now = Instant::now();
        let mut state = ProgressState::default();
        state.set(0.2);
        state.animate(0.9, false, DURATION, Easing::Decelerate, now);

        assert_eq!(state.current(), 0.2);
        assert_eq!(state.max(), 0.9);
        assert!(state.is_animating());

        assert_eq!(state.tick(now + Duration::from_millis(300)), Tick::Running);
        let mid = state.current();
        assert!(mid > 0.2 && mid < 0.9);

        assert_eq!(state.tick(now + DURATION), Tick::Finished);
        assert_eq!(state.current(), 0.9);
        assert!(!state.is_animating());
        assert_eq!(state.tick(now + DURATION * 2), Tick::Idle);
    }

    #[test]
    fn test_animate_from_beginning() {
        let now = Instant::now();
        let mut state = ProgressState::default();
        state.set(0.6);
        state.animate(0.4, true, DURATION, Easing::Linear, now);
        assert_eq!(state.current(), 0.);
        assert_eq!(state.animation().unwrap().from, 0.);
        assert_eq!(state.animation().unwrap().to, 0.4);
    }

    #[test]
    fn test_animate_interrupted() {
        let now = Instant::now();
        let mut state = ProgressState::default();
        state.animate(1., true, DURATION, Easing::Linear, now);

        // Interrupt half way, continuing from the value on screen.
        let later = now + Duration::from_millis(500);
        state.animate(0.2, false, DURATION, Easing::Linear, later);
        let animation = *state.animation().unwrap();
        assert!((animation.from - 0.5).abs() < 1e-4);
        assert_eq!(animation.to, 0.2);
        assert_eq!(state.max(), 0.2);

        assert_eq!(state.tick(later + DURATION), Tick::Finished);
        assert_eq!(state.current(), 0.2);
    }

    #[test]
    fn test_animate_clamps_target() {
        let now = Instant::now();
        let mut state = ProgressState::default();
        state.animate(3., true, DURATION, Easing::Linear, now);
        assert_eq!(state.max(), 1.);
        state.tick(now + DURATION);
        assert_eq!(state.current(), 1.);
    }

    #[test]
    fn test_set_cancels_animation() {
        let now = Instant::now();
        let mut state = ProgressState::default();
        state.animate(0.8, true, DURATION, Easing::Linear, now);
        state.set(0.3);
        assert!(!state.is_animating());
        assert_eq!(state.tick(now + DURATION), Tick::Idle);
        assert_eq!(state.current(), 0.3);
    }

    #[test]
    fn test_finish() {
        let now = Instant::now();
        let mut state = ProgressState::default();
        assert!(!state.finish());

        state.animate(0.7, true, DURATION, Easing::Linear, now);
        assert!(state.finish());
        assert_eq!(state.current(), 0.7);
        assert!(!state.is_animating());
    }
}
