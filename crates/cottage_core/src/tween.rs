//! Time-based interpolation between two values
//!
//! A [`Tween`] is an explicit state machine:
//!
//! ```text
//! Idle --start()--> Active --tick() reaches duration--> Done
//!                     |
//!                     +------------cancel()-------------> Done
//! ```
//!
//! Time only advances through [`Tween::tick`], so the owner decides where the
//! clock comes from (frame delta in the app, fixed steps in tests).

use std::fmt;

use cottage_math::Lerp;

use crate::easing::Ease;

/// Errors raised when scheduling an animation
#[derive(Debug, Clone, PartialEq)]
pub enum TweenError {
    /// Duration was zero, negative or not finite
    InvalidDuration(f32),
    /// Ease name was not recognised
    UnknownEase(String),
}

impl fmt::Display for TweenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TweenError::InvalidDuration(d) => {
                write!(f, "Invalid tween duration {}: must be a positive number of seconds", d)
            }
            TweenError::UnknownEase(name) => write!(f, "Unknown ease: '{}'", name),
        }
    }
}

impl std::error::Error for TweenError {}

/// Lifecycle of a tween
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenState {
    /// Created but not started
    Idle,
    /// Advancing on every tick
    Active,
    /// Finished or cancelled; ticks are ignored
    Done,
}

/// Interpolates from `start` to `end` over `duration` seconds
#[derive(Clone, Debug)]
pub struct Tween<T: Lerp> {
    start: T,
    end: T,
    duration: f32,
    ease: Ease,
    elapsed: f32,
    state: TweenState,
}

impl<T: Lerp> Tween<T> {
    /// Create an idle tween
    ///
    /// Fails with [`TweenError::InvalidDuration`] unless `duration` is finite and positive.
    pub fn new(start: T, end: T, duration: f32, ease: Ease) -> Result<Self, TweenError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(TweenError::InvalidDuration(duration));
        }
        Ok(Self {
            start,
            end,
            duration,
            ease,
            elapsed: 0.0,
            state: TweenState::Idle,
        })
    }

    /// Move from Idle to Active; no effect in any other state
    pub fn start(&mut self) {
        if self.state == TweenState::Idle {
            self.state = TweenState::Active;
        }
    }

    /// Advance by `dt` seconds
    ///
    /// Returns the new value on every Active tick, including the final one
    /// that moves the tween to Done. Returns `None` when Idle or Done.
    pub fn tick(&mut self, dt: f32) -> Option<T> {
        if self.state != TweenState::Active {
            return None;
        }
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed >= self.duration {
            self.elapsed = self.duration;
            self.state = TweenState::Done;
        }
        Some(self.value_at(self.elapsed))
    }

    /// Interpolated value at normalised time `t` (clamped to [0, 1])
    ///
    /// Returns `start` exactly at `t <= 0` and `end` exactly at `t >= 1`.
    pub fn sample(&self, t: f32) -> T {
        if t >= 1.0 {
            return self.end;
        }
        self.start.lerp(self.end, self.ease.apply(t))
    }

    /// Interpolated value after `elapsed` seconds
    pub fn value_at(&self, elapsed: f32) -> T {
        self.sample(elapsed / self.duration)
    }

    /// Stop without producing further values
    pub fn cancel(&mut self) {
        self.state = TweenState::Done;
    }

    #[inline]
    pub fn state(&self) -> TweenState {
        self.state
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == TweenState::Active
    }

    /// Normalised time in [0, 1]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn ease(&self) -> Ease {
        self.ease
    }

    #[inline]
    pub fn start_value(&self) -> T {
        self.start
    }

    #[inline]
    pub fn end_value(&self) -> T {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Curve;
    use cottage_math::Vec3;

    const EPSILON: f32 = 1e-5;

    fn flight() -> Tween<Vec3> {
        Tween::new(
            Vec3::new(20.0, 15.0, 30.0),
            Vec3::new(0.0, 2.0, 3.0),
            10.0,
            Ease::POWER2_IN_OUT,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_duration() {
        for d in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            match Tween::new(0.0f32, 1.0, d, Ease::Linear) {
                Err(TweenError::InvalidDuration(got)) => {
                    assert!(got.is_nan() && d.is_nan() || got == d)
                }
                other => panic!("duration {} accepted: {:?}", d, other.map(|t| t.duration())),
            }
        }
    }

    #[test]
    fn test_state_machine() {
        let mut tween = Tween::new(0.0f32, 1.0, 1.0, Ease::Linear).unwrap();
        assert_eq!(tween.state(), TweenState::Idle);
        assert_eq!(tween.tick(0.5), None, "idle tweens do not advance");

        tween.start();
        assert_eq!(tween.state(), TweenState::Active);
        assert_eq!(tween.tick(0.5), Some(0.5));
        assert_eq!(tween.tick(0.5), Some(1.0));
        assert_eq!(tween.state(), TweenState::Done);
        assert_eq!(tween.tick(0.5), None);

        tween.start();
        assert_eq!(tween.state(), TweenState::Done, "start does not revive a finished tween");
    }

    #[test]
    fn test_exact_endpoints() {
        let tween = flight();
        assert_eq!(tween.sample(0.0), Vec3::new(20.0, 15.0, 30.0));
        assert_eq!(tween.sample(1.0), Vec3::new(0.0, 2.0, 3.0));
    }

    #[test]
    fn test_clamped_past_end() {
        let tween = flight();
        let end = tween.sample(1.0);
        assert_eq!(tween.sample(1.5), end);
        assert_eq!(tween.sample(100.0), end);
        assert_eq!(tween.value_at(25.0), end);
        assert_eq!(tween.sample(-1.0), tween.sample(0.0));
    }

    #[test]
    fn test_interpolation_formula() {
        let tween = flight();
        let start = tween.start_value();
        let end = tween.end_value();
        for i in 0..10 {
            let t = i as f32 / 10.0;
            let p = Ease::POWER2_IN_OUT.apply(t);
            let expected = start + (end - start) * p;
            assert!((tween.sample(t) - expected).length() < EPSILON);
        }
    }

    #[test]
    fn test_interpolation_formula_for_every_ease_and_duration() {
        let start = Vec3::new(20.0, 15.0, 30.0);
        let end = Vec3::new(0.0, 2.0, 3.0);
        for ease in Ease::all() {
            for duration in [0.001, 1.0, 10.0, 1e4] {
                let tween = Tween::new(start, end, duration, ease).unwrap();
                assert_eq!(tween.value_at(0.0), start, "{} over {}s", ease, duration);
                assert_eq!(tween.value_at(duration), end, "{} over {}s", ease, duration);

                for i in 1..10 {
                    let elapsed = duration * i as f32 / 10.0;
                    let p = ease.apply(elapsed / duration);
                    let expected = start + (end - start) * p;
                    assert!(
                        (tween.value_at(elapsed) - expected).length() < 1e-4,
                        "{} over {}s at {}s",
                        ease,
                        duration,
                        elapsed
                    );
                }
            }
        }
    }

    #[test]
    fn test_overshooting_tick_lands_on_end() {
        let mut tween = flight();
        tween.start();
        tween.tick(9.99);
        assert_eq!(tween.tick(1.0), Some(Vec3::new(0.0, 2.0, 3.0)));
        assert_eq!(tween.progress(), 1.0);
        assert_eq!(tween.elapsed(), 10.0);
    }

    #[test]
    fn test_cancel_stops_output() {
        let mut tween = flight();
        tween.start();
        tween.tick(1.0);
        tween.cancel();
        assert_eq!(tween.state(), TweenState::Done);
        assert_eq!(tween.tick(1.0), None);
        assert!(tween.progress() < 1.0);
    }

    #[test]
    fn test_bad_dt_does_not_advance() {
        let mut tween = Tween::new(0.0f32, 1.0, 1.0, Ease::Linear).unwrap();
        tween.start();
        assert_eq!(tween.tick(-1.0), Some(0.0));
        assert_eq!(tween.tick(f32::NAN), Some(0.0));
        assert!(tween.is_active());
    }

    #[test]
    fn test_non_monotonic_ease_overshoots() {
        let tween = Tween::new(0.0f32, 10.0, 1.0, Ease::Out(Curve::Back)).unwrap();
        assert!(tween.sample(0.7) > 10.0);
        assert_eq!(tween.sample(1.0), 10.0);
    }

    #[test]
    fn test_error_display() {
        assert!(TweenError::InvalidDuration(-2.0).to_string().contains("-2"));
        assert!(TweenError::UnknownEase("wobble".into()).to_string().contains("wobble"));
    }
}
