//! Camera fly-through
//!
//! The [`CameraDirector`] moves a camera from wherever it currently is to a
//! destination over a fixed duration. It holds at most one flight; scheduling
//! another replaces it. The camera itself is reached through [`FlightRig`],
//! whose `on_flight_tick` hook runs after every position write so view
//! controls can re-aim the camera in the same frame.

use cottage_math::Vec3;

use crate::easing::Ease;
use crate::tween::{Tween, TweenError, TweenState};

/// The camera (plus whatever tracks it) that a flight writes to
pub trait FlightRig {
    /// Current camera position
    fn camera_position(&self) -> Vec3;

    /// Overwrite the camera position
    fn set_camera_position(&mut self, position: Vec3);

    /// Called once after each position write
    fn on_flight_tick(&mut self) {}
}

/// Drives the camera along a single eased flight
#[derive(Debug, Default)]
pub struct CameraDirector {
    flight: Option<Tween<Vec3>>,
}

impl CameraDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a flight from the rig's current position to `end`
    ///
    /// An invalid duration is rejected before anything changes: a flight that
    /// is already running keeps running and the camera is not touched.
    pub fn fly_to(
        &mut self,
        rig: &impl FlightRig,
        end: Vec3,
        duration: f32,
        ease: Ease,
    ) -> Result<(), TweenError> {
        let start = rig.camera_position();
        let mut tween = Tween::new(start, end, duration, ease)?;
        tween.start();

        if self.is_active() {
            log::debug!("Replacing active camera flight");
        }
        log::info!(
            "Camera flight: ({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2}) over {}s, ease {}",
            start.x, start.y, start.z, end.x, end.y, end.z, duration, ease
        );
        self.flight = Some(tween);
        Ok(())
    }

    /// Advance the active flight by `dt` seconds
    ///
    /// Writes the camera and fires the rig hook once if a flight is active.
    /// Returns whether a flight is still active afterwards.
    pub fn tick(&mut self, dt: f32, rig: &mut impl FlightRig) -> bool {
        let Some(tween) = self.flight.as_mut() else {
            return false;
        };
        let Some(position) = tween.tick(dt) else {
            return false;
        };

        rig.set_camera_position(position);
        rig.on_flight_tick();

        if tween.state() == TweenState::Done {
            log::info!("Camera flight finished");
            return false;
        }
        true
    }

    /// Jump straight to the destination of the active flight
    ///
    /// Returns false when no flight was active.
    pub fn finish(&mut self, rig: &mut impl FlightRig) -> bool {
        match self.flight.as_mut() {
            Some(tween) if tween.is_active() => {
                rig.set_camera_position(tween.end_value());
                rig.on_flight_tick();
                tween.cancel();
                log::info!("Camera flight skipped");
                true
            }
            _ => false,
        }
    }

    /// Drop the active flight; the camera stays where it is
    pub fn cancel(&mut self) {
        if self.flight.take().is_some_and(|t| t.is_active()) {
            log::debug!("Camera flight cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.flight.as_ref().is_some_and(Tween::is_active)
    }

    /// Normalised progress of the current flight, 0.0 when none was scheduled
    pub fn progress(&self) -> f32 {
        self.flight.as_ref().map_or(0.0, Tween::progress)
    }

    /// Destination of the active flight
    pub fn destination(&self) -> Option<Vec3> {
        self.flight
            .as_ref()
            .filter(|t| t.is_active())
            .map(Tween::end_value)
    }
}
