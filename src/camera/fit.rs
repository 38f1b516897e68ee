//! Camera Fit State Machine
//!
//! Keeps the camera framed as the room scale changes by orders of
//! magnitude, without fighting the user's own orbiting.
//!
//! On every recompute the current distance is checked against a band
//! around the fit distance. Only a gross mismatch (too close or too far)
//! starts a retarget; small orbit moves stay inside the band. While
//! retargeting, each tick eases the camera toward the target and snaps it
//! in place once it is close enough.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;

/// Direction used when the camera sits exactly on the origin
const FALLBACK_DIRECTION: DVec3 = DVec3::new(1.0, 1.0, 1.0);

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitState {
    /// Camera is left alone
    #[default]
    Stable,
    /// Camera is easing toward a pending target
    Retargeting,
}

impl fmt::Display for FitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitState::Stable => write!(f, "Stable"),
            FitState::Retargeting => write!(f, "Retargeting"),
        }
    }
}

/// Decides when to move the camera and integrates the smoothing step
///
/// The controller owns only the pending target; the live camera position
/// belongs to the renderer and is passed in on each call.
#[derive(Debug, Clone)]
pub struct CameraFitController {
    config: CameraConfig,
    state: FitState,
    target: Option<DVec3>,
}

impl Default for CameraFitController {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl CameraFitController {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            state: FitState::Stable,
            target: None,
        }
    }

    /// Distance at which a room of this size is well framed
    ///
    /// Saturates at `f64::MAX` so the band checks stay finite.
    pub fn fit_distance(&self, max_dim: f64) -> f64 {
        (max_dim * self.config.fit_multiplier).min(f64::MAX)
    }

    /// Decide whether the camera needs to move after a room change
    ///
    /// A new decision overwrites any pending target. A degenerate room
    /// (zero fit distance) never triggers a retarget.
    pub fn evaluate(&mut self, max_dim: f64, camera: DVec3) -> FitState {
        let fit = self.fit_distance(max_dim);
        let distance = camera.length();

        let out_of_band =
            distance < self.config.near_ratio * fit || distance > self.config.far_ratio * fit;

        if fit > 0.0 && out_of_band {
            let direction = camera
                .try_normalize()
                .unwrap_or_else(|| FALLBACK_DIRECTION.normalize());
            let mut target = direction * fit;
            target.y = target.y.max(self.config.min_height_ratio * fit);

            tracing::debug!(
                distance,
                fit,
                destination = ?target,
                "camera out of band, retargeting"
            );
            self.state = FitState::Retargeting;
            self.target = Some(target);
        } else {
            if self.state == FitState::Retargeting {
                tracing::debug!(distance, fit, "camera back in band, retarget cleared");
            }
            self.state = FitState::Stable;
            self.target = None;
        }

        self.state
    }

    /// Advance one animation frame
    ///
    /// `dt` is the frame time in seconds. The configured lerp factor is the
    /// fraction covered per tick at the reference tick rate; other frame
    /// times are scaled so the easing speed does not depend on frame rate.
    ///
    /// # Returns
    /// The new camera position (unchanged while stable)
    pub fn tick(&mut self, camera: DVec3, dt: f64) -> DVec3 {
        let Some(target) = self.target else {
            return camera;
        };

        let alpha = self.step_fraction(dt);
        let next = camera.lerp(target, alpha);

        if next.distance(target) < self.config.snap_threshold {
            tracing::debug!(destination = ?target, "camera reached target");
            self.state = FitState::Stable;
            self.target = None;
            return target;
        }

        next
    }

    fn step_fraction(&self, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0.0;
        }
        let ticks = dt * self.config.reference_tick_rate;
        1.0 - (1.0 - self.config.lerp_factor).powf(ticks)
    }

    pub fn state(&self) -> FitState {
        self.state
    }

    /// Pending target while retargeting
    pub fn target(&self) -> Option<DVec3> {
        self.target
    }

    pub fn is_retargeting(&self) -> bool {
        self.state == FitState::Retargeting
    }
}
