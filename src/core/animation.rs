//! Orbital and attitude animation state

use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::core::clock::SimClock;
use crate::core::frame::OrbitPlane;

/// Constant orbital/attitude parameters of a scene.
#[derive(Resource, Clone, Copy, Debug)]
pub struct OrbitParams {
    pub orbit_radius: f32,
    /// Seconds per revolution; zero disables orbital motion.
    pub orbit_period_sec: f32,
    pub orbit_plane: OrbitPlane,
    /// Body yaw rate in degrees per second.
    pub body_yaw_rate_deg: f32,
    /// Seconds per Earth revolution; zero disables the spin.
    pub earth_spin_period_sec: f32,
    /// Seconds per moon revolution, for scenes that have one.
    pub moon_spin_period_sec: Option<f32>,
    pub earth_axial_tilt_deg: f32,
}

impl OrbitParams {
    pub fn set_attitude_rate(&mut self, rate_deg_per_sec: f32) {
        self.body_yaw_rate_deg = rate_deg_per_sec;
    }
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            orbit_radius: 8.0,
            orbit_period_sec: TAU / 0.3,
            orbit_plane: OrbitPlane::Xy,
            body_yaw_rate_deg: 30.0,
            earth_spin_period_sec: 60.0,
            moon_spin_period_sec: None,
            earth_axial_tilt_deg: 23.5,
        }
    }
}

/// Accumulated angles of everything that moves.
///
/// `orbit_angle_rad` stays in [0, 2π); the degree fields stay in [0, 360).
/// All four wrap on every advance, so none of them grows without bound.
#[derive(Resource, Clone, Copy, Debug)]
pub struct AnimationState {
    pub enabled: bool,
    pub orbit_angle_rad: f32,
    pub body_yaw_deg: f32,
    pub earth_spin_deg: f32,
    pub moon_spin_deg: f32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            enabled: true,
            orbit_angle_rad: 0.0,
            body_yaw_deg: 0.0,
            earth_spin_deg: 0.0,
            moon_spin_deg: 0.0,
        }
    }
}

impl AnimationState {
    /// Integrate all accumulators over `dt` seconds. No-op while disabled.
    pub fn advance(&mut self, params: &OrbitParams, dt: f32) {
        if !self.enabled {
            return;
        }
        let dt = dt.max(0.0);
        if params.orbit_period_sec > 0.0 {
            let omega = TAU / params.orbit_period_sec;
            self.orbit_angle_rad = (self.orbit_angle_rad + omega * dt).rem_euclid(TAU);
        }
        self.body_yaw_deg = (self.body_yaw_deg + params.body_yaw_rate_deg * dt).rem_euclid(360.0);
        if params.earth_spin_period_sec > 0.0 {
            self.earth_spin_deg =
                (self.earth_spin_deg + 360.0 * dt / params.earth_spin_period_sec).rem_euclid(360.0);
        }
        if let Some(period) = params.moon_spin_period_sec {
            if period > 0.0 {
                self.moon_spin_deg = (self.moon_spin_deg + 360.0 * dt / period).rem_euclid(360.0);
            }
        }
    }

    /// Back to the home state: all angles zero, animation running.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Flip paused/running. Returns true when the call resumed the
    /// animation, in which case the caller must reset the clock so the
    /// paused interval contributes no dt.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}

/// System ticking the clock and advancing the animation accumulators.
pub fn advance_animation(
    mut clock: ResMut<SimClock>,
    params: Res<OrbitParams>,
    mut anim: ResMut<AnimationState>,
) {
    if !anim.enabled {
        return;
    }
    let dt = clock.tick();
    anim.advance(&params, dt);
}
