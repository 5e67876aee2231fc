//! Rigid transform between the body frame O₂ and the inertial frame O₁

use bevy::prelude::*;

use crate::core::animation::{AnimationState, OrbitParams};

/// Plane of the circular orbit, a scene-level parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitPlane {
    /// Orbit in the X–Y plane (satellite scene).
    Xy,
    /// Orbit in the X–Z plane (earth-moon scene).
    Xz,
}

impl OrbitPlane {
    /// Point on the orbit circle at `angle_rad`.
    pub fn position(self, radius: f32, angle_rad: f32) -> Vec3 {
        let (sin, cos) = angle_rad.sin_cos();
        match self {
            OrbitPlane::Xy => Vec3::new(radius * cos, radius * sin, 0.0),
            OrbitPlane::Xz => Vec3::new(radius * cos, 0.0, radius * sin),
        }
    }

    /// Orthonormal basis (u, v) spanning the plane, for tracing the circle.
    pub fn basis(self) -> (Vec3, Vec3) {
        match self {
            OrbitPlane::Xy => (Vec3::X, Vec3::Y),
            OrbitPlane::Xz => (Vec3::X, Vec3::Z),
        }
    }
}

/// Pose of the body frame O₂ in the inertial frame O₁: the body origin `T`
/// and a single-axis yaw rotation about the body Z-axis.
///
/// `to_world` is the canonical form of the transform; the render side mirrors
/// it when it orients meshes, and the overlay and trajectory read it directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidTransform {
    pub translation: Vec3,
    pub yaw_deg: f32,
}

impl RigidTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        yaw_deg: 0.0,
    };

    /// Derive the body pose from the current animation state.
    pub fn from_orbit(params: &OrbitParams, state: &AnimationState) -> Self {
        Self {
            translation: params
                .orbit_plane
                .position(params.orbit_radius, state.orbit_angle_rad),
            yaw_deg: state.body_yaw_deg,
        }
    }

    /// P₁ = Rz(ψ) · P₂ + T.
    pub fn to_world(&self, p: Vec3) -> Vec3 {
        let (sin, cos) = self.yaw_deg.to_radians().sin_cos();
        Vec3::new(
            cos * p.x - sin * p.y + self.translation.x,
            sin * p.x + cos * p.y + self.translation.y,
            p.z + self.translation.z,
        )
    }

    /// The yaw as a quaternion, for orienting meshes in the body frame.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.yaw_deg.to_radians())
    }
}

/// Orientation that carries a +Z-authored arrowhead onto `dir`: yaw about Y
/// by atan2(dx, dz), then pitch about X by asin(−dy / |dir|). The cone mesh
/// this pairs with has its apex on +Z.
pub fn arrow_rotation(dir: Vec3) -> Quat {
    let len = dir.length();
    if len <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    let yaw = dir.x.atan2(dir.z);
    let pitch = (-dir.y / len).asin();
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch)
}
