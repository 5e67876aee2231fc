//! Earth-Moon scene
//!
//! A spinning Earth at the origin and a moon on a circular X–Z orbit with
//! its own spin period, plus a gray ring tracing the orbit.

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::core::{AnimationState, FrameSet, OrbitParams, OrbitPlane};
use crate::scene::build::push_circle;
use crate::scene::{FramePrimitives, Primitive, Surface, TextureSlot};
use crate::view::{ViewConfig, ViewState};

const EARTH_RADIUS: f32 = 2.0;
const MOON_RADIUS: f32 = 0.6;
const MOON_ORBIT_RADIUS: f32 = 6.0;

pub struct EarthMoonScenePlugin;

impl Plugin for EarthMoonScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OrbitParams {
            orbit_radius: MOON_ORBIT_RADIUS,
            orbit_period_sec: 8.0,
            orbit_plane: OrbitPlane::Xz,
            body_yaw_rate_deg: 0.0,
            earth_spin_period_sec: 6.0,
            moon_spin_period_sec: Some(10.0),
            // This demo spins the Earth about the plain world Y axis.
            earth_axial_tilt_deg: 0.0,
        })
        .insert_resource(ViewConfig {
            home: ViewState {
                rot_x_deg: 20.0,
                rot_y_deg: -30.0,
                zoom: -20.0,
            },
            drag_deg_per_px: 0.4,
            wheel_step: 1.0,
            key_rot_step_deg: 3.0,
            key_zoom_step: 1.0,
            fov_deg: 60.0,
            near: 0.1,
            far: 1000.0,
            clear_color: Color::srgb(0.02, 0.02, 0.06),
        })
        .add_systems(Startup, setup_light)
        .add_systems(Update, build_earth_moon_scene.in_set(FrameSet::Build));
    }
}

fn setup_light(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: 60.0,
        ..default()
    });
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 200.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(10.0, 8.0, 12.0),
    ));
}

fn build_earth_moon_scene(
    anim: Res<AnimationState>,
    params: Res<OrbitParams>,
    mut prims: ResMut<FramePrimitives>,
) {
    prims.0 = assemble(&anim, &params);
}

pub fn assemble(anim: &AnimationState, params: &OrbitParams) -> Vec<Primitive> {
    let mut out = Vec::new();

    out.push(Primitive::Sphere {
        center: Vec3::ZERO,
        radius: EARTH_RADIUS,
        rotation: Quat::from_rotation_z(params.earth_axial_tilt_deg.to_radians())
            * Quat::from_rotation_y(anim.earth_spin_deg.to_radians()),
        surface: Surface::textured(TextureSlot::Earth),
    });

    out.push(Primitive::Sphere {
        center: params
            .orbit_plane
            .position(params.orbit_radius, anim.orbit_angle_rad),
        radius: MOON_RADIUS,
        rotation: Quat::from_rotation_y(anim.moon_spin_deg.to_radians()),
        surface: Surface::textured(TextureSlot::Moon),
    });

    let (u, v) = params.orbit_plane.basis();
    push_circle(
        &mut out,
        Vec3::ZERO,
        params.orbit_radius,
        128,
        u,
        v,
        Color::srgb(0.4, 0.4, 0.5),
        1.0,
    );

    out
}
