//! Textured Earth scene
//!
//! A single equirectangular-textured sphere, tilted 23.5° about Z and
//! spinning about the tilted polar axis once per minute.

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::core::{AnimationState, FrameSet, OrbitParams, OrbitPlane};
use crate::scene::{FramePrimitives, Primitive, Surface, TextureSlot};
use crate::view::{ViewConfig, ViewState};

const EARTH_RADIUS: f32 = 3.0;
/// Shifts the texture seam to the back of the sphere at spin 0.
const TEXTURE_YAW_OFFSET_DEG: f32 = 180.0;

pub struct TexturedEarthScenePlugin;

impl Plugin for TexturedEarthScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OrbitParams {
            orbit_radius: 0.0,
            orbit_period_sec: 0.0,
            orbit_plane: OrbitPlane::Xy,
            body_yaw_rate_deg: 0.0,
            earth_spin_period_sec: 60.0,
            moon_spin_period_sec: None,
            earth_axial_tilt_deg: 23.5,
        })
        .insert_resource(ViewConfig {
            home: ViewState {
                rot_x_deg: 20.0,
                rot_y_deg: -30.0,
                zoom: -10.0,
            },
            drag_deg_per_px: 0.5,
            wheel_step: 0.5,
            key_rot_step_deg: 5.0,
            key_zoom_step: 0.5,
            fov_deg: 45.0,
            near: 0.1,
            far: 100.0,
            clear_color: Color::srgb(0.05, 0.05, 0.1),
        })
        .add_systems(Startup, setup_light)
        .add_systems(Update, build_earth_scene.in_set(FrameSet::Build));
    }
}

fn setup_light(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: 80.0,
        ..default()
    });
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 100.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(5.0, 5.0, 10.0),
    ));
}

fn build_earth_scene(
    anim: Res<AnimationState>,
    params: Res<OrbitParams>,
    mut prims: ResMut<FramePrimitives>,
) {
    prims.0 = assemble(&anim, &params);
}

pub fn assemble(anim: &AnimationState, params: &OrbitParams) -> Vec<Primitive> {
    vec![Primitive::Sphere {
        center: Vec3::ZERO,
        radius: EARTH_RADIUS,
        rotation: earth_orientation(params.earth_axial_tilt_deg, anim.earth_spin_deg),
        surface: Surface::textured(TextureSlot::Earth),
    }]
}

/// Tilt first, then spin about the tilted axis; the texture offset rides
/// on the spin angle.
pub fn earth_orientation(tilt_deg: f32, spin_deg: f32) -> Quat {
    Quat::from_rotation_z(tilt_deg.to_radians())
        * Quat::from_rotation_y((spin_deg + TEXTURE_YAW_OFFSET_DEG).to_radians())
}
