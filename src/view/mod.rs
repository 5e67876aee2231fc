//! View state and input handling
//!
//! The view is the fixed-function camera model of the original demos: a
//! translation down the view axis by `zoom` (negative), then rotations
//! about X and Y in degrees. Input events mutate `ViewState`,
//! `DisplayFlags`, and the animation controls; `apply_view_state` mirrors
//! the resulting pose onto the camera entity every frame.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;

use crate::core::{AnimationState, FrameSet, OrbitParams, SimClock};
use crate::scene::DisplayFlags;

/// Marker for the scene camera.
#[derive(Component)]
pub struct MainCamera;

/// Orbit-style view pose: rotations in degrees, zoom < 0 along the view axis.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub rot_x_deg: f32,
    pub rot_y_deg: f32,
    pub zoom: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rot_x_deg: 0.0,
            rot_y_deg: 0.0,
            zoom: -20.0,
        }
    }
}

/// Per-scene view constants: home pose, input sensitivities, projection.
#[derive(Resource, Clone, Copy, Debug)]
pub struct ViewConfig {
    pub home: ViewState,
    pub drag_deg_per_px: f32,
    pub wheel_step: f32,
    pub key_rot_step_deg: f32,
    pub key_zoom_step: f32,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub clear_color: Color,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            home: ViewState::default(),
            drag_deg_per_px: 0.5,
            wheel_step: 1.0,
            key_rot_step_deg: 5.0,
            key_zoom_step: 1.0,
            fov_deg: 45.0,
            near: 0.1,
            far: 1000.0,
            clear_color: Color::srgb(0.1, 0.1, 0.1),
        }
    }
}

/// Camera pose (rotation, translation) equivalent to the modelview chain
/// `translate(0,0,zoom) · rotX · rotY`. Pure so it can be checked directly.
pub fn camera_transform(view: &ViewState) -> (Quat, Vec3) {
    let rotation = Quat::from_rotation_y(-view.rot_y_deg.to_radians())
        * Quat::from_rotation_x(-view.rot_x_deg.to_radians());
    (rotation, rotation * Vec3::new(0.0, 0.0, -view.zoom))
}

pub struct ViewPlugin;

impl Plugin for ViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewState>()
            .init_resource::<ViewConfig>()
            .init_resource::<DisplayFlags>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (mouse_drag_view, mouse_wheel_view, keyboard_controls).in_set(FrameSet::Input),
            )
            .add_systems(Update, apply_view_state.in_set(FrameSet::Draw));
    }
}

fn setup_camera(mut commands: Commands, config: Res<ViewConfig>) {
    commands.insert_resource(config.home);
    let (rotation, translation) = camera_transform(&config.home);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_deg.to_radians(),
            near: config.near,
            far: config.far,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(config.clear_color),
            ..default()
        },
        MainCamera,
        Transform::from_translation(translation).with_rotation(rotation),
    ));
}

/// Left-drag rotates the view, 1 px = `drag_deg_per_px` degrees.
pub fn mouse_drag_view(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    config: Res<ViewConfig>,
    mut view: ResMut<ViewState>,
) {
    if !buttons.pressed(MouseButton::Left) || motion.delta == Vec2::ZERO {
        return;
    }
    view.rot_y_deg += motion.delta.x * config.drag_deg_per_px;
    view.rot_x_deg += motion.delta.y * config.drag_deg_per_px;
}

pub fn mouse_wheel_view(
    scroll: Res<AccumulatedMouseScroll>,
    config: Res<ViewConfig>,
    mut view: ResMut<ViewState>,
) {
    if scroll.delta.y == 0.0 {
        return;
    }
    // Wheel-down is one positive tick, matching the original controls.
    let ticks = match scroll.unit {
        MouseScrollUnit::Line => -scroll.delta.y,
        MouseScrollUnit::Pixel => -scroll.delta.y / 16.0,
    };
    view.zoom += ticks * config.wheel_step;
}

pub fn keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<ViewConfig>,
    mut view: ResMut<ViewState>,
    mut flags: ResMut<DisplayFlags>,
    mut anim: ResMut<AnimationState>,
    mut params: ResMut<OrbitParams>,
    mut clock: ResMut<SimClock>,
) {
    if keys.just_pressed(KeyCode::Space) && anim.toggle() {
        clock.reset();
    }
    if keys.just_pressed(KeyCode::KeyR) {
        *view = config.home;
        anim.reset();
        clock.reset();
    }
    if keys.just_pressed(KeyCode::KeyG) {
        flags.show_grid = !flags.show_grid;
    }
    if keys.just_pressed(KeyCode::KeyT) {
        flags.show_trajectory = !flags.show_trajectory;
    }
    if keys.just_pressed(KeyCode::KeyA) {
        flags.show_axes = !flags.show_axes;
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        view.rot_y_deg -= config.key_rot_step_deg;
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        view.rot_y_deg += config.key_rot_step_deg;
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        view.rot_x_deg -= config.key_rot_step_deg;
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        view.rot_x_deg += config.key_rot_step_deg;
    }
    if keys.just_pressed(KeyCode::Equal) || keys.just_pressed(KeyCode::NumpadAdd) {
        view.zoom += config.key_zoom_step;
    }
    if keys.just_pressed(KeyCode::Minus) || keys.just_pressed(KeyCode::NumpadSubtract) {
        view.zoom -= config.key_zoom_step;
    }
    if keys.just_pressed(KeyCode::BracketLeft) {
        let slower = (params.body_yaw_rate_deg - 5.0).max(0.0);
        params.set_attitude_rate(slower);
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        let faster = params.body_yaw_rate_deg + 5.0;
        params.set_attitude_rate(faster);
    }
}

fn apply_view_state(view: Res<ViewState>, mut camera: Query<&mut Transform, With<MainCamera>>) {
    let Ok(mut transform) = camera.single_mut() else {
        return;
    };
    let (rotation, translation) = camera_transform(&view);
    transform.rotation = rotation;
    transform.translation = translation;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_transform_at_home_axes() {
        // Zero rotation puts the camera straight back on +Z looking at origin.
        let view = ViewState {
            rot_x_deg: 0.0,
            rot_y_deg: 0.0,
            zoom: -30.0,
        };
        let (rotation, translation) = camera_transform(&view);
        assert!((translation - Vec3::new(0.0, 0.0, 30.0)).length() < 1e-5);
        let forward = rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_camera_transform_keeps_distance() {
        let view = ViewState {
            rot_x_deg: 25.0,
            rot_y_deg: -35.0,
            zoom: -30.0,
        };
        let (rotation, translation) = camera_transform(&view);
        assert!((translation.length() - 30.0).abs() < 1e-4);
        // The camera still looks at the origin.
        let forward = rotation * Vec3::NEG_Z;
        assert!((translation + forward * 30.0).length() < 1e-3);
    }
}
