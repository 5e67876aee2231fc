//! Satellite scene: O₁ ↔ O₂ coordinate transformation demo
//!
//! An Earth at the inertial origin, a satellite on a circular X–Y orbit
//! carrying its own body frame, and a test point rendered twice (once
//! through the body pose, once through the pure `to_world` formula) to
//! make P₁ = R(θ)·P₂ + T visible.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::f32::consts::TAU;

use crate::core::{AnimationState, FrameSet, OrbitParams, OrbitPlane, RigidTransform};
use crate::scene::build::{
    push_circle, push_frame_axes, push_grid, push_point_marker, push_satellite_body,
};
use crate::scene::{DisplayFlags, FramePrimitives, Primitive, Surface, TrajectoryAnchor};
use crate::view::{ViewConfig, ViewState};

const EARTH_RADIUS: f32 = 2.5;
const SATELLITE_SIZE: f32 = 0.6;
const ORBIT_RADIUS: f32 = 8.0;
const ORBIT_RATE_RAD_PER_SEC: f32 = 0.3;

/// The user-chosen point, expressed in the body frame O₂.
#[derive(Resource, Clone, Copy, Debug, Deref)]
pub struct TestPoint(pub Vec3);

impl Default for TestPoint {
    fn default() -> Self {
        Self(Vec3::new(3.0, 2.0, 1.5))
    }
}

pub struct SatelliteScenePlugin;

impl Plugin for SatelliteScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OrbitParams {
            orbit_radius: ORBIT_RADIUS,
            orbit_period_sec: TAU / ORBIT_RATE_RAD_PER_SEC,
            orbit_plane: OrbitPlane::Xy,
            body_yaw_rate_deg: 30.0,
            earth_spin_period_sec: 60.0,
            moon_spin_period_sec: None,
            earth_axial_tilt_deg: 23.5,
        })
        .insert_resource(ViewConfig {
            home: ViewState {
                rot_x_deg: 25.0,
                rot_y_deg: -35.0,
                zoom: -30.0,
            },
            drag_deg_per_px: 0.5,
            wheel_step: 2.0,
            key_rot_step_deg: 5.0,
            key_zoom_step: 2.0,
            fov_deg: 45.0,
            near: 0.1,
            far: 1000.0,
            clear_color: Color::srgb(0.15, 0.15, 0.15),
        })
        .init_resource::<TestPoint>()
        .init_resource::<TrajectoryAnchor>()
        .add_systems(Update, build_satellite_scene.in_set(FrameSet::Build));
    }
}

fn build_satellite_scene(
    anim: Res<AnimationState>,
    params: Res<OrbitParams>,
    flags: Res<DisplayFlags>,
    anchor: Res<TrajectoryAnchor>,
    test_point: Res<TestPoint>,
    window: Query<&Window, With<PrimaryWindow>>,
    mut prims: ResMut<FramePrimitives>,
) {
    let height = window
        .single()
        .map(|w| w.resolution.height())
        .unwrap_or(800.0);
    prims.0 = assemble(&anim, &params, &flags, *anchor, **test_point, height);
}

/// Build the full primitive stream for one frame.
pub fn assemble(
    anim: &AnimationState,
    params: &OrbitParams,
    flags: &DisplayFlags,
    anchor: TrajectoryAnchor,
    test_point: Vec3,
    window_height: f32,
) -> Vec<Primitive> {
    let mut out = Vec::new();
    let pose = RigidTransform::from_orbit(params, anim);

    if flags.show_grid {
        push_grid(&mut out, 20.0, 20, Color::srgba(0.8, 0.8, 0.8, 0.5));
    }

    // Earth: tilt about Z first, then spin about the tilted polar axis.
    let earth_rotation = Quat::from_rotation_z(params.earth_axial_tilt_deg.to_radians())
        * Quat::from_rotation_y(anim.earth_spin_deg.to_radians());
    out.push(Primitive::Sphere {
        center: Vec3::ZERO,
        radius: EARTH_RADIUS,
        rotation: earth_rotation,
        surface: Surface::flat(Color::srgba(0.2, 0.4, 0.7, 0.9)),
    });
    push_circle(
        &mut out,
        Vec3::ZERO,
        EARTH_RADIUS,
        64,
        earth_rotation * Vec3::X,
        earth_rotation * Vec3::Z,
        Color::srgba(0.3, 0.3, 0.3, 0.5),
        1.0,
    );

    if flags.show_axes {
        push_frame_axes(
            &mut out,
            Vec3::ZERO,
            Quat::IDENTITY,
            5.0,
            [
                Color::srgb(1.0, 0.0, 0.0),
                Color::srgb(0.0, 0.8, 0.0),
                Color::srgb(0.0, 0.0, 1.0),
            ],
        );
    }

    let (u, v) = params.orbit_plane.basis();
    push_circle(
        &mut out,
        Vec3::ZERO,
        params.orbit_radius,
        128,
        u,
        v,
        Color::srgba(0.5, 0.5, 0.5, 0.4),
        1.5,
    );

    push_satellite_body(&mut out, &pose, SATELLITE_SIZE);
    if flags.show_axes {
        push_frame_axes(
            &mut out,
            pose.translation,
            pose.rotation(),
            4.0,
            [
                Color::srgb(1.0, 0.5, 0.0),
                Color::srgb(0.5, 1.0, 0.5),
                Color::srgb(0.5, 0.5, 1.0),
            ],
        );
    }

    // The test point twice: through the body pose, and through the pure
    // formula. The two spheres land on the same spot; that agreement is
    // the demonstration.
    let local_world = pose.rotation() * test_point + pose.translation;
    push_point_marker(&mut out, local_world, Color::srgba(1.0, 0.0, 1.0, 1.0), 8.0);
    let world = pose.to_world(test_point);
    push_point_marker(&mut out, world, Color::srgba(0.8, 0.0, 0.8, 0.5), 6.0);

    if flags.show_trajectory {
        let from = match anchor {
            TrajectoryAnchor::Translation => pose.translation + test_point,
            TrajectoryAnchor::Rotated => world,
        };
        out.push(Primitive::Line {
            p0: from,
            p1: world,
            width: 1.5,
            color: Color::srgba(0.7, 0.0, 0.7, 0.4),
            stippled: true,
        });
    }

    push_overlay(&mut out, &pose, params, test_point, world, window_height);
    out
}

fn push_overlay(
    out: &mut Vec<Primitive>,
    pose: &RigidTransform,
    params: &OrbitParams,
    test_point: Vec3,
    world: Vec3,
    window_height: f32,
) {
    let mut top = 20.0;
    let mut line = |out: &mut Vec<Primitive>, advance: f32, text: String, color: Color| {
        out.push(Primitive::Text {
            left: 20.0,
            top,
            text,
            color,
        });
        top += advance;
    };
    let t = pose.translation;

    line(
        out,
        52.0,
        "Earth-Satellite Coordinate Transformation".to_string(),
        Color::WHITE,
    );
    line(
        out,
        35.0,
        "Earth - O₁ Earth-Centered Inertial Frame".to_string(),
        Color::srgb(0.2, 0.4, 0.9),
    );
    line(
        out,
        52.0,
        "Satellite - O₂ Body-Fixed Frame".to_string(),
        Color::srgb(0.8, 0.8, 0.9),
    );
    line(
        out,
        35.0,
        format!("Satellite Position: ({:.2}, {:.2}, {:.2}) km", t.x, t.y, t.z),
        Color::WHITE,
    );
    line(
        out,
        35.0,
        format!("Satellite Attitude (Yaw): {:.1}°", pose.yaw_deg),
        Color::WHITE,
    );
    line(
        out,
        52.0,
        format!("Orbital Radius: {:.2} km", params.orbit_radius),
        Color::WHITE,
    );
    line(
        out,
        35.0,
        format!(
            "Point in O₂ frame: P₂ = ({:.2}, {:.2}, {:.2})",
            test_point.x, test_point.y, test_point.z
        ),
        Color::srgb(1.0, 0.0, 1.0),
    );
    line(
        out,
        52.0,
        format!(
            "Point in O₁ frame: P₁ = ({:.2}, {:.2}, {:.2})",
            world.x, world.y, world.z
        ),
        Color::srgb(0.8, 0.0, 0.8),
    );
    line(
        out,
        0.0,
        "Transformation: P₁ = R(θ) · P₂ + T".to_string(),
        Color::srgb(0.3, 0.3, 1.0),
    );

    out.push(Primitive::Text {
        left: 20.0,
        top: window_height - 40.0,
        text: "Controls: Mouse drag (rotate) | Wheel (zoom) | SPACE (pause) | R (reset) | G (grid) | T (trajectory)"
            .to_string(),
        color: Color::srgb(0.4, 0.4, 0.4),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> (AnimationState, OrbitParams, DisplayFlags) {
        (
            AnimationState::default(),
            OrbitParams::default(),
            DisplayFlags::default(),
        )
    }

    fn stream(flags: &DisplayFlags) -> Vec<Primitive> {
        let (anim, params, _) = defaults();
        assemble(
            &anim,
            &params,
            flags,
            TrajectoryAnchor::Translation,
            Vec3::new(3.0, 2.0, 1.5),
            800.0,
        )
    }

    fn grid_lines(stream: &[Primitive]) -> usize {
        stream
            .iter()
            .filter(|p| {
                matches!(p, Primitive::Line { p0, p1, .. }
                    if p0.z == 0.0 && p1.z == 0.0 && (p0.x.abs() == 20.0 || p0.y.abs() == 20.0))
            })
            .count()
    }

    #[test]
    fn test_grid_toggle_changes_stream() {
        let mut flags = DisplayFlags::default();
        flags.show_grid = true;
        let with_grid = stream(&flags);
        flags.show_grid = false;
        let without_grid = stream(&flags);
        assert_eq!(with_grid.len(), without_grid.len() + 42);
        assert!(grid_lines(&with_grid) >= 42);
        assert_eq!(grid_lines(&without_grid), 0);
    }

    #[test]
    fn test_both_test_point_renderings_coincide() {
        let (mut anim, params, flags) = defaults();
        anim.advance(&params, 2.7);
        let stream = assemble(
            &anim,
            &params,
            &flags,
            TrajectoryAnchor::Translation,
            Vec3::new(3.0, 2.0, 1.5),
            800.0,
        );
        let markers: Vec<Vec3> = stream
            .iter()
            .filter_map(|p| match p {
                Primitive::Sphere { center, radius, .. } if *radius == 0.25 => Some(*center),
                _ => None,
            })
            .collect();
        assert_eq!(markers.len(), 2);
        assert!(
            (markers[0] - markers[1]).length() < 1e-4,
            "pose path and pure path disagree: {} vs {}",
            markers[0],
            markers[1]
        );
    }

    #[test]
    fn test_trajectory_spans_rotation_displacement() {
        let (mut anim, params, flags) = defaults();
        anim.advance(&params, 1.0);
        let pose = RigidTransform::from_orbit(&params, &anim);
        let p2 = Vec3::new(3.0, 2.0, 1.5);
        let stream = assemble(&anim, &params, &flags, TrajectoryAnchor::Translation, p2, 800.0);
        let dashed: Vec<&Primitive> = stream
            .iter()
            .filter(|p| matches!(p, Primitive::Line { stippled: true, .. }))
            .collect();
        assert_eq!(dashed.len(), 1);
        let Primitive::Line { p0, p1, .. } = dashed[0] else {
            unreachable!()
        };
        assert!((*p0 - (pose.translation + p2)).length() < 1e-4);
        assert!((*p1 - pose.to_world(p2)).length() < 1e-4);
        // ψ = 30°, so the two endpoints must be visibly apart.
        assert!((*p1 - *p0).length() > 0.5);
    }

    #[test]
    fn test_trajectory_toggle_removes_line() {
        let mut flags = DisplayFlags::default();
        flags.show_trajectory = false;
        let stream = stream(&flags);
        assert!(
            !stream
                .iter()
                .any(|p| matches!(p, Primitive::Line { stippled: true, .. }))
        );
    }

    #[test]
    fn test_axes_toggle_removes_arrows() {
        let mut flags = DisplayFlags::default();
        flags.show_axes = false;
        let stream = stream(&flags);
        assert!(!stream.iter().any(|p| matches!(p, Primitive::Arrow { .. })));
    }

    #[test]
    fn test_overlay_reports_live_transform() {
        let (mut anim, params, flags) = defaults();
        anim.advance(&params, 1.0);
        let stream = assemble(
            &anim,
            &params,
            &flags,
            TrajectoryAnchor::Translation,
            Vec3::new(3.0, 2.0, 1.5),
            800.0,
        );
        let texts: Vec<&str> = stream
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.iter().any(|t| t.contains("P₁ = R(θ) · P₂ + T")));
        assert!(texts.iter().any(|t| t.contains("P₂ = (3.00, 2.00, 1.50)")));
        assert!(texts.iter().any(|t| t.contains("Yaw): 30.0°")));
        assert!(texts.iter().any(|t| t.starts_with("Controls:")));
    }

    #[test]
    fn test_home_view_matches_reset_target() {
        let plugin_config = ViewState {
            rot_x_deg: 25.0,
            rot_y_deg: -35.0,
            zoom: -30.0,
        };
        // Keep the documented reset pose in sync with the plugin constants.
        let mut app = App::new();
        app.add_plugins(SatelliteScenePlugin);
        let config = app.world().resource::<ViewConfig>();
        assert_eq!(config.home, plugin_config);
    }
}
