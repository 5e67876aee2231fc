//! Shared emitters for the primitive stream

use bevy::prelude::*;

use crate::core::RigidTransform;
use crate::scene::{Primitive, Surface};

/// Radius of the dark marker sphere drawn at a frame origin.
const FRAME_ORIGIN_RADIUS: f32 = 0.2;

/// Square grid in the z = 0 plane: `cells` + 1 lines in each direction
/// spanning ±`half_extent`.
pub fn push_grid(out: &mut Vec<Primitive>, half_extent: f32, cells: u32, color: Color) {
    let step = half_extent * 2.0 / cells as f32;
    for i in 0..=cells {
        let pos = -half_extent + i as f32 * step;
        out.push(Primitive::Line {
            p0: Vec3::new(-half_extent, pos, 0.0),
            p1: Vec3::new(half_extent, pos, 0.0),
            width: 1.0,
            color,
            stippled: false,
        });
        out.push(Primitive::Line {
            p0: Vec3::new(pos, -half_extent, 0.0),
            p1: Vec3::new(pos, half_extent, 0.0),
            width: 1.0,
            color,
            stippled: false,
        });
    }
}

/// Closed circle of `segments` chords around `center`, traced in the plane
/// spanned by the orthonormal pair (`u`, `v`).
pub fn push_circle(
    out: &mut Vec<Primitive>,
    center: Vec3,
    radius: f32,
    segments: u32,
    u: Vec3,
    v: Vec3,
    color: Color,
    width: f32,
) {
    let point = |i: u32| {
        let angle = std::f32::consts::TAU * i as f32 / segments as f32;
        center + radius * (u * angle.cos() + v * angle.sin())
    };
    for i in 0..segments {
        out.push(Primitive::Line {
            p0: point(i),
            p1: point(i + 1),
            width,
            color,
            stippled: false,
        });
    }
}

/// Coordinate frame glyph: a dark origin sphere plus three axis arrows.
pub fn push_frame_axes(
    out: &mut Vec<Primitive>,
    origin: Vec3,
    rotation: Quat,
    axis_len: f32,
    axis_colors: [Color; 3],
) {
    out.push(Primitive::Sphere {
        center: origin,
        radius: FRAME_ORIGIN_RADIUS,
        rotation: Quat::IDENTITY,
        surface: Surface::flat(Color::srgba(0.2, 0.2, 0.2, 0.8)),
    });
    for (axis, color) in [Vec3::X, Vec3::Y, Vec3::Z].into_iter().zip(axis_colors) {
        out.push(Primitive::Arrow {
            from: origin,
            to: origin + rotation * (axis * axis_len),
            color,
        });
    }
}

/// Point marker: a GL_POINTS-style dot plus a small sphere for visibility.
pub fn push_point_marker(out: &mut Vec<Primitive>, position: Vec3, color: Color, point_size: f32) {
    out.push(Primitive::Points {
        positions: vec![position],
        size: point_size,
        color,
    });
    out.push(Primitive::Sphere {
        center: position,
        radius: 0.25,
        rotation: Quat::IDENTITY,
        surface: Surface::flat(color),
    });
}

/// Satellite body: center box, two solar panels along body-X, and an
/// antenna line along body-Z. All geometry is emitted in world space by
/// pushing local coordinates through the body pose, mirroring the
/// canonical `to_world`.
pub fn push_satellite_body(out: &mut Vec<Primitive>, pose: &RigidTransform, size: f32) {
    let rotation = pose.rotation();
    let place = |local: Vec3| rotation * local + pose.translation;

    out.push(Primitive::Box {
        center: place(Vec3::ZERO),
        size: Vec3::new(size, size * 0.6, size * 0.8),
        rotation,
        surface: Surface::flat(Color::srgba(0.8, 0.8, 0.9, 1.0)),
    });

    let panel_width = size * 2.0;
    let panel_size = Vec3::new(panel_width, size * 0.8, 0.05);
    let panel_offset = size / 2.0 + panel_width / 2.0;
    for side in [-1.0, 1.0] {
        out.push(Primitive::Box {
            center: place(Vec3::new(side * panel_offset, 0.0, 0.0)),
            size: panel_size,
            rotation,
            surface: Surface::flat(Color::srgba(0.1, 0.1, 0.3, 0.9)),
        });
    }

    out.push(Primitive::Line {
        p0: place(Vec3::new(0.0, 0.0, size * 0.4)),
        p1: place(Vec3::new(0.0, 0.0, size * 1.2)),
        width: 3.0,
        color: Color::srgba(0.9, 0.9, 0.9, 1.0),
        stippled: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_line_count() {
        let mut out = Vec::new();
        push_grid(&mut out, 20.0, 20, Color::WHITE);
        // 21 lines per direction.
        assert_eq!(out.len(), 42);
        for p in &out {
            let Primitive::Line { p0, p1, .. } = p else {
                panic!("grid emitted a non-line primitive");
            };
            assert_eq!(p0.z, 0.0);
            assert_eq!(p1.z, 0.0);
            assert!(p0.x.abs() <= 20.0 + 1e-4 && p0.y.abs() <= 20.0 + 1e-4);
        }
    }

    #[test]
    fn test_circle_stays_on_radius() {
        let mut out = Vec::new();
        push_circle(
            &mut out,
            Vec3::ZERO,
            8.0,
            128,
            Vec3::X,
            Vec3::Y,
            Color::WHITE,
            1.5,
        );
        assert_eq!(out.len(), 128);
        for p in &out {
            let Primitive::Line { p0, p1, .. } = p else {
                panic!("circle emitted a non-line primitive");
            };
            assert!((p0.length() - 8.0).abs() < 1e-3);
            assert!((p1.length() - 8.0).abs() < 1e-3);
            assert_eq!(p0.z, 0.0);
        }
    }

    #[test]
    fn test_frame_axes_shape() {
        let mut out = Vec::new();
        push_frame_axes(
            &mut out,
            Vec3::new(1.0, 2.0, 3.0),
            Quat::IDENTITY,
            5.0,
            [Color::WHITE; 3],
        );
        assert_eq!(out.len(), 4);
        assert!(matches!(out[0], Primitive::Sphere { .. }));
        let tips: Vec<Vec3> = out[1..]
            .iter()
            .map(|p| match p {
                Primitive::Arrow { to, .. } => *to,
                other => panic!("expected arrow, got {other:?}"),
            })
            .collect();
        assert_eq!(tips[0], Vec3::new(6.0, 2.0, 3.0));
        assert_eq!(tips[1], Vec3::new(1.0, 7.0, 3.0));
        assert_eq!(tips[2], Vec3::new(1.0, 2.0, 8.0));
    }

    #[test]
    fn test_satellite_body_matches_to_world() {
        // The baked box centers must agree with the canonical transform.
        let pose = RigidTransform {
            translation: Vec3::new(4.0, -2.0, 1.0),
            yaw_deg: 67.0,
        };
        let mut out = Vec::new();
        push_satellite_body(&mut out, &pose, 0.6);
        assert_eq!(out.len(), 4);
        let Primitive::Box { center, .. } = out[0] else {
            panic!("expected body box");
        };
        assert!((center - pose.to_world(Vec3::ZERO)).length() < 1e-5);
        let Primitive::Box { center, .. } = out[1] else {
            panic!("expected panel box");
        };
        assert!((center - pose.to_world(Vec3::new(-0.9, 0.0, 0.0))).length() < 1e-5);
    }
}
