//! Immediate line work: grid, circles, arrow shafts, markers

use bevy::prelude::*;

use crate::scene::{FramePrimitives, Primitive};

/// World-space dash length for stippled lines.
const DASH_LEN: f32 = 0.25;
/// Half-extent of a point marker cross per unit of point size.
const POINT_CROSS_SCALE: f32 = 0.02;

pub fn setup_gizmo_config(mut store: ResMut<GizmoConfigStore>) {
    let (config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = 1.5;
}

/// Draw every line-type record in stream order. Arrow shafts are drawn
/// here; their head cones are solid geometry owned by the mesh pool.
pub fn draw_gizmo_primitives(prims: Res<FramePrimitives>, mut gizmos: Gizmos) {
    for prim in prims.iter() {
        match prim {
            Primitive::Line {
                p0,
                p1,
                color,
                stippled,
                ..
            } => {
                if *stippled {
                    for (a, b) in dash_segments(*p0, *p1, DASH_LEN) {
                        gizmos.line(a, b, *color);
                    }
                } else {
                    gizmos.line(*p0, *p1, *color);
                }
            }
            Primitive::Points {
                positions,
                size,
                color,
            } => {
                let half = size * POINT_CROSS_SCALE;
                for p in positions {
                    gizmos.line(*p - Vec3::X * half, *p + Vec3::X * half, *color);
                    gizmos.line(*p - Vec3::Y * half, *p + Vec3::Y * half, *color);
                    gizmos.line(*p - Vec3::Z * half, *p + Vec3::Z * half, *color);
                }
            }
            Primitive::Arrow { from, to, color } => {
                gizmos.line(*from, *to, *color);
            }
            _ => {}
        }
    }
}

/// Split `p0..p1` into dashes of `dash` length with equal gaps, always
/// keeping the first dash anchored at `p0`.
pub fn dash_segments(p0: Vec3, p1: Vec3, dash: f32) -> Vec<(Vec3, Vec3)> {
    let delta = p1 - p0;
    let len = delta.length();
    if len <= f32::EPSILON || dash <= 0.0 {
        return Vec::new();
    }
    let dir = delta / len;
    let mut segments = Vec::new();
    let mut start = 0.0;
    while start < len {
        let end = (start + dash).min(len);
        segments.push((p0 + dir * start, p0 + dir * end));
        start += dash * 2.0;
    }
    segments
}
