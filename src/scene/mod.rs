//! Scene building
//!
//! Each scene rebuilds a flat, ordered stream of draw records every frame
//! from the animation state. The records are world-space and carry no
//! matrix-stack state: body-frame geometry is baked through the canonical
//! `RigidTransform` when it is emitted. The render module consumes the
//! stream in order; nothing in here touches the GPU.

use bevy::prelude::*;

pub mod build;
pub mod earth;
pub mod earth_moon;
pub mod satellite;

pub use earth::TexturedEarthScenePlugin;
pub use earth_moon::EarthMoonScenePlugin;
pub use satellite::SatelliteScenePlugin;

/// How a solid primitive is shaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub color: Color,
    pub unlit: bool,
    pub texture: Option<TextureSlot>,
}

impl Surface {
    /// Flat color, no lighting (the satellite scene draws everything this way).
    pub fn flat(color: Color) -> Self {
        Self {
            color,
            unlit: true,
            texture: None,
        }
    }

    pub fn lit(color: Color) -> Self {
        Self {
            color,
            unlit: false,
            texture: None,
        }
    }

    /// Lit white surface with an equirectangular texture bound to `slot`.
    pub fn textured(slot: TextureSlot) -> Self {
        Self {
            color: Color::WHITE,
            unlit: false,
            texture: Some(slot),
        }
    }
}

/// Texture wells the renderer resolves to loaded images or procedural
/// fallbacks. Referenced by handle so the stream stays data-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Earth,
    Moon,
}

/// One draw record. The stream is rebuilt from scratch every frame and
/// consumed in painter's order; the depth test resolves overlap.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Sphere {
        center: Vec3,
        radius: f32,
        rotation: Quat,
        surface: Surface,
    },
    Box {
        center: Vec3,
        size: Vec3,
        rotation: Quat,
        surface: Surface,
    },
    Line {
        p0: Vec3,
        p1: Vec3,
        width: f32,
        color: Color,
        stippled: bool,
    },
    Points {
        positions: Vec<Vec3>,
        size: f32,
        color: Color,
    },
    /// Shaft plus a +Z-authored arrowhead cone at the tip.
    Arrow {
        from: Vec3,
        to: Vec3,
        color: Color,
    },
    /// 2D overlay text; `left`/`top` are logical pixels from the top-left.
    Text {
        left: f32,
        top: f32,
        text: String,
        color: Color,
    },
}

/// The per-frame primitive stream.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct FramePrimitives(pub Vec<Primitive>);

/// Toggles for the optional parts of the stream.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DisplayFlags {
    pub show_grid: bool,
    pub show_trajectory: bool,
    pub show_axes: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_trajectory: true,
            show_axes: true,
        }
    }
}

/// Local endpoint of the dashed line tying the two test-point renderings
/// together.
///
/// `Translation` anchors at T + P₂ (the unrotated local point), so the
/// dashes span exactly the displacement the yaw contributes; that gap is
/// the point of the visualization. `Rotated` anchors at R·P₂ + T, which
/// collapses the segment to zero length whenever the two renderings agree.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrajectoryAnchor {
    #[default]
    Translation,
    Rotated,
}
