//! Render backend
//!
//! Consumes the per-frame primitive stream. Line-type records go straight
//! to gizmos; solid records are mirrored onto a pool of mesh entities;
//! text records onto a pool of UI nodes. The pools are resized to the
//! stream each frame, so a record that disappears from the stream
//! disappears from the screen on the same frame.

use bevy::prelude::*;

pub mod gizmo_layer;
pub mod mesh_pool;
pub mod meshes;
pub mod overlay;
pub mod textures;

pub use gizmo_layer::{dash_segments, draw_gizmo_primitives};
pub use mesh_pool::{MeshPool, sync_mesh_primitives};
pub use meshes::{PoolMeshes, arrow_cone, setup_pool_meshes, uv_sphere};
pub use overlay::{OverlayPool, sync_overlay_text};
pub use textures::{TextureSlots, resolve_textures};

use crate::core::FrameSet;
use crate::scene::FramePrimitives;

pub struct PrimitiveRenderPlugin;

impl Plugin for PrimitiveRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FramePrimitives>()
            .init_resource::<MeshPool>()
            .init_resource::<OverlayPool>()
            .init_resource::<TextureSlots>()
            .add_systems(Startup, (setup_pool_meshes, gizmo_layer::setup_gizmo_config))
            .add_systems(
                Update,
                (
                    resolve_textures,
                    draw_gizmo_primitives,
                    sync_mesh_primitives,
                    sync_overlay_text,
                )
                    .chain()
                    .in_set(FrameSet::Draw),
            );
    }
}
