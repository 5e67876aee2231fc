//! Mesh generation for the pooled solids

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

/// Shared meshes the pool instances scale per record.
#[derive(Resource)]
pub struct PoolMeshes {
    /// Unit sphere, 20×20, for decorative spheres.
    pub sphere_plain: Handle<Mesh>,
    /// Unit sphere, 64×64, for equirectangular-textured bodies.
    pub sphere_textured: Handle<Mesh>,
    pub cube: Handle<Mesh>,
    /// Arrowhead cone, apex on +Z, authored at its final size.
    pub cone: Handle<Mesh>,
}

pub fn setup_pool_meshes(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    commands.insert_resource(PoolMeshes {
        sphere_plain: meshes.add(uv_sphere(20, 20)),
        sphere_textured: meshes.add(uv_sphere(64, 64)),
        cube: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        cone: meshes.add(arrow_cone(0.15, 0.4, 12)),
    });
}

/// Unit-radius latitude × longitude sphere with poles on ±Y, smooth
/// normals, and UVs mapping longitude to u and latitude to v so a 2:1
/// equirectangular image wraps once around.
///
/// The seam column is duplicated (slices + 1 vertices per ring), which
/// keeps u monotonic across every quad.
pub fn uv_sphere(stacks: u32, slices: u32) -> Mesh {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for stack in 0..=stacks {
        let theta = std::f32::consts::PI * stack as f32 / stacks as f32;
        let (sin_t, cos_t) = theta.sin_cos();
        for slice in 0..=slices {
            let phi = std::f32::consts::TAU * slice as f32 / slices as f32;
            let (sin_p, cos_p) = phi.sin_cos();
            let point = Vec3::new(sin_t * cos_p, cos_t, sin_t * sin_p);
            positions.push(point);
            normals.push(point);
            uvs.push([
                slice as f32 / slices as f32,
                stack as f32 / stacks as f32,
            ]);
        }
    }

    let ring = slices + 1;
    for stack in 0..stacks {
        for slice in 0..slices {
            let i0 = stack * ring + slice;
            let i1 = i0 + ring;
            indices.extend_from_slice(&[i0, i0 + 1, i1]);
            indices.extend_from_slice(&[i1, i0 + 1, i1 + 1]);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_indices(Indices::U32(indices));
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh
}

/// Cone with its base on z = 0 and apex at (0, 0, height), matching the
/// +Z convention `arrow_rotation` orients.
pub fn arrow_cone(radius: f32, height: f32, slices: u32) -> Mesh {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    let base = |i: u32| {
        let angle = std::f32::consts::TAU * i as f32 / slices as f32;
        Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0)
    };

    // Side fan: one apex vertex per segment so the flat shading stays even.
    for i in 0..slices {
        let b0 = base(i);
        let b1 = base(i + 1);
        let apex = Vec3::new(0.0, 0.0, height);
        let start = positions.len() as u32;
        for p in [apex, b0, b1] {
            positions.push(p);
            let side = Vec3::new(p.x, p.y, 0.0).normalize_or_zero();
            normals.push((side * height + Vec3::Z * radius).normalize());
            uvs.push([0.5, 0.5]);
        }
        indices.extend_from_slice(&[start, start + 1, start + 2]);
    }

    // Base disk, facing −Z.
    let center = positions.len() as u32;
    positions.push(Vec3::ZERO);
    normals.push(Vec3::NEG_Z);
    uvs.push([0.5, 0.5]);
    for i in 0..=slices {
        positions.push(base(i));
        normals.push(Vec3::NEG_Z);
        uvs.push([0.5, 0.5]);
    }
    for i in 0..slices {
        indices.extend_from_slice(&[center, center + 2 + i, center + 1 + i]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_indices(Indices::U32(indices));
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    fn mesh_positions(mesh: &Mesh) -> Vec<Vec3> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION).unwrap() {
            VertexAttributeValues::Float32x3(values) => {
                values.iter().map(|v| Vec3::from_array(*v)).collect()
            }
            other => panic!("unexpected position format: {other:?}"),
        }
    }

    #[test]
    fn test_uv_sphere_counts() {
        let mesh = uv_sphere(20, 20);
        let positions = mesh_positions(&mesh);
        assert_eq!(positions.len(), 21 * 21);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len(), 20 * 20 * 6);
    }

    #[test]
    fn test_uv_sphere_unit_radius_and_poles() {
        let positions = mesh_positions(&uv_sphere(16, 16));
        for p in &positions {
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
        assert!((positions[0] - Vec3::Y).length() < 1e-5);
        assert!((*positions.last().unwrap() - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn test_uv_sphere_uv_range() {
        let mesh = uv_sphere(8, 8);
        let VertexAttributeValues::Float32x2(uvs) =
            mesh.attribute(Mesh::ATTRIBUTE_UV_0).unwrap()
        else {
            panic!("expected f32x2 uvs");
        };
        for [u, v] in uvs {
            assert!((0.0..=1.0).contains(u));
            assert!((0.0..=1.0).contains(v));
        }
    }

    #[test]
    fn test_cone_apex_and_base() {
        let positions = mesh_positions(&arrow_cone(0.15, 0.4, 12));
        assert!(positions.iter().any(|p| (*p - Vec3::new(0.0, 0.0, 0.4)).length() < 1e-6));
        for p in &positions {
            assert!((0.0..=0.4 + 1e-6).contains(&p.z));
            assert!(p.xy().length() <= 0.15 + 1e-5);
        }
    }
}
