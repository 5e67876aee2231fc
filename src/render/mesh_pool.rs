//! Pooled mesh entities mirroring the solid primitives

use bevy::asset::AssetId;
use bevy::prelude::*;

use crate::core::arrow_rotation;
use crate::render::meshes::PoolMeshes;
use crate::render::textures::TextureSlots;
use crate::scene::{FramePrimitives, Primitive, Surface};

/// What one pooled entity should look like this frame.
struct Instance {
    mesh: Handle<Mesh>,
    transform: Transform,
    surface: Surface,
}

struct PoolEntry {
    entity: Entity,
    material: Handle<StandardMaterial>,
    /// Last surface + texture handle written into the material, to skip
    /// re-uploading an unchanged material every frame.
    applied: Option<(Surface, Option<AssetId<Image>>)>,
}

#[derive(Default)]
struct Pool {
    entries: Vec<PoolEntry>,
}

/// Entity pools for spheres, boxes, and arrowhead cones. Sized to the
/// stream each frame; surplus entities are despawned.
#[derive(Resource, Default)]
pub struct MeshPool {
    spheres: Pool,
    boxes: Pool,
    cones: Pool,
}

pub fn sync_mesh_primitives(
    mut commands: Commands,
    prims: Res<FramePrimitives>,
    meshes: Res<PoolMeshes>,
    textures: Res<TextureSlots>,
    mut pool: ResMut<MeshPool>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut entities: Query<(&mut Transform, &mut Mesh3d)>,
) {
    let mut spheres: Vec<Instance> = Vec::new();
    let mut boxes: Vec<Instance> = Vec::new();
    let mut cones: Vec<Instance> = Vec::new();

    for prim in prims.iter() {
        match prim {
            Primitive::Sphere {
                center,
                radius,
                rotation,
                surface,
            } => {
                let mesh = if surface.texture.is_some() {
                    meshes.sphere_textured.clone()
                } else {
                    meshes.sphere_plain.clone()
                };
                spheres.push(Instance {
                    mesh,
                    transform: Transform {
                        translation: *center,
                        rotation: *rotation,
                        scale: Vec3::splat(*radius),
                    },
                    surface: *surface,
                });
            }
            Primitive::Box {
                center,
                size,
                rotation,
                surface,
            } => boxes.push(Instance {
                mesh: meshes.cube.clone(),
                transform: Transform {
                    translation: *center,
                    rotation: *rotation,
                    scale: *size,
                },
                surface: *surface,
            }),
            Primitive::Arrow { from, to, color } => {
                let dir = *to - *from;
                // A zero-length arrow has no head to orient.
                if dir.length_squared() > f32::EPSILON {
                    cones.push(Instance {
                        mesh: meshes.cone.clone(),
                        transform: Transform {
                            translation: *to,
                            rotation: arrow_rotation(dir),
                            scale: Vec3::ONE,
                        },
                        surface: Surface::flat(*color),
                    });
                }
            }
            _ => {}
        }
    }

    let pool = pool.into_inner();
    for (pool, desired) in [
        (&mut pool.spheres, spheres),
        (&mut pool.boxes, boxes),
        (&mut pool.cones, cones),
    ] {
        sync_pool(
            &mut commands,
            pool,
            desired,
            &textures,
            &mut materials,
            &mut entities,
        );
    }
}

fn sync_pool(
    commands: &mut Commands,
    pool: &mut Pool,
    desired: Vec<Instance>,
    textures: &TextureSlots,
    materials: &mut Assets<StandardMaterial>,
    entities: &mut Query<(&mut Transform, &mut Mesh3d)>,
) {
    for (i, instance) in desired.iter().enumerate() {
        let texture = instance
            .surface
            .texture
            .and_then(|slot| textures.handle(slot));
        let applied = Some((instance.surface, texture.as_ref().map(Handle::id)));

        if let Some(entry) = pool.entries.get_mut(i) {
            if let Ok((mut transform, mut mesh)) = entities.get_mut(entry.entity) {
                *transform = instance.transform;
                if mesh.0 != instance.mesh {
                    mesh.0 = instance.mesh.clone();
                }
            }
            if entry.applied != applied {
                if let Some(material) = materials.get_mut(&entry.material) {
                    *material = material_for(&instance.surface, texture);
                }
                entry.applied = applied;
            }
        } else {
            let material = materials.add(material_for(&instance.surface, texture));
            let entity = commands
                .spawn((
                    Mesh3d(instance.mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    instance.transform,
                ))
                .id();
            pool.entries.push(PoolEntry {
                entity,
                material,
                applied,
            });
        }
    }

    while pool.entries.len() > desired.len() {
        let entry = pool.entries.pop().expect("len checked above");
        commands.entity(entry.entity).despawn();
    }
}

fn material_for(surface: &Surface, texture: Option<Handle<Image>>) -> StandardMaterial {
    let translucent = surface.color.alpha() < 1.0;
    StandardMaterial {
        base_color: surface.color,
        base_color_texture: texture,
        unlit: surface.unlit,
        alpha_mode: if translucent {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        },
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translucent_surface_blends() {
        let material = material_for(&Surface::flat(Color::srgba(0.8, 0.0, 0.8, 0.5)), None);
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
        assert!(material.unlit);
    }

    #[test]
    fn test_opaque_lit_surface() {
        let material = material_for(&Surface::lit(Color::srgb(1.0, 1.0, 1.0)), None);
        assert_eq!(material.alpha_mode, AlphaMode::Opaque);
        assert!(!material.unlit);
        assert!(material.base_color_texture.is_none());
    }
}
