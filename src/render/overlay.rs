//! UI text pool mirroring the overlay records

use bevy::prelude::*;

use crate::scene::{FramePrimitives, Primitive};

const OVERLAY_FONT_SIZE: f32 = 16.0;

/// Text entities reused across frames, one per overlay record.
#[derive(Resource, Default)]
pub struct OverlayPool(Vec<Entity>);

pub fn sync_overlay_text(
    mut commands: Commands,
    prims: Res<FramePrimitives>,
    mut pool: ResMut<OverlayPool>,
    mut nodes: Query<(&mut Text, &mut Node, &mut TextColor)>,
) {
    let mut used = 0;
    for prim in prims.iter() {
        let Primitive::Text {
            left,
            top,
            text,
            color,
        } = prim
        else {
            continue;
        };

        if let Some(&entity) = pool.0.get(used) {
            if let Ok((mut node_text, mut node, mut node_color)) = nodes.get_mut(entity) {
                if node_text.0 != *text {
                    node_text.0.clone_from(text);
                }
                node.left = Val::Px(*left);
                node.top = Val::Px(*top);
                node_color.0 = *color;
            }
        } else {
            let entity = commands
                .spawn((
                    Text::new(text.clone()),
                    TextFont {
                        font_size: OVERLAY_FONT_SIZE,
                        ..default()
                    },
                    TextColor(*color),
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(*left),
                        top: Val::Px(*top),
                        ..default()
                    },
                ))
                .id();
            pool.0.push(entity);
        }
        used += 1;
    }

    while pool.0.len() > used {
        let entity = pool.0.pop().expect("len checked above");
        commands.entity(entity).despawn();
    }
}
