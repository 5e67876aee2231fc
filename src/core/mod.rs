//! Simulation core
//!
//! Owns the frame clock, the orbital/attitude animation state, and the
//! rigid transform that relates the body frame O₂ to the inertial frame O₁.
//! Everything here is pure state plus total functions; rendering and input
//! live in their own modules and only read from this one.

use bevy::prelude::*;

pub mod animation;
pub mod clock;
pub mod frame;

pub use animation::{AnimationState, OrbitParams, advance_animation};
pub use clock::SimClock;
pub use frame::{OrbitPlane, RigidTransform, arrow_rotation};

/// Per-frame phases, chained in order: input is drained first, then the
/// clock ticks and the animation advances, then scenes rebuild their
/// primitive stream, and finally the render backends consume it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Animate,
    Build,
    Draw,
}

/// Plugin for the clock and animation state
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimClock>()
            .init_resource::<AnimationState>()
            .init_resource::<OrbitParams>()
            .configure_sets(
                Update,
                (
                    FrameSet::Input,
                    FrameSet::Animate,
                    FrameSet::Build,
                    FrameSet::Draw,
                )
                    .chain(),
            )
            .add_systems(Update, advance_animation.in_set(FrameSet::Animate));
    }
}
