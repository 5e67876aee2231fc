use anyhow::bail;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

mod core;
mod render;
mod scene;
mod view;

use crate::core::SimulationPlugin;
use render::PrimitiveRenderPlugin;
use render::textures::equirect_sampler;
use scene::{EarthMoonScenePlugin, SatelliteScenePlugin, TexturedEarthScenePlugin};
use view::ViewPlugin;

/// Which of the three demos to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SceneKind {
    Satellite,
    Earth,
    EarthMoon,
}

impl SceneKind {
    fn parse(arg: &str) -> anyhow::Result<Self> {
        match arg {
            "satellite" => Ok(Self::Satellite),
            "earth" => Ok(Self::Earth),
            "earth-moon" => Ok(Self::EarthMoon),
            other => bail!("unknown scene {other:?}; expected satellite, earth, or earth-moon"),
        }
    }

    fn window(self) -> (&'static str, f32, f32) {
        match self {
            Self::Satellite => ("Coordinate System Transformation - O₁ ↔ O₂", 1200.0, 800.0),
            Self::Earth => ("Draw Earth with Texture", 1200.0, 800.0),
            Self::EarthMoon => ("Earth–Moon Orbit", 1000.0, 700.0),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let scene = match std::env::args().nth(1) {
        Some(arg) => SceneKind::parse(&arg)?,
        None => SceneKind::Satellite,
    };
    let (title, width, height) = scene.window();

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: title.to_string(),
                    resolution: (width as u32, height as u32).into(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(ImagePlugin {
                default_sampler: equirect_sampler(),
            }),
    );

    app.add_plugins((SimulationPlugin, ViewPlugin, PrimitiveRenderPlugin));

    match scene {
        SceneKind::Satellite => app.add_plugins(SatelliteScenePlugin),
        SceneKind::Earth => app.add_plugins(TexturedEarthScenePlugin),
        SceneKind::EarthMoon => app.add_plugins(EarthMoonScenePlugin),
    };

    app.run();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_parsing() {
        assert_eq!(SceneKind::parse("satellite").unwrap(), SceneKind::Satellite);
        assert_eq!(SceneKind::parse("earth").unwrap(), SceneKind::Earth);
        assert_eq!(SceneKind::parse("earth-moon").unwrap(), SceneKind::EarthMoon);
        assert!(SceneKind::parse("mars").is_err());
    }

    #[test]
    fn test_window_sizes() {
        assert_eq!(SceneKind::Satellite.window().1, 1200.0);
        assert_eq!(
            SceneKind::EarthMoon.window(),
            ("Earth–Moon Orbit", 1000.0, 700.0)
        );
    }
}
