mod constants;
mod coord;
mod game;

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use bevy_prototype_lyon::prelude::ShapePlugin;
use starfield_shared::config::Settings;
use starfield_shared::projection::Viewport;
use starfield_shared::world::World;

use constants::{DEFAULT_CONFIG_PATH, WINDOW_HEIGHT, WINDOW_WIDTH};
use game::{CorePlugin, HudPlugin, InputPlugin, StarWorld, StarsPlugin};

fn main() {
    let config_path = config_path_from_env();
    let settings = match Settings::load(&config_path) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid starfield configuration: {}", e);
            std::process::exit(1);
        }
    };

    let fps = settings.fps;
    let title = settings.name.clone();
    let level = if settings.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    // Settings must be complete before any star exists.
    let viewport = Viewport::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64);
    let world = match World::initialize(settings, viewport) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("Invalid starfield configuration: {}", e);
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title,
                        resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level,
                    ..default()
                }),
        )
        .add_plugins(ShapePlugin)
        .insert_resource(StarWorld::new(world))
        .add_plugins(CorePlugin { fps })
        .add_plugins(InputPlugin)
        .add_plugins(StarsPlugin)
        .add_plugins(HudPlugin)
        .run();
}

fn config_path_from_env() -> String {
    std::env::var("STARFIELD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
