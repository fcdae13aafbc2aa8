use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use starfield_shared::frame::Frame;
use starfield_shared::projection::Viewport;
use starfield_shared::world::World;

use crate::constants::{color_from_hex, Colors};

use super::input::KeyQueue;

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    Visuals,
}

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum FixedSet {
    Input,
    Simulate,
}

pub struct CorePlugin {
    /// Tick rate of the world, from the settings file.
    pub fps: f64,
}

/// The simulation plus the most recent frame it produced.
#[derive(Resource)]
pub struct StarWorld {
    pub(crate) world: World,
    pub(crate) frame: Frame,
}

impl StarWorld {
    pub fn new(world: World) -> Self {
        Self {
            world,
            frame: Frame::default(),
        }
    }
}

#[derive(Component)]
struct MainCamera;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyQueue>()
            .insert_resource(ClearColor(color_from_hex(Colors::SPACE_BG)))
            .insert_resource(Time::<Fixed>::from_hz(self.fps))
            .configure_sets(Update, (UpdateSet::Input, UpdateSet::Visuals).chain())
            .configure_sets(FixedUpdate, (FixedSet::Input, FixedSet::Simulate).chain())
            .add_systems(Startup, (setup_camera, log_world_ready))
            .add_systems(
                FixedUpdate,
                fit_viewport_to_window.in_set(FixedSet::Input),
            )
            .add_systems(FixedUpdate, tick_world.in_set(FixedSet::Simulate));
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Msaa::Sample4, MainCamera));
}

fn log_world_ready(stars: Res<StarWorld>) {
    let settings = stars.world.settings();
    info!(
        "{} initialized: {} stars at {} fps",
        settings.name,
        stars.world.entities().len(),
        settings.fps
    );
    debug!("settings: {:?}", settings);
}

/// Keep the world's output size matched to the window before each tick.
fn fit_viewport_to_window(
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut stars: ResMut<StarWorld>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };

    let width = window.width() as f64;
    let height = window.height() as f64;
    if stars.world.viewport() != Viewport::new(width, height) {
        stars.world.resize(width, height);
    }
}

fn tick_world(mut stars: ResMut<StarWorld>, time: Res<Time<Fixed>>) {
    let StarWorld { world, frame } = &mut *stars;
    *frame = world.tick(time.delta());
}
