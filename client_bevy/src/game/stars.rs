use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use starfield_shared::config::StarShape;
use starfield_shared::frame::DrawCommand;
use starfield_shared::projection::ScreenPoint;

use crate::constants::{star_color, STAR_LAYER, STAR_LAYER_STEP};
use crate::coord::px_to_world;

use super::{StarWorld, UpdateSet};

pub struct StarsPlugin;

/// One pooled shape; shows the draw command at `index` of the latest frame.
#[derive(Component)]
struct StarSprite {
    index: usize,
}

impl Plugin for StarsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_star_pool)
            .add_systems(Update, draw_stars.in_set(UpdateSet::Visuals));
    }
}

/// Unit-sized shape, scaled per frame to the star's pixel size.
fn unit_shape(shape: StarShape) -> Shape {
    match shape {
        StarShape::Circle => ShapeBuilder::with(&shapes::Circle {
            radius: 0.5,
            center: Vec2::ZERO,
        })
        .fill(Color::WHITE)
        .build(),
        StarShape::Rect => ShapeBuilder::with(&shapes::Rectangle {
            extents: Vec2::ONE,
            origin: shapes::RectangleOrigin::Center,
            radii: None,
        })
        .fill(Color::WHITE)
        .build(),
    }
}

fn spawn_star_pool(mut commands: Commands, stars: Res<StarWorld>) {
    let shape = stars.world.settings().star_shape;
    let count = stars.world.entities().len();

    for index in 0..count {
        commands.spawn((
            unit_shape(shape),
            Transform::from_xyz(0.0, 0.0, STAR_LAYER).with_scale(Vec3::ZERO),
            Visibility::Hidden,
            StarSprite { index },
        ));
    }
    debug!("spawned {} star shapes", count);
}

fn draw_stars(
    stars: Res<StarWorld>,
    mut q_stars: Query<(&StarSprite, &mut Transform, &mut Visibility, &mut Shape)>,
) {
    if !stars.is_changed() {
        return;
    }

    let viewport = stars.world.viewport();
    let commands = &stars.frame.commands;

    for (sprite, mut tf, mut vis, mut shape) in &mut q_stars {
        let Some(command) = commands.get(sprite.index) else {
            *vis = Visibility::Hidden;
            continue;
        };

        let (pos, size, color) = match *command {
            DrawCommand::Rect {
                x,
                y,
                size,
                brightness,
                alpha,
            } => (ScreenPoint::new(x, y), size, star_color(brightness, alpha)),
            DrawCommand::Circle {
                x,
                y,
                diameter,
                brightness,
                alpha,
            } => (ScreenPoint::new(x, y), diameter, star_color(brightness, alpha)),
        };

        // Later commands sit slightly higher so they draw on top.
        let z = STAR_LAYER + sprite.index as f32 * STAR_LAYER_STEP;
        tf.translation = px_to_world(pos, viewport, z);
        tf.scale = Vec3::new(size as f32, size as f32, 1.0);
        *vis = Visibility::Visible;

        if let Some(fill) = shape.fill.as_mut() {
            fill.color = color;
        }
    }
}
