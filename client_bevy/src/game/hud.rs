use bevy::prelude::*;

use crate::constants::{color_from_hex, Colors};

use super::{StarWorld, UpdateSet};

pub struct HudPlugin;

#[derive(Component)]
struct HudStatusText;

#[derive(Component)]
struct HudPausedText;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, update_hud.in_set(UpdateSet::Visuals));
    }
}

fn spawn_hud(mut commands: Commands, stars: Res<StarWorld>) {
    let small = TextFont::from_font_size(12.0);
    let medium = TextFont::from_font_size(18.0);
    let settings = stars.world.settings();

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(10.0),
            ..default()
        },
        Text::new(settings.description.clone()),
        small.clone(),
        TextColor(color_from_hex(Colors::OVERLAY_TEXT).with_alpha(0.6)),
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(12.0),
            top: Val::Px(10.0),
            ..default()
        },
        Text::new(format!("PAUSED ({})", settings.pause_key)),
        small,
        TextColor(color_from_hex(Colors::PAUSED_TEXT)),
        Visibility::Hidden,
        HudPausedText,
    ));

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(38.0),
            top: Val::Percent(48.0),
            ..default()
        },
        Text::new(""),
        medium,
        TextColor(color_from_hex(Colors::OVERLAY_TEXT)),
        Visibility::Hidden,
        HudStatusText,
    ));
}

fn update_hud(
    stars: Res<StarWorld>,
    mut q_status: Query<(&mut Text, &mut Visibility), (With<HudStatusText>, Without<HudPausedText>)>,
    mut q_paused: Query<&mut Visibility, (With<HudPausedText>, Without<HudStatusText>)>,
) {
    if !stars.is_changed() {
        return;
    }

    if let Ok((mut text, mut visibility)) = q_status.single_mut() {
        match stars.frame.status {
            Some(status) => {
                if text.0 != status.message() {
                    text.0 = status.message().to_string();
                }
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    if let Ok(mut visibility) = q_paused.single_mut() {
        *visibility = if stars.world.is_paused() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
