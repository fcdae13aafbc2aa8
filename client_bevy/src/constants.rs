pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;

/// Settings file used when `STARFIELD_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "assets/game.json";

/// Z layers for Bevy's 2D sort order.
pub const STAR_LAYER: f32 = 1.0;
/// Nudge per star so later stars draw over earlier ones.
pub const STAR_LAYER_STEP: f32 = 1e-5;

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const SPACE_BG: u32 = 0x050510;
    pub const OVERLAY_TEXT: u32 = 0x88ccff;
    pub const PAUSED_TEXT: u32 = 0xffaa00;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}

/// Grey star colour at `brightness` (0-255) faded by `alpha`.
pub fn star_color(brightness: u8, alpha: f64) -> bevy::prelude::Color {
    let level = brightness as f32 / 255.0;
    bevy::prelude::Color::srgba(level, level, level, alpha.clamp(0.0, 1.0) as f32)
}
