use bevy::prelude::Vec3;
use starfield_shared::projection::{ScreenPoint, Viewport};

/// Convert surface pixel coordinates (origin top-left, Y-down) to Bevy world
/// coordinates (origin centre, Y-up) for a camera at scale 1.
pub fn px_to_world(px: ScreenPoint, viewport: Viewport, z: f32) -> Vec3 {
    let wx = px.x - viewport.width * 0.5;
    let wy = viewport.height * 0.5 - px.y;
    Vec3::new(wx as f32, wy as f32, z)
}
