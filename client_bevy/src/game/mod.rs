mod core;
mod hud;
mod input;
mod stars;

pub use self::core::{CorePlugin, StarWorld};
pub(crate) use self::core::{FixedSet, UpdateSet};
pub use hud::HudPlugin;
pub use input::InputPlugin;
pub use stars::StarsPlugin;
