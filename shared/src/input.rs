/// Depth velocity set while the speed-up or slow-down key is held.
pub const DEPTH_SPEED: f64 = 0.05;

/// Factor applied to the depth velocity when a depth key is released.
pub const RELEASE_DAMPING: f64 = 0.1;

/// Rotation applied per press of a left/right key (radians).
pub const ANGLE_STEP: f64 = 0.05;

/// Host-independent key identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable key, always lowercase.
    Char(char),
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
}

impl Key {
    /// Parse a key name as written in the settings file: a single character
    /// (case-insensitive) or a DOM-style name such as `ArrowUp`.
    pub fn parse(name: &str) -> Option<Key> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(if c == ' ' {
                Key::Space
            } else {
                Key::Char(c.to_ascii_lowercase())
            });
        }

        match name {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "Space" | "Spacebar" => Some(Key::Space),
            "Escape" | "Esc" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Process-wide motion shared by every star: the depth velocity and the
/// view rotation. Owned by the world and passed into entity updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthControl {
    depth_velocity: f64,
    angle: f64,
}

impl DepthControl {
    pub fn new(depth_velocity: f64) -> Self {
        Self {
            depth_velocity,
            angle: 0.0,
        }
    }

    pub fn depth_velocity(&self) -> f64 {
        self.depth_velocity
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Returns true when the key changed the shared motion.
    pub fn key_pressed(&mut self, key: Key) -> bool {
        match key {
            Key::ArrowUp => self.depth_velocity = DEPTH_SPEED,
            Key::ArrowDown => self.depth_velocity = -DEPTH_SPEED,
            Key::ArrowLeft => self.angle -= ANGLE_STEP,
            Key::ArrowRight => self.angle += ANGLE_STEP,
            _ => return false,
        }
        true
    }

    /// Releasing a depth key damps the velocity instead of stopping dead.
    pub fn key_released(&mut self, key: Key) -> bool {
        match key {
            Key::ArrowUp | Key::ArrowDown => {
                self.depth_velocity *= RELEASE_DAMPING;
                true
            }
            _ => false,
        }
    }
}
