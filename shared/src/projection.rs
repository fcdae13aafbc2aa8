use crate::vec3::Vec3;

/// Depths closer to zero than this are treated as degenerate and not drawn.
pub const Z_EPSILON: f64 = 1e-6;

/// Pixel coordinates on the drawing surface (origin top-left, Y-down).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Re-fit to a new surface size. Empty or minimised surfaces are ignored
    /// so the previous size stays usable. Returns whether the size changed.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// World to screen transform: rotation about the vertical axis, perspective
/// divide, then the [-1, 1] square stretched over the viewport with Y flipped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub angle: f64,
    pub viewport: Viewport,
}

impl Projection {
    pub fn new(angle: f64, viewport: Viewport) -> Self {
        Self { angle, viewport }
    }

    /// Normalized device coordinates of `pos`, or `None` when its rotated
    /// depth is too close to zero to divide by.
    pub fn perspective(&self, pos: Vec3) -> Option<(f64, f64)> {
        let view = pos.rotate_y(self.angle);
        if !view.z.is_finite() || view.z.abs() < Z_EPSILON {
            return None;
        }
        Some((view.x / view.z, view.y / view.z))
    }

    pub fn to_screen(&self, pos: Vec3) -> Option<ScreenPoint> {
        let (nx, ny) = self.perspective(pos)?;
        Some(self.normalized_to_screen(nx, ny))
    }

    pub fn normalized_to_screen(&self, nx: f64, ny: f64) -> ScreenPoint {
        ScreenPoint {
            x: (nx + 1.0) * 0.5 * self.viewport.width,
            y: (1.0 - ny) * 0.5 * self.viewport.height,
        }
    }

    pub fn screen_to_normalized(&self, screen: ScreenPoint) -> (f64, f64) {
        (
            screen.x / self.viewport.width * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.height * 2.0,
        )
    }

    /// Inverse of [`Projection::to_screen`] for a known view depth `z`.
    pub fn unproject(&self, screen: ScreenPoint, z: f64) -> Vec3 {
        let (nx, ny) = self.screen_to_normalized(screen);
        Vec3::new(nx * z, ny * z, z).rotate_y(-self.angle)
    }
}
