/// Message shown when a frame has nothing to draw.
pub const NONE_VISIBLE_MESSAGE: &str = "no components visible";

/// A single primitive in pixel space. `brightness` is a grey level and
/// `alpha` the star's opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Rect {
        x: f64,
        y: f64,
        size: f64,
        brightness: u8,
        alpha: f64,
    },
    Circle {
        x: f64,
        y: f64,
        diameter: f64,
        brightness: u8,
        alpha: f64,
    },
}

impl DrawCommand {
    pub fn position(&self) -> (f64, f64) {
        match *self {
            DrawCommand::Rect { x, y, .. } | DrawCommand::Circle { x, y, .. } => (x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    NoneVisible,
}

impl FrameStatus {
    pub fn message(self) -> &'static str {
        match self {
            FrameStatus::NoneVisible => NONE_VISIBLE_MESSAGE,
        }
    }
}

/// Output of one tick: the surface is cleared, then `commands` are drawn in
/// order so later entries land on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    pub visible_count: usize,
    pub status: Option<FrameStatus>,
}
