/// Bounding box of a rendered row, in view coordinates.
///
/// `y` grows downwards, so `top() <= bottom()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rect from the `top`/`bottom` edges reported by a view layer.
    pub fn from_edges(top: f32, bottom: f32) -> Self {
        Self {
            x: 0.0,
            y: top,
            width: 0.0,
            height: (bottom - top).max(0.0),
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}
