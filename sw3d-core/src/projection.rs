/// Perspective-divide projection to screen coordinates
use nalgebra::Point3;

/// Default screen center for the 800x600 window.
pub const DEFAULT_CENTER_X: i32 = 400;
pub const DEFAULT_CENTER_Y: i32 = 300;
/// Default focal depth of the perspective divide.
pub const DEFAULT_FOCAL_DEPTH: f64 = 500.0;

/// A projected point in integer screen coordinates, Y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pinhole-style projector: scales (x, y) by `focal / (focal + z)` and
/// recenters on the screen midpoint with the Y axis flipped.
///
/// There is no clipping and no near-plane guard; for the default scene
/// depth stays within ±radius, far from the focal-depth singularity.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    pub center_x: i32,
    pub center_y: i32,
    pub focal_depth: f64,
}

impl Projector {
    /// Projector centered on a `width` x `height` screen.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            center_x: width as i32 / 2,
            center_y: height as i32 / 2,
            focal_depth: DEFAULT_FOCAL_DEPTH,
        }
    }

    pub fn project(&self, p: &Point3<f64>) -> ScreenPoint {
        let scale = self.focal_depth / (self.focal_depth + p.z);
        ScreenPoint {
            x: self.center_x + (p.x * scale).round() as i32,
            y: self.center_y - (p.y * scale).round() as i32,
        }
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
