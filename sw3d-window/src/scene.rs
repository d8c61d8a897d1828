/// The rotating sector scene: rest pose, spin state, and the draw pass
use nalgebra::Point3;
use sw3d_core::{transform, Projector, ScreenPoint, SectorGrid, SectorSpec, SpinState, Transform, Wireframe};

use crate::canvas::{Canvas, Color};

/// Radius of the filled marker drawn at each grid point, in pixels.
pub const DEFAULT_MARKER_RADIUS: i32 = 2;

/// Every named constant of the scene in one place.
#[derive(Debug, Clone, Copy)]
pub struct SceneConfig {
    pub sector: SectorSpec,
    /// Spin increment per tick, radians.
    pub spin_step: f64,
    pub marker_radius: i32,
    pub background: Color,
    pub ring_color: Color,
    pub meridian_color: Color,
    pub marker_color: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sector: SectorSpec::default(),
            spin_step: transform::DEFAULT_SPIN_STEP,
            marker_radius: DEFAULT_MARKER_RADIUS,
            background: Color::BLACK,
            ring_color: Color::GREEN,
            meridian_color: Color::CYAN,
            marker_color: Color::YELLOW,
        }
    }
}

/// Scene state. The rest pose is generated once and never mutated;
/// each repaint rotates it by the current spin angle, projects the
/// result into the parallel screen buffer, and draws the wireframe.
pub struct SectorScene {
    config: SceneConfig,
    grid: SectorGrid,
    wireframe: Wireframe,
    projector: Projector,
    spin: SpinState,
    screen: Vec<ScreenPoint>,
}

impl SectorScene {
    pub fn new(config: SceneConfig, screen_width: u32, screen_height: u32) -> Self {
        let grid = SectorGrid::generate(config.sector);
        let wireframe = Wireframe::from_spec(&config.sector);
        let screen = vec![ScreenPoint::default(); grid.len()];
        Self {
            config,
            grid,
            wireframe,
            projector: Projector::new(screen_width, screen_height),
            spin: SpinState::zero(),
            screen,
        }
    }

    pub fn spin_angle(&self) -> f64 {
        self.spin.angle()
    }

    /// Advance the spin by one configured step. Called once per tick.
    pub fn tick(&mut self) {
        self.spin.advance(self.config.spin_step);
    }

    /// Rasterize the current frame into `canvas`.
    pub fn render(&mut self, canvas: &mut Canvas) {
        canvas.clear(self.config.background);

        let rotation = Transform::spin(self.spin.angle());
        for (slot, rest) in self.screen.iter_mut().zip(self.grid.points()) {
            let rotated: Point3<f64> = rotation.transform_point(rest);
            *slot = self.projector.project(&rotated);
        }

        // Ring pass: each point's marker, then the edge closing the loop.
        for (a, b) in self.wireframe.ring_edges() {
            canvas.fill_circle(self.screen[a], self.config.marker_radius, self.config.marker_color);
            canvas.draw_line(self.screen[a], self.screen[b], self.config.ring_color);
        }

        for (a, b) in self.wireframe.meridian_edges() {
            canvas.draw_line(self.screen[a], self.screen[b], self.config.meridian_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_advances_one_step() {
        let mut scene = SectorScene::new(SceneConfig::default(), 800, 600);
        assert_eq!(scene.spin_angle(), 0.0);
        scene.tick();
        assert!((scene.spin_angle() - transform::DEFAULT_SPIN_STEP).abs() < 1e-12);
    }

    #[test]
    fn test_render_marks_the_canvas() {
        let mut scene = SectorScene::new(SceneConfig::default(), 800, 600);
        let mut canvas = Canvas::new(800, 600);
        scene.render(&mut canvas);

        let background = SceneConfig::default().background.packed();
        let drawn = canvas
            .bytes()
            .chunks_exact(4)
            .map(|px| u32::from_le_bytes([px[0], px[1], px[2], px[3]]))
            .filter(|&px| px != background)
            .count();
        assert!(drawn > 0, "render left the canvas blank");
    }

    #[test]
    fn test_render_stays_near_screen_center() {
        // All geometry fits well inside the default window: radius 100
        // around (400, 300) scaled by at most 500/400.
        let mut scene = SectorScene::new(SceneConfig::default(), 800, 600);
        let mut canvas = Canvas::new(800, 600);
        scene.render(&mut canvas);

        let background = SceneConfig::default().background.packed();
        for (i, px) in canvas.bytes().chunks_exact(4).enumerate() {
            let value = u32::from_le_bytes([px[0], px[1], px[2], px[3]]);
            if value != background {
                let x = (i % 800) as i32;
                let y = (i / 800) as i32;
                assert!((x - 400).abs() <= 160, "stray pixel at ({}, {})", x, y);
                assert!((y - 300).abs() <= 160, "stray pixel at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_render_is_deterministic_for_fixed_angle() {
        let mut first = SectorScene::new(SceneConfig::default(), 800, 600);
        let mut second = SectorScene::new(SceneConfig::default(), 800, 600);
        first.tick();
        second.tick();

        let mut canvas_a = Canvas::new(800, 600);
        let mut canvas_b = Canvas::new(800, 600);
        first.render(&mut canvas_a);
        second.render(&mut canvas_b);
        assert_eq!(canvas_a.bytes(), canvas_b.bytes());
    }
}
