/// Spherical sector point grid
use nalgebra::Point3;

/// Default sphere radius.
pub const DEFAULT_RADIUS: f64 = 100.0;
/// Default number of rings, pole ring included.
pub const DEFAULT_RINGS: usize = 6;
/// Default number of points on each ring.
pub const DEFAULT_POINTS_PER_RING: usize = 6;

/// Shape parameters for the sector grid.
#[derive(Debug, Clone, Copy)]
pub struct SectorSpec {
    /// Sphere radius.
    pub radius: f64,
    /// Number of rings from the pole to the sector edge, inclusive.
    pub rings: usize,
    /// Number of points on each ring.
    pub points_per_ring: usize,
    /// Polar angle of the outermost ring, in radians.
    pub max_polar_angle: f64,
}

impl SectorSpec {
    /// Total number of grid points.
    pub fn point_count(&self) -> usize {
        self.rings * self.points_per_ring
    }
}

impl Default for SectorSpec {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            rings: DEFAULT_RINGS,
            points_per_ring: DEFAULT_POINTS_PER_RING,
            max_polar_angle: std::f64::consts::FRAC_PI_2,
        }
    }
}

/// The generated rest pose: one point per (ring, azimuth) cell in
/// row-major ring order. Immutable after generation; per-frame rotation
/// is computed from it rather than written back into it.
#[derive(Debug, Clone)]
pub struct SectorGrid {
    spec: SectorSpec,
    points: Vec<Point3<f64>>,
}

impl SectorGrid {
    /// Generate the grid for `spec`. Runs once, at scene construction.
    ///
    /// Ring j sits at polar angle `max_polar_angle * j / (rings - 1)`,
    /// so ring 0 is the degenerate pole ring (all of its points coincide
    /// at (0, 0, radius)) and the last ring is the sector edge. Point i
    /// within a ring sits at azimuth `2π * i / points_per_ring`.
    pub fn generate(spec: SectorSpec) -> Self {
        let count = spec.point_count();
        let mut points = Vec::with_capacity(count);

        'rings: for j in 0..spec.rings {
            let theta = spec.max_polar_angle * j as f64 / (spec.rings - 1) as f64;
            for i in 0..spec.points_per_ring {
                // Bound guard; never reached for an exact rings x points grid.
                if points.len() >= count {
                    break 'rings;
                }

                let phi = 2.0 * std::f64::consts::PI * i as f64 / spec.points_per_ring as f64;
                points.push(Point3::new(
                    spec.radius * theta.sin() * phi.cos(),
                    spec.radius * theta.sin() * phi.sin(),
                    spec.radius * theta.cos(),
                ));
            }
        }

        Self { spec, points }
    }

    pub fn spec(&self) -> &SectorSpec {
        &self.spec
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
