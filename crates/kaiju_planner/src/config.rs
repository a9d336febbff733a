//! Hardware constants as configuration, not code. The beta-arm polyline,
//! its per-vertex radii, and the grid-wide tick/collision/RNG parameters
//! are all just data; a caller who needs a different positioner generation
//! can override the `Default` impls below without touching the planner.

use kaiju_geometry::Point3;
use min_len_vec::TwoOrMore;
use serde::{Deserialize, Serialize};

/// The two-link arm's fixed geometry: lengths, the beta-frame polyline
/// template (collision shape) and its per-vertex radii, and the fiber
/// offset in the beta frame.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArmTemplateConfig {
    pub alpha_arm_len: f64,
    pub beta_arm_len: f64,
    /// Ordered vertices of the beta-arm polyline in the beta frame
    /// (origin is where the beta axis meets the arm). At least two
    /// vertices, since fewer admit no collision chord.
    pub beta_template: TwoOrMore<Point3>,
    /// Per-vertex collision radii, parallel to `beta_template`. Stored as
    /// part of the hardware description; the simplified two-point
    /// collision chord this workspace implements tests only the
    /// endpoints of `beta_template` against a scalar `collision_buffer`,
    /// so these radii are not consumed by `RobotGrid`'s collider queries.
    pub beta_radii: TwoOrMore<f64>,
    /// Fiber position in the beta frame.
    pub fiber_neutral: Point3,
}

impl ArmTemplateConfig {
    #[must_use]
    pub fn min_reach(&self) -> f64 {
        self.beta_arm_len - self.alpha_arm_len
    }

    #[must_use]
    pub fn max_reach(&self) -> f64 {
        self.beta_arm_len + self.alpha_arm_len
    }

    /// Translation from the beta origin to the alpha origin, in the alpha
    /// frame: just the alpha arm laid out along x.
    #[must_use]
    pub fn alpha_trans(&self) -> Point3 {
        Point3::new(self.alpha_arm_len, 0.0, 0.0)
    }
}

impl Default for ArmTemplateConfig {
    fn default() -> Self {
        let beta_template = TwoOrMore::try_from(vec![
            Point3::new(0.0, 0.0, 7.60),
            Point3::new(6.12, 0.0, 13.85),
            Point3::new(9.54, 0.0, 21.90),
            Point3::new(9.54, 0.0, 30.0),
            Point3::new(13.3, 0.0, 30.0),
        ])
        .expect("five vertices is well above the two-vertex minimum");

        let beta_radii = TwoOrMore::try_from(vec![1.5, 1.5, 1.5, 1.5, 1.5])
            .expect("five radii is well above the two-vertex minimum");

        Self {
            alpha_arm_len: 7.4,
            beta_arm_len: 15.0,
            beta_template,
            beta_radii,
            fiber_neutral: Point3::new(15.0, 0.0, 0.0),
        }
    }
}

/// Tick/collision/RNG parameters of a `RobotGrid` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Degrees advanced per planner tick.
    pub ang_step: f64,
    /// Half-width added to each vertex radius when testing collisions.
    pub collision_buffer: f64,
    /// Ramer-Douglas-Peucker tolerance used by `simplify_paths`.
    pub epsilon: f64,
    pub seed: u64,
    /// Distance between neighboring positioner centers in the grid plane.
    pub pitch: f64,
}

impl GridConfig {
    #[must_use]
    pub fn max_path_steps(&self) -> usize {
        (1500.0 / self.ang_step).ceil() as usize
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            ang_step: 1.0,
            collision_buffer: 1.5,
            epsilon: 5.0,
            seed: 0,
            pitch: 22.4,
        }
    }
}
