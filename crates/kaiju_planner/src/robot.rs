//! Per-positioner state: pose, neighbor lists, and the dense/sparse/
//! smoothed path buffers the planner and post-processing stages fill in.

use std::rc::Rc;

use kaiju_geometry::{interpolate, rdp, sample_annulus, Point3};

use crate::config::ArmTemplateConfig;
use crate::errors::ReachError;
use crate::kinematics::{alpha_beta_from_xy, forward_kinematics};

/// A single two-link positioner: fixed layout and arm geometry, current
/// pose and its derived collision chord/fiber position, optional target
/// binding, and the path history the planner accumulates tick by tick.
#[derive(Debug, Clone)]
pub struct Robot {
    pub id: i64,
    pub x_pos: f64,
    pub y_pos: f64,
    pub has_apogee: bool,
    pub arm: Rc<ArmTemplateConfig>,
    pub collision_buffer: f64,

    pub alpha: f64,
    pub beta: f64,
    pub collision_chord: (Point3, Point3),
    pub fiber_xyz: Point3,

    pub target_alpha: f64,
    pub target_beta: f64,
    pub has_target_alpha_beta: bool,
    pub is_assigned: bool,
    pub assigned_target_id: Option<i64>,

    pub last_step_num: usize,
    pub on_target_vec: Vec<bool>,

    pub alpha_path: Vec<(f64, f64)>,
    pub beta_path: Vec<(f64, f64)>,
    pub simplified_alpha_path: Vec<(f64, f64)>,
    pub simplified_beta_path: Vec<(f64, f64)>,
    pub interp_simplified_alpha_path: Vec<(f64, f64)>,
    pub interp_simplified_beta_path: Vec<(f64, f64)>,
    pub smoothed_alpha_path: Vec<(f64, f64)>,
    pub smoothed_beta_path: Vec<(f64, f64)>,
    pub smoothed_alpha_velocity: Vec<f64>,
    pub smoothed_beta_velocity: Vec<f64>,

    /// XY of the alpha-arm tip / beta-arm far end at every recorded step.
    pub rough_alpha_xy: Vec<(f64, f64)>,
    pub rough_beta_xy: Vec<(f64, f64)>,
    /// Same traces, re-derived from the interpolated+simplified angle
    /// path so a renderer can draw a smooth sweep instead of the raw
    /// per-tick one.
    pub interp_rough_alpha_xy: Vec<(f64, f64)>,
    pub interp_rough_beta_xy: Vec<(f64, f64)>,

    pub robot_neighbors: Vec<i64>,
    pub fiducial_neighbors: Vec<i64>,

    /// Targets this robot passed `is_valid_assignment` for, populated by
    /// `RobotGrid::add_target`. Drives `targetless_robots`.
    pub valid_target_ids: Vec<i64>,
}

impl Robot {
    #[must_use]
    pub fn new(id: i64, x_pos: f64, y_pos: f64, has_apogee: bool, arm: Rc<ArmTemplateConfig>, collision_buffer: f64) -> Self {
        let pose = forward_kinematics(0.0, 0.0, x_pos, y_pos, &arm);
        Self {
            id,
            x_pos,
            y_pos,
            has_apogee,
            arm,
            collision_buffer,
            alpha: 0.0,
            beta: 0.0,
            collision_chord: pose.collision_chord,
            fiber_xyz: pose.fiber_xyz,
            target_alpha: 0.0,
            target_beta: 0.0,
            has_target_alpha_beta: false,
            is_assigned: false,
            assigned_target_id: None,
            last_step_num: 0,
            on_target_vec: Vec::new(),
            alpha_path: Vec::new(),
            beta_path: Vec::new(),
            simplified_alpha_path: Vec::new(),
            simplified_beta_path: Vec::new(),
            interp_simplified_alpha_path: Vec::new(),
            interp_simplified_beta_path: Vec::new(),
            smoothed_alpha_path: Vec::new(),
            smoothed_beta_path: Vec::new(),
            smoothed_alpha_velocity: Vec::new(),
            smoothed_beta_velocity: Vec::new(),
            rough_alpha_xy: Vec::new(),
            rough_beta_xy: Vec::new(),
            interp_rough_alpha_xy: Vec::new(),
            interp_rough_beta_xy: Vec::new(),
            robot_neighbors: Vec::new(),
            fiducial_neighbors: Vec::new(),
            valid_target_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn min_reach(&self) -> f64 {
        self.arm.min_reach()
    }

    #[must_use]
    pub fn max_reach(&self) -> f64 {
        self.arm.max_reach()
    }

    /// Poses the robot directly; no reachability or collision checking.
    /// Callers that need a valid pose enforce that themselves (the grid's
    /// candidate-move search, `set_fiber_xy`, assignment).
    pub fn set_alpha_beta(&mut self, alpha: f64, beta: f64) {
        self.alpha = alpha;
        self.beta = beta;
        let pose = forward_kinematics(alpha, beta, self.x_pos, self.y_pos, &self.arm);
        self.collision_chord = pose.collision_chord;
        self.fiber_xyz = pose.fiber_xyz;
    }

    /// Inverse kinematics then [`Self::set_alpha_beta`]; fails if `(x, y)`
    /// is outside the reachable annulus.
    pub fn set_fiber_xy(&mut self, x: f64, y: f64) -> Result<(), ReachError> {
        let (alpha, beta) = alpha_beta_from_xy(x, y, &self.arm)?;
        self.set_alpha_beta(alpha, beta);
        Ok(())
    }

    /// Samples a reachable `(x, y)` uniformly over the arm's annulus and
    /// poses the robot there.
    pub fn set_xy_uniform(&mut self, rng: &mut impl rand::Rng) {
        let (x, y) = sample_annulus(self.min_reach(), self.max_reach(), rng);
        self.set_fiber_xy(x, y)
            .expect("sample_annulus draws strictly within [min_reach, max_reach]");
    }

    pub fn add_robot_neighbor(&mut self, id: i64) {
        if !self.robot_neighbors.contains(&id) {
            self.robot_neighbors.push(id);
        }
    }

    pub fn add_fiducial_neighbor(&mut self, id: i64) {
        if !self.fiducial_neighbors.contains(&id) {
            self.fiducial_neighbors.push(id);
        }
    }

    /// Minimal number of `ang_step` ticks needed to reach the target pose
    /// under axis-aligned moves. Zero when there is no target.
    #[must_use]
    pub fn score(&self, ang_step: f64) -> u32 {
        if !self.has_target_alpha_beta {
            return 0;
        }
        let d_alpha = (self.target_alpha - self.alpha).abs();
        let d_beta = (self.target_beta - self.beta).abs();
        (d_alpha.max(d_beta) / ang_step).round().max(0.0) as u32
    }

    pub fn assign_target(&mut self, target_id: i64, target_alpha: f64, target_beta: f64) {
        self.assigned_target_id = Some(target_id);
        self.is_assigned = true;
        self.target_alpha = target_alpha;
        self.target_beta = target_beta;
        self.has_target_alpha_beta = true;
    }

    pub fn clear_assignment(&mut self) {
        self.assigned_target_id = None;
        self.is_assigned = false;
        self.has_target_alpha_beta = false;
    }

    /// Records the current pose as step `step_num` of the dense path, and
    /// the alpha-tip / beta-end XY for later rendering.
    pub fn record_step(&mut self, step_num: usize, on_target: bool) {
        let step = step_num as f64;
        self.alpha_path.push((step, self.alpha));
        self.beta_path.push((step, self.beta));
        self.on_target_vec.push(on_target);
        self.rough_alpha_xy.push((self.collision_chord.0.x, self.collision_chord.0.y));
        self.rough_beta_xy.push((self.collision_chord.1.x, self.collision_chord.1.y));
        self.last_step_num = step_num;
    }

    /// RDP-simplifies `alpha_path`/`beta_path` into their sparse
    /// counterparts, then resamples back onto the original tick grid,
    /// preserving endpoints both times.
    pub fn simplify_path(&mut self, epsilon: f64) {
        rdp(&self.alpha_path, epsilon, &mut self.simplified_alpha_path);
        rdp(&self.beta_path, epsilon, &mut self.simplified_beta_path);

        self.interp_simplified_alpha_path = self
            .alpha_path
            .iter()
            .map(|&(step, _)| (step, interpolate(&self.simplified_alpha_path, step)))
            .collect();
        self.interp_simplified_beta_path = self
            .beta_path
            .iter()
            .map(|&(step, _)| (step, interpolate(&self.simplified_beta_path, step)))
            .collect();

        self.interp_rough_alpha_xy.clear();
        self.interp_rough_beta_xy.clear();
        for i in 0..self.interp_simplified_alpha_path.len() {
            let alpha = self.interp_simplified_alpha_path[i].1;
            let beta = self.interp_simplified_beta_path[i].1;
            let pose = forward_kinematics(alpha, beta, self.x_pos, self.y_pos, &self.arm);
            self.interp_rough_alpha_xy.push((pose.collision_chord.0.x, pose.collision_chord.0.y));
            self.interp_rough_beta_xy.push((pose.collision_chord.1.x, pose.collision_chord.1.y));
        }
    }

    /// Rolling-average smoothing of `interp_simplified_*_path` with
    /// window size `points`, plus the per-step velocity the averaged
    /// angle sequence implies.
    pub fn smooth_velocity(&mut self, points: usize) {
        let window = points.max(1);

        let alpha_values: Vec<f64> = self.interp_simplified_alpha_path.iter().map(|&(_, v)| v).collect();
        let beta_values: Vec<f64> = self.interp_simplified_beta_path.iter().map(|&(_, v)| v).collect();
        let alpha_smoothed = moving_average(&alpha_values, window);
        let beta_smoothed = moving_average(&beta_values, window);

        self.smoothed_alpha_path = self
            .interp_simplified_alpha_path
            .iter()
            .zip(alpha_smoothed.iter())
            .map(|(&(step, _), &v)| (step, v))
            .collect();
        self.smoothed_beta_path = self
            .interp_simplified_beta_path
            .iter()
            .zip(beta_smoothed.iter())
            .map(|(&(step, _), &v)| (step, v))
            .collect();

        self.smoothed_alpha_velocity = finite_difference(&alpha_smoothed);
        self.smoothed_beta_velocity = finite_difference(&beta_smoothed);
    }
}

fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let half = window / 2;
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half).min(values.len() - 1);
            let slice = &values[lo..=hi];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

fn finite_difference(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(values.len());
    out.push(0.0);
    for w in values.windows(2) {
        out.push(w[1] - w[0]);
    }
    out
}
