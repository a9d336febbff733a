//! The three planning policies and the shared synchronous tick loop that
//! drives all of them, plus the simplify/smooth/verify post-processing
//! pipeline run once a plan has converged.

pub mod fold;
pub mod greedy;
pub mod mdp;

use crate::grid::RobotGrid;

/// A tagged choice between the three `step_*` strategies, selected once
/// by the entry point rather than dispatched virtually inside the tick
/// loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fold,
    Greedy,
    Mdp,
}

impl RobotGrid {
    fn clear_paths(&mut self) {
        for robot in self.robots.values_mut() {
            robot.alpha_path.clear();
            robot.beta_path.clear();
            robot.simplified_alpha_path.clear();
            robot.simplified_beta_path.clear();
            robot.interp_simplified_alpha_path.clear();
            robot.interp_simplified_beta_path.clear();
            robot.smoothed_alpha_path.clear();
            robot.smoothed_beta_path.clear();
            robot.smoothed_alpha_velocity.clear();
            robot.smoothed_beta_velocity.clear();
            robot.rough_alpha_xy.clear();
            robot.rough_beta_xy.clear();
            robot.interp_rough_alpha_xy.clear();
            robot.interp_rough_beta_xy.clear();
            robot.on_target_vec.clear();
        }
    }

    /// Fold planner: every robot walks toward `(0, 180)`. Robots are
    /// visited in id order every tick (fold has no randomised visit
    /// order, unlike MDP).
    pub fn path_gen(&mut self) {
        self.clear_paths();
        self.did_fail = true;

        let robot_ids: Vec<i64> = self.robots.keys().copied().collect();
        let mut last_step = 0;

        for step in 0..self.max_path_steps() {
            last_step = step;
            let mut all_folded = true;
            for &rid in &robot_ids {
                fold::step_fold(self, rid, step);
                let r = &self.robots[&rid];
                if r.alpha != 0.0 || r.beta != 180.0 {
                    all_folded = false;
                }
            }
            if all_folded {
                log::debug!("path_gen converged at step {step}");
                self.did_fail = false;
                break;
            }
        }

        self.n_steps = last_step + 1;
    }

    /// Greedy planner: every robot walks toward its assigned target,
    /// visited in id order every tick.
    pub fn path_gen_greedy(&mut self) {
        self.clear_paths();
        self.did_fail = true;

        let robot_ids: Vec<i64> = self.robots.keys().copied().collect();
        let ang_step = self.config.ang_step;
        let mut last_step = 0;

        for step in 0..self.max_path_steps() {
            last_step = step;
            let mut all_at_target = true;
            for &rid in &robot_ids {
                greedy::step_greedy(self, rid, step);
                if self.robots[&rid].score(ang_step) != 0 {
                    all_at_target = false;
                }
            }
            if all_at_target {
                log::debug!("path_gen_greedy converged at step {step}");
                self.did_fail = false;
                break;
            }
        }

        self.n_steps = last_step + 1;
    }

    /// MDP planner: every robot walks toward its assigned target, with a
    /// fresh uniform shuffle of the visit order each tick, seeded from
    /// the grid's RNG so the trace reproduces under a fixed `seed`.
    pub fn path_gen_mdp(&mut self) {
        self.clear_paths();
        self.did_fail = true;

        let mut robot_ids: Vec<i64> = self.robots.keys().copied().collect();
        let ang_step = self.config.ang_step;
        let mut last_step = 0;

        for step in 0..self.max_path_steps() {
            last_step = step;
            self.rng.shuffle(&mut robot_ids);
            let mut all_at_target = true;
            for &rid in &robot_ids {
                mdp::step_mdp(self, rid, step);
                if self.robots[&rid].score(ang_step) != 0 {
                    all_at_target = false;
                }
            }
            if all_at_target {
                log::debug!("path_gen_mdp converged at step {step}");
                self.did_fail = false;
                break;
            }
        }

        self.n_steps = last_step + 1;
    }

    /// Runs whichever `path_gen*` entry point `policy` selects.
    pub fn run_policy(&mut self, policy: Policy) {
        match policy {
            Policy::Fold => self.path_gen(),
            Policy::Greedy => self.path_gen_greedy(),
            Policy::Mdp => self.path_gen_mdp(),
        }
    }

    /// RDP-simplify, then resample, every robot's dense path.
    pub fn simplify_paths(&mut self) {
        let epsilon = self.config.epsilon;
        for robot in self.robots.values_mut() {
            robot.simplify_path(epsilon);
        }
    }

    /// Rolling-average smooth every robot's interpolated-simplified path.
    pub fn smooth_paths(&mut self, points: usize) {
        for robot in self.robots.values_mut() {
            robot.smooth_velocity(points);
        }
    }

    /// Replays every robot's smoothed path tick by tick, accumulating the
    /// total collision count. A valid plan has `smooth_collisions == 0`.
    pub fn verify_smoothed(&mut self) {
        self.smooth_collisions = 0;
        for step in 0..self.n_steps {
            let ids: Vec<i64> = self.robots.keys().copied().collect();
            for &rid in &ids {
                let robot = &self.robots[&rid];
                if let (Some(&(_, alpha)), Some(&(_, beta))) =
                    (robot.smoothed_alpha_path.get(step), robot.smoothed_beta_path.get(step))
                {
                    self.robots.get_mut(&rid).unwrap().set_alpha_beta(alpha, beta);
                }
            }
            self.smooth_collisions += self.n_collisions();
        }
    }
}
