//! Greedy planner: enumerate all 9 single-step moves, clamp each so it
//! never overshoots the robot's target, reject any that collides, and
//! take whichever survivor has the lowest `score`, breaking ties with a
//! fair coin.

use crate::grid::RobotGrid;

const DELTAS: [f64; 3] = [-1.0, 0.0, 1.0];

pub fn step_greedy(grid: &mut RobotGrid, robot_id: i64, step_num: usize) {
    let ang_step = grid.config.ang_step;
    let (curr_alpha, curr_beta, target_alpha, target_beta, score0) = {
        let r = &grid.robots[&robot_id];
        (r.alpha, r.beta, r.target_alpha, r.target_beta, r.score(ang_step))
    };

    if score0 == 0 {
        grid.robots.get_mut(&robot_id).unwrap().record_step(step_num, true);
        return;
    }

    let mut best_alpha = curr_alpha;
    let mut best_beta = curr_beta;
    let mut best_score = u32::MAX;

    for &beta_dir in &DELTAS {
        for &alpha_dir in &DELTAS {
            let next_alpha = clamp_overshoot(curr_alpha, curr_alpha + alpha_dir * ang_step, target_alpha).clamp(0.0, 360.0);
            let next_beta = clamp_overshoot(curr_beta, curr_beta + beta_dir * ang_step, target_beta).clamp(0.0, 360.0);

            grid.robots.get_mut(&robot_id).unwrap().set_alpha_beta(next_alpha, next_beta);
            if grid.is_collided(robot_id) {
                continue;
            }

            let score = grid.robots[&robot_id].score(ang_step);
            if score < best_score {
                best_score = score;
                best_alpha = next_alpha;
                best_beta = next_beta;
            } else if score == best_score && grid.rng.uniform() >= 0.5 {
                best_alpha = next_alpha;
                best_beta = next_beta;
            }
        }
    }

    grid.robots.get_mut(&robot_id).unwrap().set_alpha_beta(best_alpha, best_beta);
    let on_target = grid.robots[&robot_id].score(ang_step) == 0;
    grid.robots.get_mut(&robot_id).unwrap().record_step(step_num, on_target);
}

/// Clamp a proposed `next` value so it never crosses `target`.
pub(crate) fn clamp_overshoot(curr: f64, next: f64, target: f64) -> f64 {
    if curr > target && next <= target {
        return target;
    }
    if curr < target && next >= target {
        return target;
    }
    next
}
