//! Fold planner: every robot walks toward `(alpha=0, beta=180)`, the
//! fully-folded safe pose, using a fixed preference order of candidate
//! moves and accepting the first that avoids collision.

use crate::grid::RobotGrid;

/// `(delta_alpha, delta_beta)` in units of `ang_step`, tried in this
/// order; skips the no-move option.
const FOLD_MOVES: [(f64, f64); 8] = [
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
];

pub fn step_fold(grid: &mut RobotGrid, robot_id: i64, step_num: usize) {
    let ang_step = grid.config.ang_step;
    let (curr_alpha, curr_beta) = {
        let r = &grid.robots[&robot_id];
        (r.alpha, r.beta)
    };

    if curr_alpha == 0.0 && curr_beta == 180.0 {
        grid.robots.get_mut(&robot_id).unwrap().record_step(step_num, true);
        return;
    }

    for &(da, db) in &FOLD_MOVES {
        let next_alpha = (curr_alpha + da * ang_step).clamp(0.0, 360.0);
        let next_beta = (curr_beta + db * ang_step).clamp(0.0, 180.0);
        if next_alpha == curr_alpha && next_beta == curr_beta {
            continue;
        }

        grid.robots.get_mut(&robot_id).unwrap().set_alpha_beta(next_alpha, next_beta);
        if !grid.is_collided(robot_id) {
            grid.robots.get_mut(&robot_id).unwrap().record_step(step_num, false);
            return;
        }
    }

    grid.robots.get_mut(&robot_id).unwrap().set_alpha_beta(curr_alpha, curr_beta);
    grid.robots.get_mut(&robot_id).unwrap().record_step(step_num, false);
}
