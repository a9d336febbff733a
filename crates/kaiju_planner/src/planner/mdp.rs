//! MDP-style stochastic planner: same 9-move enumeration as greedy, but
//! candidates are scored by either `local_energy` (spread out) or `score`
//! (approach target), chosen per tick by a biased coin, and accepted
//! through a probabilistic improve-or-tie rule rather than a strict
//! argmin. Gives the conflict-resolution dynamics room to escape the
//! local minima that deadlock the plain greedy planner.

use crate::grid::RobotGrid;
use crate::planner::greedy::clamp_overshoot;

const DELTAS: [f64; 3] = [-1.0, 0.0, 1.0];

struct Candidate {
    alpha: f64,
    beta: f64,
    local_energy: f64,
    score: u32,
}

pub fn step_mdp(grid: &mut RobotGrid, robot_id: i64, step_num: usize) {
    let ang_step = grid.config.ang_step;
    let cb = grid.config.collision_buffer;
    let (curr_alpha, curr_beta, target_alpha, target_beta, score0) = {
        let r = &grid.robots[&robot_id];
        (r.alpha, r.beta, r.target_alpha, r.target_beta, r.score(ang_step))
    };

    if score0 == 0 && grid.encroachment_score(robot_id, 2.4 * cb) == 0.0 {
        grid.robots.get_mut(&robot_id).unwrap().record_step(step_num, true);
        return;
    }

    let mut candidates: Vec<Candidate> = Vec::with_capacity(9);

    for &beta_dir in &DELTAS {
        for &alpha_dir in &DELTAS {
            let next_alpha = clamp_overshoot(curr_alpha, curr_alpha + alpha_dir * ang_step, target_alpha).clamp(0.0, 360.0);
            let next_beta = clamp_overshoot(curr_beta, curr_beta + beta_dir * ang_step, target_beta).clamp(0.0, 360.0);

            grid.robots.get_mut(&robot_id).unwrap().set_alpha_beta(next_alpha, next_beta);

            let (local_energy, closest_neighbor) = grid.local_energy_and_closest(robot_id);
            if closest_neighbor < 2.0 * cb {
                continue;
            }

            let score = grid.robots[&robot_id].score(ang_step);
            candidates.push(Candidate {
                alpha: next_alpha,
                beta: next_beta,
                local_energy,
                score,
            });
        }
    }

    grid.rng.shuffle(&mut candidates);

    // With probability 0.2 minimise local_energy (spread out); otherwise
    // minimise score (approach target).
    let minimise_energy = grid.rng.uniform() > 0.8;

    let mut best_alpha = curr_alpha;
    let mut best_beta = curr_beta;
    let mut best_metric = f64::MAX;

    for cand in &candidates {
        let metric = if minimise_energy { cand.local_energy } else { f64::from(cand.score) };
        if metric < best_metric && grid.rng.uniform() > 0.2 {
            best_metric = metric;
            best_alpha = cand.alpha;
            best_beta = cand.beta;
        } else if metric == best_metric && grid.rng.uniform() > 0.5 {
            best_metric = metric;
            best_alpha = cand.alpha;
            best_beta = cand.beta;
        }
    }

    grid.robots.get_mut(&robot_id).unwrap().set_alpha_beta(best_alpha, best_beta);
    let on_target = best_alpha == target_alpha && best_beta == target_beta;
    grid.robots.get_mut(&robot_id).unwrap().record_step(step_num, on_target);
}
