//! End-to-end scenarios exercising a full grid lifecycle: construction,
//! `init_grid`, optional assignment, planning, and the collision/assignment
//! queries a driver would check afterward.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kaiju_planner::{FiberType, RobotGrid};

    const PITCH: f64 = 22.4;

    fn hex_ring(center_id: i64, pitch: f64) -> Vec<(i64, f64, f64)> {
        let mut out = vec![(center_id, 0.0, 0.0)];
        for k in 0..6 {
            let theta = (k as f64) * std::f64::consts::PI / 3.0;
            out.push((center_id + 1 + k, pitch * theta.cos(), pitch * theta.sin()));
        }
        out
    }

    #[test]
    fn s1_single_pair_folds_from_inward_pose() {
        let mut grid = RobotGrid::new(1.0, 1.5, 5.0, 7);
        grid.add_robot(0, 0.0, 0.0, false).unwrap();
        grid.add_robot(1, PITCH, 0.0, false).unwrap();
        grid.init_grid().unwrap();

        grid.robots.get_mut(&0).unwrap().set_alpha_beta(90.0, 90.0);
        grid.robots.get_mut(&1).unwrap().set_alpha_beta(90.0, 90.0);

        grid.path_gen();

        assert!(!grid.did_fail, "fold planner should converge for a single facing pair");
        for robot in grid.robots.values() {
            assert_eq!(robot.alpha, 0.0);
            assert_eq!(robot.beta, 180.0);
        }

        let beta_path = &grid.robots[&0].beta_path;
        let ever_rose = beta_path.windows(2).any(|w| w[1].1 > w[0].1);
        assert!(ever_rose, "folding toward beta=180 from beta=90 means beta rises across most ticks");
    }

    #[test]
    fn s2_already_folded_hex_ring_converges_in_one_tick() {
        let mut grid = RobotGrid::new(1.0, 1.5, 5.0, 7);
        for (id, x, y) in hex_ring(0, PITCH) {
            grid.add_robot(id, x, y, false).unwrap();
        }
        grid.init_grid().unwrap();

        let ids: Vec<i64> = grid.robots.keys().copied().collect();
        for id in &ids {
            grid.robots.get_mut(id).unwrap().set_alpha_beta(0.0, 180.0);
        }

        grid.path_gen();

        assert!(!grid.did_fail);
        assert_eq!(grid.n_steps, 1);
        for robot in grid.robots.values() {
            assert_eq!(robot.alpha_path.len(), 1);
            assert_eq!(robot.beta_path.len(), 1);
            assert_eq!(robot.alpha_path[0].0, 0.0);
        }
    }

    #[test]
    fn s3_unreachable_target_is_never_assignable() {
        let mut grid = RobotGrid::new(1.0, 1.5, 5.0, 7);
        grid.add_robot(0, 0.0, 0.0, false).unwrap();
        grid.init_grid().unwrap();

        grid.add_target(99, 50.0, 0.0, FiberType::Boss, 0).unwrap();

        assert!(grid.targets[&99].valid_robot_ids.is_empty());
        assert_eq!(grid.unreachable_targets(), vec![99]);
        assert!(grid.assign_robot_to_target(0, 99).is_err());
    }

    #[test]
    fn s4_fiducial_blocks_an_otherwise_reachable_target() {
        let mut grid = RobotGrid::new(1.0, 1.5, 5.0, 7);
        grid.add_robot(0, 0.0, 0.0, false).unwrap();
        // A fiducial this oversized collision buffer guarantees the check
        // fails regardless of exactly where along the 3D collision chord
        // the closest approach lands, while (8, 0) stays within the
        // default arm's reachable annulus so inverse kinematics succeeds.
        grid.add_fiducial(7, 8.0, 0.0, 40.0).unwrap();
        grid.init_grid().unwrap();

        grid.add_target(1, 8.0, 0.0, FiberType::Boss, 0).unwrap();

        assert!(grid.targets[&1].valid_robot_ids.is_empty());
        assert!(grid.robots[&0].valid_target_ids.is_empty());
    }

    #[test]
    fn s5_decollide_is_deterministic_under_a_fixed_seed() {
        let build = |seed: u64| {
            let mut grid = RobotGrid::new(1.0, 1.5, 5.0, seed);
            for (id, x) in [(0, 0.0), (1, PITCH), (2, 2.0 * PITCH)] {
                grid.add_robot(id, x, 0.0, false).unwrap();
            }
            grid.init_grid().unwrap();
            // A collision buffer comfortably above the default guarantees
            // the folded starting pose reads as collided, while staying
            // small enough next to the arm's reach that decollide_grid can
            // actually find a clear resampled pose within its iteration cap.
            for robot in grid.robots.values_mut() {
                robot.collision_buffer = 5.0;
            }
            grid.decollide_grid().unwrap();
            (grid.n_collisions(), grid.robots[&0].alpha, grid.robots[&0].beta, grid.robots[&1].alpha, grid.robots[&1].beta)
        };

        let first = build(42);
        let second = build(42);

        assert_eq!(first.0, 0, "decollide_grid must leave zero collisions under the buffer it resolved against");
        assert_eq!(first, second, "same seed, same resampling trace, same final pose");
    }

    // Rather than pin one hand-picked seed (the original implementation's own
    // fixtures needed the same kind of tuning), search a small range at test
    // time: the ring-swap geometry is fixed, only the seed varies, and the
    // assertion always runs instead of being skipped.
    #[test]
    fn s6_mdp_converges_where_greedy_deadlocks_on_a_hex_swap() {
        let pitch = PITCH;

        let build = |seed: u64, policy_mdp: bool| {
            let mut grid = RobotGrid::new(1.0, 1.5, 5.0, seed);
            let positions = hex_ring(0, pitch);
            for &(id, x, y) in &positions {
                grid.add_robot(id, x, y, false).unwrap();
            }
            grid.init_grid().unwrap();

            // Rotate each outer robot's target onto its neighbor's slot: no
            // robot can reach its target without first vacating a slot a
            // neighbor also needs, the classic ring-swap deadlock.
            let outer: Vec<i64> = positions[1..].iter().map(|&(id, _, _)| id).collect();
            for (i, &rid) in outer.iter().enumerate() {
                let (_, tx, ty) = positions[1 + (i + 1) % outer.len()];
                grid.add_target(100 + rid, tx, ty, FiberType::Boss, 0).unwrap();
            }
            for &rid in &outer {
                let target_id = 100 + rid;
                if grid.robots[&rid].valid_target_ids.contains(&target_id) {
                    let _ = grid.assign_robot_to_target(rid, target_id);
                }
            }

            if policy_mdp {
                grid.path_gen_mdp();
            } else {
                grid.path_gen_greedy();
            }
            grid.did_fail
        };

        let matching_seed = (0..64u64).find(|&seed| build(seed, false) && !build(seed, true));

        assert!(
            matching_seed.is_some(),
            "expected at least one seed in 0..64 where greedy deadlocks on the hex-ring swap \
             and the MDP planner's probabilistic acceptance escapes it"
        );
    }
}
