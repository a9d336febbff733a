//! `RobotGrid`: owns every robot, fiducial, and target by id, builds the
//! collision neighbor graph, and exposes the collision/assignment queries
//! the planner policies (`crate::planner`) are built on.

use std::collections::BTreeMap;
use std::rc::Rc;

use kaiju_geometry::{point_segment_dist2, segment_segment_dist2, Point3, Prng};

use crate::config::{ArmTemplateConfig, GridConfig};
use crate::errors::GridError;
use crate::fiducial::Fiducial;
use crate::kinematics::alpha_beta_from_xy;
use crate::robot::Robot;
use crate::target::{FiberType, Target};

/// Entities are stored in a map keyed by id rather than an insertion-order
/// `Vec`, matching the original C++ implementation's `std::map` (sorted by
/// key) so per-tick robot visit order is deterministic without depending
/// on caller-supplied insertion order.
#[derive(Debug)]
pub struct RobotGrid {
    pub config: GridConfig,
    pub arm: Rc<ArmTemplateConfig>,
    pub robots: BTreeMap<i64, Robot>,
    pub fiducials: BTreeMap<i64, Fiducial>,
    pub targets: BTreeMap<i64, Target>,
    pub initialized: bool,
    pub rng: Prng,
    pub did_fail: bool,
    pub n_steps: usize,
    pub smooth_collisions: usize,
}

impl RobotGrid {
    /// Constructs an empty grid with the hardware defaults of
    /// [`ArmTemplateConfig::default`].
    #[must_use]
    pub fn new(ang_step: f64, collision_buffer: f64, epsilon: f64, seed: u64) -> Self {
        let config = GridConfig {
            ang_step,
            collision_buffer,
            epsilon,
            seed,
            ..GridConfig::default()
        };
        Self::with_config(config, Rc::new(ArmTemplateConfig::default()))
    }

    /// Constructs an empty grid overriding the hardware description, for
    /// callers driving a different positioner generation. The arm template
    /// is shared by reference across every robot in the grid rather than
    /// copied per robot.
    #[must_use]
    pub fn with_config(config: GridConfig, arm: Rc<ArmTemplateConfig>) -> Self {
        let rng = Prng::new(config.seed);
        Self {
            config,
            arm,
            robots: BTreeMap::new(),
            fiducials: BTreeMap::new(),
            targets: BTreeMap::new(),
            initialized: false,
            rng,
            did_fail: true,
            n_steps: 0,
            smooth_collisions: 0,
        }
    }

    #[must_use]
    pub fn max_path_steps(&self) -> usize {
        self.config.max_path_steps()
    }

    pub fn add_robot(&mut self, id: i64, x: f64, y: f64, has_apogee: bool) -> Result<(), GridError> {
        if self.initialized {
            return Err(GridError::AlreadyInitialized);
        }
        if self.robots.contains_key(&id) {
            return Err(GridError::DuplicateRobotId(id));
        }
        let robot = Robot::new(id, x, y, has_apogee, self.arm.clone(), self.config.collision_buffer);
        self.robots.insert(id, robot);
        Ok(())
    }

    pub fn add_fiducial(&mut self, id: i64, x: f64, y: f64, collision_buffer: f64) -> Result<(), GridError> {
        if self.initialized {
            return Err(GridError::AlreadyInitialized);
        }
        if self.fiducials.contains_key(&id) {
            return Err(GridError::DuplicateFiducialId(id));
        }
        self.fiducials.insert(id, Fiducial::new(id, x, y, collision_buffer));
        Ok(())
    }

    /// Builds the symmetric robot-robot and robot-fiducial neighbor graph
    /// and poses every robot at `(0, 0)`. Guarded against a second call:
    /// the neighbor graph is frozen for the grid's lifetime once built.
    pub fn init_grid(&mut self) -> Result<(), GridError> {
        if self.initialized {
            return Err(GridError::AlreadyInitialized);
        }
        self.initialized = true;

        let pitch = self.config.pitch;
        let robot_ids: Vec<i64> = self.robots.keys().copied().collect();

        for &rid in &robot_ids {
            let (rx, ry) = {
                let r = &self.robots[&rid];
                (r.x_pos, r.y_pos)
            };

            let fiducial_neighbors: Vec<i64> = self
                .fiducials
                .values()
                .filter(|f| (rx - f.x).hypot(ry - f.y) < pitch + 1.0)
                .map(|f| f.id)
                .collect();

            let robot_neighbors: Vec<i64> = robot_ids
                .iter()
                .copied()
                .filter(|&rid2| {
                    if rid2 == rid {
                        return false;
                    }
                    let r2 = &self.robots[&rid2];
                    (rx - r2.x_pos).hypot(ry - r2.y_pos) < 2.0 * pitch + 1.0
                })
                .collect();

            let robot = self.robots.get_mut(&rid).unwrap();
            for fid in fiducial_neighbors {
                robot.add_fiducial_neighbor(fid);
            }
            for rid2 in robot_neighbors {
                robot.add_robot_neighbor(rid2);
            }
            robot.set_alpha_beta(0.0, 0.0);
        }

        log::debug!(
            "init_grid: {} robots, {} fiducials, pitch={pitch}",
            self.robots.len(),
            self.fiducials.len()
        );

        Ok(())
    }

    pub fn add_target(&mut self, id: i64, x: f64, y: f64, fiber_type: FiberType, priority: i32) -> Result<(), GridError> {
        if !self.initialized {
            return Err(GridError::NotInitialized);
        }
        if self.targets.contains_key(&id) {
            return Err(GridError::DuplicateTargetId(id));
        }
        self.targets.insert(id, Target::new(id, x, y, fiber_type, priority));

        let robot_ids: Vec<i64> = self.robots.keys().copied().collect();
        for rid in robot_ids {
            if self.is_valid_assignment(rid, id) {
                self.robots.get_mut(&rid).unwrap().valid_target_ids.push(id);
                self.targets.get_mut(&id).unwrap().valid_robot_ids.push(rid);
            }
        }
        Ok(())
    }

    /// The four checks from the data model: apogee fiber requires
    /// `has_apogee`, inverse kinematics must succeed, the resulting
    /// `(alpha, beta)` must be in range, and posing the robot there must
    /// not collide with a fiducial neighbor. The robot's pose is restored
    /// before returning either way.
    #[must_use]
    pub fn is_valid_assignment(&mut self, robot_id: i64, target_id: i64) -> bool {
        let has_apogee = self.robots[&robot_id].has_apogee;
        let (tx, ty, fiber_type) = {
            let t = &self.targets[&target_id];
            (t.x, t.y, t.fiber_type)
        };

        if fiber_type == FiberType::Apogee && !has_apogee {
            return false;
        }

        let arm = self.robots[&robot_id].arm.clone();
        let (alpha, beta) = match alpha_beta_from_xy(tx, ty, &arm) {
            Ok(ab) => ab,
            Err(_) => return false,
        };

        if !(0.0..360.0).contains(&alpha) || !(0.0..=180.0).contains(&beta) {
            return false;
        }

        let (saved_alpha, saved_beta) = {
            let r = &self.robots[&robot_id];
            (r.alpha, r.beta)
        };
        self.robots.get_mut(&robot_id).unwrap().set_alpha_beta(alpha, beta);
        let collided = !self.fiducial_colliders(robot_id).is_empty();
        self.robots.get_mut(&robot_id).unwrap().set_alpha_beta(saved_alpha, saved_beta);

        !collided
    }

    pub fn assign_robot_to_target(&mut self, robot_id: i64, target_id: i64) -> Result<(), GridError> {
        if !self.robots.contains_key(&robot_id) {
            return Err(GridError::NoSuchRobot(robot_id));
        }
        if !self.targets.contains_key(&target_id) {
            return Err(GridError::NoSuchTarget(target_id));
        }
        if !self.robots[&robot_id].valid_target_ids.contains(&target_id) {
            return Err(GridError::InvalidAssignment {
                robot: robot_id,
                target: target_id,
            });
        }

        self.unassign_robot(robot_id);
        self.unassign_target(target_id);

        let (tx, ty) = {
            let t = &self.targets[&target_id];
            (t.x, t.y)
        };
        let arm = self.robots[&robot_id].arm.clone();
        let (alpha, beta) =
            alpha_beta_from_xy(tx, ty, &arm).expect("already validated reachable by is_valid_assignment in add_target");

        self.targets.get_mut(&target_id).unwrap().assigned_robot_id = Some(robot_id);
        let robot = self.robots.get_mut(&robot_id).unwrap();
        robot.assign_target(target_id, alpha, beta);
        robot.set_alpha_beta(alpha, beta);
        Ok(())
    }

    pub fn unassign_robot(&mut self, robot_id: i64) {
        let Some(robot) = self.robots.get(&robot_id) else { return };
        if !robot.is_assigned {
            return;
        }
        let target_id = robot.assigned_target_id;
        self.robots.get_mut(&robot_id).unwrap().clear_assignment();
        if let Some(tid) = target_id {
            if let Some(t) = self.targets.get_mut(&tid) {
                t.assigned_robot_id = None;
            }
        }
    }

    pub fn unassign_target(&mut self, target_id: i64) {
        let Some(target) = self.targets.get(&target_id) else { return };
        let Some(robot_id) = target.assigned_robot_id else { return };
        self.targets.get_mut(&target_id).unwrap().assigned_robot_id = None;
        if let Some(r) = self.robots.get_mut(&robot_id) {
            r.clear_assignment();
        }
    }

    // --- collision queries -------------------------------------------------

    #[must_use]
    pub fn robot_colliders(&self, robot_id: i64) -> Vec<i64> {
        let robot = &self.robots[&robot_id];
        robot
            .robot_neighbors
            .iter()
            .copied()
            .filter(|&nid| {
                let neighbor = &self.robots[&nid];
                let d2 = segment_segment_dist2(
                    neighbor.collision_chord.0,
                    neighbor.collision_chord.1,
                    robot.collision_chord.0,
                    robot.collision_chord.1,
                );
                let threshold = (robot.collision_buffer + neighbor.collision_buffer).powi(2);
                d2 < threshold
            })
            .collect()
    }

    #[must_use]
    pub fn fiducial_colliders(&self, robot_id: i64) -> Vec<i64> {
        let robot = &self.robots[&robot_id];
        robot
            .fiducial_neighbors
            .iter()
            .copied()
            .filter(|&fid| {
                let fiducial = &self.fiducials[&fid];
                let q = Point3::new(fiducial.x, fiducial.y, 0.0);
                let d2 = point_segment_dist2(q, robot.collision_chord.0, robot.collision_chord.1);
                let threshold = (robot.collision_buffer + fiducial.collision_buffer).powi(2);
                d2 < threshold
            })
            .collect()
    }

    #[must_use]
    pub fn is_collided(&self, robot_id: i64) -> bool {
        !self.robot_colliders(robot_id).is_empty() || !self.fiducial_colliders(robot_id).is_empty()
    }

    #[must_use]
    pub fn n_collisions(&self) -> usize {
        self.robots.keys().filter(|&&id| self.is_collided(id)).count()
    }

    /// `Σ 1/d(n)` over robot neighbors whose `score` exceeds this robot's
    /// and whose collision-chord distance is below `distance`. Used by
    /// the MDP planner's early-exit check.
    #[must_use]
    pub fn encroachment_score(&self, robot_id: i64, distance: f64) -> f64 {
        let robot = &self.robots[&robot_id];
        let score = robot.score(self.config.ang_step);
        robot
            .robot_neighbors
            .iter()
            .filter_map(|&nid| {
                let neighbor = &self.robots[&nid];
                if score >= neighbor.score(self.config.ang_step) {
                    return None;
                }
                let d2 = segment_segment_dist2(
                    neighbor.collision_chord.0,
                    neighbor.collision_chord.1,
                    robot.collision_chord.0,
                    robot.collision_chord.1,
                );
                let dist = d2.sqrt();
                (dist < distance).then_some(1.0 / dist)
            })
            .sum()
    }

    /// `Σ 1/d²(n)` over robot neighbors (the MDP planner's spread-out
    /// objective) and the distance to the nearest one.
    #[must_use]
    pub fn local_energy_and_closest(&self, robot_id: i64) -> (f64, f64) {
        let robot = &self.robots[&robot_id];
        let mut local_energy = 0.0;
        let mut closest = f64::MAX;
        for &nid in &robot.robot_neighbors {
            let neighbor = &self.robots[&nid];
            let d2 = segment_segment_dist2(
                neighbor.collision_chord.0,
                neighbor.collision_chord.1,
                robot.collision_chord.0,
                robot.collision_chord.1,
            );
            local_energy += 1.0 / d2;
            let dist = d2.sqrt();
            if dist < closest {
                closest = dist;
            }
        }
        (local_energy, closest)
    }

    // --- assignment state queries -------------------------------------------

    #[must_use]
    pub fn unreachable_targets(&self) -> Vec<i64> {
        self.targets.values().filter(|t| t.valid_robot_ids.is_empty()).map(|t| t.id).collect()
    }

    #[must_use]
    pub fn targetless_robots(&self) -> Vec<i64> {
        self.robots.values().filter(|r| r.valid_target_ids.is_empty()).map(|r| r.id).collect()
    }

    #[must_use]
    pub fn unassigned_robots(&self) -> Vec<i64> {
        self.robots.values().filter(|r| !r.is_assigned).map(|r| r.id).collect()
    }

    #[must_use]
    pub fn assigned_targets(&self) -> Vec<i64> {
        self.targets.values().filter(|t| t.assigned_robot_id.is_some()).map(|t| t.id).collect()
    }

    #[must_use]
    pub fn deadlocked_robots(&self) -> Vec<i64> {
        self.robots
            .values()
            .filter(|r| r.has_target_alpha_beta && (r.alpha != r.target_alpha || r.beta != r.target_beta))
            .map(|r| r.id)
            .collect()
    }

    /// Repeatedly resamples collided robots (capped at 1000 outer
    /// iterations) until the grid is collision-free.
    pub fn decollide_grid(&mut self) -> Result<(), GridError> {
        for _ in 0..1000 {
            if self.n_collisions() == 0 {
                return Ok(());
            }
            let robot_ids: Vec<i64> = self.robots.keys().copied().collect();
            for rid in robot_ids {
                if self.is_collided(rid) {
                    self.decollide_robot(rid);
                }
            }
        }

        let remaining = self.n_collisions();
        if remaining == 0 {
            Ok(())
        } else {
            log::warn!("decollide_grid exhausted its iteration cap with {remaining} robots still collided");
            Err(GridError::DecollideFailed(remaining))
        }
    }

    fn decollide_robot(&mut self, robot_id: i64) {
        self.unassign_robot(robot_id);
        for _ in 0..1000 {
            {
                let robot = self.robots.get_mut(&robot_id).unwrap();
                robot.set_xy_uniform(&mut self.rng);
            }
            if !self.is_collided(robot_id) {
                break;
            }
        }
    }
}
