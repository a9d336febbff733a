//! Error types for the two fallible boundaries of the core: grid
//! configuration/assignment mistakes, and out-of-reach fiber targets.
//! Everything else (plan non-convergence, smoothing collisions, decollide
//! exhaustion) is reported as state on `RobotGrid`, not as a `Result`.

use thiserror::Error;

/// Configuration and assignment mistakes a caller can make against
/// `RobotGrid`. All are programmer errors: fatal at the call site, not
/// something the planner retries around.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid is already initialized; robots and fiducials can only be added before init_grid")]
    AlreadyInitialized,
    #[error("grid is not yet initialized; targets can only be added after init_grid")]
    NotInitialized,
    #[error("robot id {0} already exists")]
    DuplicateRobotId(i64),
    #[error("fiducial id {0} already exists")]
    DuplicateFiducialId(i64),
    #[error("target id {0} already exists")]
    DuplicateTargetId(i64),
    #[error("no robot with id {0}")]
    NoSuchRobot(i64),
    #[error("no target with id {0}")]
    NoSuchTarget(i64),
    #[error("target {target} is not a valid assignment for robot {robot}")]
    InvalidAssignment { robot: i64, target: i64 },
    #[error("decollide_grid exhausted its outer iteration cap with {0} robots still collided")]
    DecollideFailed(usize),
}

/// `set_fiber_xy` (and the inverse-kinematics it wraps) failing because the
/// requested point falls outside the arm's reachable annulus.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("point ({x}, {y}) at radius {radius} is unreachable: need radius in [{min_reach}, {max_reach}]")]
pub struct ReachError {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub min_reach: f64,
    pub max_reach: f64,
}
