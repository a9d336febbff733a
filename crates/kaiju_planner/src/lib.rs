//! Collision-free motion planning for a dense planar grid of two-link
//! fiber positioners.
//!
//! An external driver constructs a [`RobotGrid`], inserts robots and
//! fiducials, calls [`RobotGrid::init_grid`], optionally assigns targets
//! and calls [`RobotGrid::decollide_grid`], then runs one of
//! [`RobotGrid::path_gen`], [`RobotGrid::path_gen_greedy`], or
//! [`RobotGrid::path_gen_mdp`]. Path arrays are read back from the
//! robots afterward; file I/O, bindings, CLI drivers, hex-grid layout
//! generation, and focal-plane optics conversions are all out of scope
//! here and live in an external collaborator.

pub mod config;
pub mod errors;
pub mod fiducial;
pub mod grid;
pub mod kinematics;
pub mod planner;
pub mod robot;
pub mod target;

pub use config::{ArmTemplateConfig, GridConfig};
pub use errors::{GridError, ReachError};
pub use fiducial::Fiducial;
pub use grid::RobotGrid;
pub use planner::Policy;
pub use robot::Robot;
pub use target::{FiberType, Target};
