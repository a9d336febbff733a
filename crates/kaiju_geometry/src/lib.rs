//! Geometry kernel shared by the kinematics and planner layers.
//!
//! Everything here is pure math: 3D point/segment primitives, the
//! closest-approach distance tests the collision model is built on, a
//! polyline simplification/resampling pipeline, annulus sampling for
//! `set_xy_uniform`, and the single seedable RNG stream the rest of the
//! workspace draws from.

mod point;
mod prng;
mod rdp;
mod sample;
mod segment;

pub use point::Point3;
pub use prng::Prng;
pub use rdp::{interpolate, rdp};
pub use sample::sample_annulus;
pub use segment::{point_segment_dist2, segment_segment_dist2};
