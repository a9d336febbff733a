//! Forward and inverse kinematics for the two-link (alpha, beta) arm.
//!
//! Angles are carried as plain `f64` degrees through the hot path (see
//! `crates/angle`'s doc comment for why), and only wrapped into an
//! `angle::Angle` at the boundary where a caller needs a validated value.

use kaiju_geometry::Point3;

use crate::config::ArmTemplateConfig;
use crate::errors::ReachError;

/// Inverse kinematics: the `(x, y)` a fiber should land at, mapped to
/// `(alpha_deg, beta_deg)` via the law of cosines. `alpha` is wrapped to
/// `[0, 360)`. Fails with [`ReachError`] when `hypot(x, y)` falls outside
/// `[min_reach, max_reach]`.
pub fn alpha_beta_from_xy(x: f64, y: f64, arm: &ArmTemplateConfig) -> Result<(f64, f64), ReachError> {
    let xy_mag = x.hypot(y);
    let min_reach = arm.min_reach();
    let max_reach = arm.max_reach();

    if !(min_reach..=max_reach).contains(&xy_mag) {
        return Err(ReachError {
            x,
            y,
            radius: xy_mag,
            min_reach,
            max_reach,
        });
    }

    let a = arm.alpha_arm_len;
    let b = arm.beta_arm_len;

    let alpha_ang_rad = ((-b * b + a * a + xy_mag * xy_mag) / (2.0 * a * xy_mag)).acos();
    let gamma_ang_rad = ((-xy_mag * xy_mag + a * a + b * b) / (2.0 * a * b)).acos();

    let beta_ang_rad = std::f64::consts::PI - gamma_ang_rad;
    let beta_ang_deg = beta_ang_rad.to_degrees();

    let rot_ang = y.atan2(x);
    let alpha_ang_rad = -alpha_ang_rad + rot_ang;
    let alpha_ang_deg = angle::Angle::wrap_degrees(alpha_ang_rad.to_degrees());

    Ok((alpha_ang_deg, beta_ang_deg))
}

/// The two-point collision chord and fiber position derived from
/// `(alpha_deg, beta_deg)`: the full beta-arm polyline vertices, rotated
/// by beta about the beta origin, translated by the alpha arm, rotated by
/// alpha, and translated by the robot's fixed `(x_pos, y_pos)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Chord endpoints: the alpha-arm tip (start of the beta template, in
    /// the alpha-translated frame) and the beta-arm far end.
    pub collision_chord: (Point3, Point3),
    pub fiber_xyz: Point3,
}

/// Forward kinematics: `(alpha_deg, beta_deg)` plus the robot's fixed
/// `(x_pos, y_pos)` to the oriented polyline and fiber position.
#[must_use]
pub fn forward_kinematics(alpha_deg: f64, beta_deg: f64, x_pos: f64, y_pos: f64, arm: &ArmTemplateConfig) -> Pose {
    let alpha_rad = alpha_deg.to_radians();
    let beta_rad = beta_deg.to_radians();
    let trans_xy = Point3::new(x_pos, y_pos, 0.0);
    let alpha_trans = arm.alpha_trans();

    let oriented = |vertex: Point3| -> Point3 {
        let beta_rotated = vertex.rotate_z(beta_rad);
        let alpha_frame = alpha_trans + beta_rotated;
        trans_xy + alpha_frame.rotate_z(alpha_rad)
    };

    let template = arm.beta_template.as_slice();
    let alpha_tip = oriented(Point3::origin());
    let beta_far_end = oriented(*template.last().expect("beta_template has at least two vertices"));
    let fiber_xyz = oriented(arm.fiber_neutral);

    Pose {
        collision_chord: (alpha_tip, beta_far_end),
        fiber_xyz,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn round_trip_alpha_beta_xy() {
        let arm = ArmTemplateConfig::default();
        let (alpha, beta) = alpha_beta_from_xy(10.0, 0.0, &arm).unwrap();
        let pose = forward_kinematics(alpha, beta, 0.0, 0.0, &arm);
        assert_abs_diff_eq!(pose.fiber_xyz.x, 10.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pose.fiber_xyz.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn unreachable_point_errors() {
        let arm = ArmTemplateConfig::default();
        let err = alpha_beta_from_xy(50.0, 0.0, &arm).unwrap_err();
        assert_abs_diff_eq!(err.radius, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn alpha_is_wrapped_nonnegative() {
        let arm = ArmTemplateConfig::default();
        let (alpha, _beta) = alpha_beta_from_xy(-10.0, -1.0, &arm).unwrap();
        assert!((0.0..360.0).contains(&alpha));
    }

    #[test]
    fn folded_pose_places_fiber_along_x() {
        let arm = ArmTemplateConfig::default();
        let pose = forward_kinematics(0.0, 0.0, 0.0, 0.0, &arm);
        assert_abs_diff_eq!(
            pose.fiber_xyz.x,
            arm.alpha_arm_len + arm.fiber_neutral.x,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(pose.fiber_xyz.y, 0.0, epsilon = 1e-9);
    }
}
