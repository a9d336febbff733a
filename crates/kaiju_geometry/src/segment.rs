use crate::point::Point3;

/// Below this determinant the two segments are treated as parallel; the
/// closest-approach parameter on the first segment is forced to `s = 0`
/// to avoid dividing by (near) zero. Matches the original C++ kernel's
/// `SMALL_NUM` guard.
const PARALLEL_EPSILON: f64 = 1e-8;

/// Squared distance between the closest points of two line segments
/// `(p0, p1)` and `(q0, q1)`, via the standard clamped-parametric
/// closest-approach construction (Eberly / Sunday "dist3D_Segment_to_Segment").
#[must_use]
pub fn segment_segment_dist2(p0: Point3, p1: Point3, q0: Point3, q1: Point3) -> f64 {
    let u = p1 - p0;
    let v = q1 - q0;
    let w = p0 - q0;

    let a = u.dot(&u);
    let b = u.dot(&v);
    let c = v.dot(&v);
    let d = u.dot(&w);
    let e = v.dot(&w);
    let det = a * c - b * b;

    let (mut sn, mut sd) = (0.0, det);
    let (mut tn, mut td) = (0.0, det);

    if det < PARALLEL_EPSILON {
        // Segments are (nearly) parallel: pin the first segment's
        // parameter to its start point and fall back to point-to-line.
        sn = 0.0;
        sd = 1.0;
        tn = e;
        td = c;
    } else {
        sn = b * e - c * d;
        tn = a * e - b * d;
        if sn < 0.0 {
            sn = 0.0;
            tn = e;
            td = c;
        } else if sn > sd {
            sn = sd;
            tn = e + b;
            td = c;
        }
    }

    if tn < 0.0 {
        tn = 0.0;
        if -d < 0.0 {
            sn = 0.0;
        } else if -d > a {
            sn = sd;
        } else {
            sn = -d;
            sd = a;
        }
    } else if tn > td {
        tn = td;
        if -d + b < 0.0 {
            sn = 0.0;
        } else if -d + b > a {
            sn = sd;
        } else {
            sn = -d + b;
            sd = a;
        }
    }

    let sc = if sn.abs() < PARALLEL_EPSILON { 0.0 } else { sn / sd };
    let tc = if tn.abs() < PARALLEL_EPSILON { 0.0 } else { tn / td };

    let dp = w + u * sc - v * tc;
    dp.squared_norm()
}

/// Squared distance from point `p` to segment `(q0, q1)`. Special case of
/// [`segment_segment_dist2`] with a degenerate zero-length "segment" at `p`,
/// but implemented directly to avoid the divide-by-near-zero path that a
/// zero-length segment would trigger in the general solver.
#[must_use]
pub fn point_segment_dist2(p: Point3, q0: Point3, q1: Point3) -> f64 {
    let v = q1 - q0;
    let w = p - q0;
    let vv = v.dot(&v);
    if vv < PARALLEL_EPSILON {
        // q0 == q1: distance to that single point.
        return w.squared_norm();
    }
    let t = (w.dot(&v) / vv).clamp(0.0, 1.0);
    let closest = q0 + v * t;
    (p - closest).squared_norm()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn parallel_segments() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let q0 = Point3::new(0.0, 2.0, 0.0);
        let q1 = Point3::new(1.0, 2.0, 0.0);
        assert_abs_diff_eq!(segment_segment_dist2(p0, p1, q0, q1), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn crossing_segments_touch() {
        let p0 = Point3::new(-1.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let q0 = Point3::new(0.0, -1.0, 0.0);
        let q1 = Point3::new(0.0, 1.0, 0.0);
        assert_abs_diff_eq!(segment_segment_dist2(p0, p1, q0, q1), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn skew_segments_endpoint_closest() {
        let p0 = Point3::new(0.0, 0.0, 0.0);
        let p1 = Point3::new(1.0, 0.0, 0.0);
        let q0 = Point3::new(3.0, 0.0, 0.0);
        let q1 = Point3::new(4.0, 0.0, 0.0);
        // closest points are p1 and q0, distance 2
        assert_abs_diff_eq!(segment_segment_dist2(p0, p1, q0, q1), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn point_segment_perpendicular() {
        let p = Point3::new(0.0, 3.0, 0.0);
        let q0 = Point3::new(-5.0, 0.0, 0.0);
        let q1 = Point3::new(5.0, 0.0, 0.0);
        assert_abs_diff_eq!(point_segment_dist2(p, q0, q1), 9.0, epsilon = 1e-9);
    }

    #[test]
    fn point_segment_clamped_to_endpoint() {
        let p = Point3::new(10.0, 0.0, 0.0);
        let q0 = Point3::new(-5.0, 0.0, 0.0);
        let q1 = Point3::new(5.0, 0.0, 0.0);
        assert_abs_diff_eq!(point_segment_dist2(p, q0, q1), 25.0, epsilon = 1e-9);
    }

    #[test]
    fn degenerate_segment_is_a_point() {
        let p = Point3::new(3.0, 4.0, 0.0);
        let q0 = Point3::new(0.0, 0.0, 0.0);
        assert_abs_diff_eq!(point_segment_dist2(p, q0, q0), 25.0, epsilon = 1e-9);
    }
}
