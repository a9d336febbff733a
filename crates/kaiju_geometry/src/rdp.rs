/// Ramer-Douglas-Peucker simplification of a polyline given as `(x, value)`
/// pairs, ordered by `x`. Retains both endpoints; a point survives only if
/// its perpendicular distance to the chord spanning the current range
/// exceeds `epsilon`.
pub fn rdp(points: &[(f64, f64)], epsilon: f64, out: &mut Vec<(f64, f64)>) {
    out.clear();
    if points.is_empty() {
        return;
    }
    if points.len() < 3 {
        out.extend_from_slice(points);
        return;
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    rdp_range(points, 0, points.len() - 1, epsilon, &mut keep);

    out.extend(
        points
            .iter()
            .zip(keep.iter())
            .filter_map(|(p, &k)| k.then_some(*p)),
    );
}

fn rdp_range(points: &[(f64, f64)], first: usize, last: usize, epsilon: f64, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }

    let (x0, y0) = points[first];
    let (x1, y1) = points[last];
    let dx = x1 - x0;
    let dy = y1 - y0;
    let chord_len = dx.hypot(dy);

    let mut farthest_index = first;
    let mut farthest_dist = 0.0_f64;

    for i in (first + 1)..last {
        let (x, y) = points[i];
        let dist = if chord_len < 1e-12 {
            (x - x0).hypot(y - y0)
        } else {
            ((dy * x - dx * y + x1 * y0 - y1 * x0).abs()) / chord_len
        };
        if dist > farthest_dist {
            farthest_dist = dist;
            farthest_index = i;
        }
    }

    if farthest_dist > epsilon {
        keep[farthest_index] = true;
        rdp_range(points, first, farthest_index, epsilon, keep);
        rdp_range(points, farthest_index, last, epsilon, keep);
    }
}

/// Piecewise-linear lookup of `sparse_path` (ordered `(x, value)` pairs) at
/// `x`, clamped to the range of the sparse samples at either end.
#[must_use]
pub fn interpolate(sparse_path: &[(f64, f64)], x: f64) -> f64 {
    assert!(!sparse_path.is_empty(), "interpolate requires at least one point");

    if sparse_path.len() == 1 {
        return sparse_path[0].1;
    }
    if x <= sparse_path[0].0 {
        return sparse_path[0].1;
    }
    if x >= sparse_path[sparse_path.len() - 1].0 {
        return sparse_path[sparse_path.len() - 1].1;
    }

    let idx = sparse_path.partition_point(|&(px, _)| px <= x);
    let (x0, y0) = sparse_path[idx - 1];
    let (x1, y1) = sparse_path[idx];
    let t = (x - x0) / (x1 - x0);
    y0 + t * (y1 - y0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn straight_line_collapses_to_endpoints() {
        let points: Vec<(f64, f64)> = (0..10).map(|i| (f64::from(i), f64::from(i) * 2.0)).collect();
        let mut out = Vec::new();
        rdp(&points, 1e-6, &mut out);
        assert_eq!(out, vec![(0.0, 0.0), (9.0, 18.0)]);
    }

    #[test]
    fn spike_is_retained_above_epsilon() {
        let points = vec![(0.0, 0.0), (1.0, 0.0), (2.0, 5.0), (3.0, 0.0), (4.0, 0.0)];
        let mut out = Vec::new();
        rdp(&points, 0.5, &mut out);
        assert_eq!(out, vec![(0.0, 0.0), (2.0, 5.0), (4.0, 0.0)]);
    }

    #[test]
    fn spike_is_dropped_below_threshold_when_epsilon_large() {
        let points = vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.01), (3.0, 0.0), (4.0, 0.0)];
        let mut out = Vec::new();
        rdp(&points, 1.0, &mut out);
        assert_eq!(out, vec![(0.0, 0.0), (4.0, 0.0)]);
    }

    #[test]
    fn endpoints_always_retained() {
        let points = vec![(0.0, 3.0), (1.0, 3.0), (2.0, 3.0)];
        let mut out = Vec::new();
        rdp(&points, 100.0, &mut out);
        assert_eq!(out.first(), points.first());
        assert_eq!(out.last(), points.last());
    }

    #[test]
    fn interpolate_midpoint() {
        let sparse = vec![(0.0, 0.0), (10.0, 100.0)];
        assert_abs_diff_eq!(interpolate(&sparse, 5.0), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn interpolate_clamps_outside_range() {
        let sparse = vec![(0.0, 1.0), (10.0, 2.0)];
        assert_abs_diff_eq!(interpolate(&sparse, -5.0), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(interpolate(&sparse, 15.0), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn interpolate_single_point() {
        let sparse = vec![(3.0, 7.0)];
        assert_abs_diff_eq!(interpolate(&sparse, 100.0), 7.0, epsilon = 1e-9);
    }
}
