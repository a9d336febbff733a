use rand::Rng;
use unit_interval::UnitInterval;

/// Sample `(x, y)` uniformly over the area of the annulus
/// `r_min <= hypot(x, y) <= r_max`, via
/// `r = sqrt((r_max^2 - r_min^2) * u + r_min^2)`, `theta = 2*pi*v`.
///
/// <https://ridlow.wordpress.com/2014/10/22/uniform-random-points-in-disk-annulus-ring-cylinder-and-sphere/>
#[must_use]
pub fn sample_annulus(r_min: f64, r_max: f64, rng: &mut impl Rng) -> (f64, f64) {
    let u = UnitInterval::new(rng.gen_range(0.0..=1.0)).expect("gen_range(0.0..=1.0) is in bounds");
    let v = UnitInterval::new(rng.gen_range(0.0..=1.0)).expect("gen_range(0.0..=1.0) is in bounds");

    let r = ((r_max * r_max - r_min * r_min) * u.get() + r_min * r_min).sqrt();
    let theta = v.get() * std::f64::consts::TAU;
    (r * theta.cos(), r * theta.sin())
}
