use nalgebra::{Point3, Vector3};
use rand::Rng;
use std::f64::consts::{PI, TAU};

/// Displacement of a single bond of length `bond_length` pointing along the
/// spherical direction `(zenith, azimuth)`.
///
/// The zenith is measured from the xy-plane, so a zero zenith and zero azimuth
/// point along +x.
#[inline]
pub fn bond_vector(zenith: f64, azimuth: f64, bond_length: f64) -> Vector3<f64> {
    let (sin_z, cos_z) = zenith.sin_cos();
    let (sin_a, cos_a) = azimuth.sin_cos();
    Vector3::new(cos_a * cos_z, sin_a * cos_z, sin_z) * bond_length
}

/// Builds absolute residue positions from per-residue spherical angles.
///
/// Residue 0 sits at `origin`. The angle pair stored at index `i - 1` defines the bond
/// leading into residue `i`, so the angles at the last index never contribute.
///
/// # Arguments
///
/// * `origin` - Position of the first residue.
/// * `zenith` - Zenith angle of every residue, in radians.
/// * `azimuth` - Azimuth angle of every residue, in radians.
/// * `bond_length` - Distance between consecutive residues.
///
/// # Return
///
/// One position per residue, in chain order. Empty input gives an empty vector.
pub fn positions(
    origin: Point3<f64>,
    zenith: &[f64],
    azimuth: &[f64],
    bond_length: f64,
) -> Vec<Point3<f64>> {
    debug_assert_eq!(zenith.len(), azimuth.len());
    let length = zenith.len().min(azimuth.len());
    if length == 0 {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(length);
    result.push(origin);
    for i in 1..length {
        let previous = result[i - 1];
        result.push(previous + bond_vector(zenith[i - 1], azimuth[i - 1], bond_length));
    }
    result
}

#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (b - a).norm()
}

/// Angle between two consecutive bond directions given as `(zenith, azimuth)` pairs,
/// using the great-circle (spherical law of cosines) formula.
///
/// The incoming direction is shifted by `-π` in both angles before the formula is
/// applied. The cosine is clamped to `[-1, 1]` so exactly parallel or antiparallel
/// directions give `0` or `π` instead of `NaN`.
pub fn relative_angle(zenith_0: f64, azimuth_0: f64, zenith_1: f64, azimuth_1: f64) -> f64 {
    let theta_0 = zenith_0 - PI;
    let phi_0 = azimuth_0 - PI;
    let cosine = theta_0.sin() * zenith_1.sin()
        + theta_0.cos() * zenith_1.cos() * (azimuth_1 - phi_0).cos();
    cosine.clamp(-1.0, 1.0).acos()
}

/// Wraps an angle into `(-π, π]`.
///
/// Angles produced by a single perturbation are at most one turn out of range and are
/// corrected by one `±2π` shift. Anything further out falls back to a euclidean
/// remainder so the result is always in range.
pub fn reduce_angle(angle: f64) -> f64 {
    let reduced = if angle > PI {
        angle - TAU
    } else if angle <= -PI {
        angle + TAU
    } else {
        angle
    };

    if reduced > PI || reduced <= -PI {
        let wrapped = (angle + PI).rem_euclid(TAU) - PI;
        if wrapped <= -PI { wrapped + TAU } else { wrapped }
    } else {
        reduced
    }
}

/// Uniform random angle in `[-π, π)`.
#[inline]
pub fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-PI..PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::FRAC_PI_2;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn random_angles(n: usize, rng: &mut StdRng) -> (Vec<f64>, Vec<f64>) {
        let zenith = (0..n).map(|_| random_angle(rng)).collect();
        let azimuth = (0..n).map(|_| random_angle(rng)).collect();
        (zenith, azimuth)
    }

    #[test]
    fn bond_vector_with_zero_angles_points_along_x() {
        let v = bond_vector(0.0, 0.0, 2.0);
        assert!(f64_approx_equal(v.x, 2.0));
        assert!(f64_approx_equal(v.y, 0.0));
        assert!(f64_approx_equal(v.z, 0.0));
    }

    #[test]
    fn bond_vector_with_right_angle_zenith_points_along_z() {
        let v = bond_vector(FRAC_PI_2, 1.3, 1.0);
        assert!(f64_approx_equal(v.x, 0.0));
        assert!(f64_approx_equal(v.y, 0.0));
        assert!(f64_approx_equal(v.z, 1.0));
    }

    #[test]
    fn positions_of_straight_chain_lie_on_x_axis() {
        let pos = positions(Point3::origin(), &[0.0; 4], &[0.0; 4], 1.5);
        assert_eq!(pos.len(), 4);
        for (i, p) in pos.iter().enumerate() {
            assert!(f64_approx_equal(p.x, 1.5 * i as f64));
            assert!(f64_approx_equal(p.y, 0.0));
            assert!(f64_approx_equal(p.z, 0.0));
        }
    }

    #[test]
    fn positions_first_residue_is_origin() {
        let origin = Point3::new(1.0, -2.0, 3.0);
        let pos = positions(origin, &[0.3, -1.1], &[2.0, 0.4], 1.0);
        assert_eq!(pos[0], origin);
    }

    #[test]
    fn positions_ignore_angles_of_last_residue() {
        let a = positions(Point3::origin(), &[0.2, 0.7, 0.0], &[0.1, -0.4, 0.0], 1.0);
        let b = positions(Point3::origin(), &[0.2, 0.7, 2.5], &[0.1, -0.4, -3.0], 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn positions_of_empty_input_is_empty() {
        assert!(positions(Point3::origin(), &[], &[], 1.0).is_empty());
    }

    #[test]
    fn positions_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(7);
        let (zenith, azimuth) = random_angles(20, &mut rng);
        let first = positions(Point3::origin(), &zenith, &azimuth, 1.0);
        let second = positions(Point3::origin(), &zenith, &azimuth, 1.0);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.x.to_bits(), b.x.to_bits());
            assert_eq!(a.y.to_bits(), b.y.to_bits());
            assert_eq!(a.z.to_bits(), b.z.to_bits());
        }
    }

    #[test]
    fn positions_preserve_bond_length_for_arbitrary_angles() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let (zenith, azimuth) = random_angles(15, &mut rng);
            let pos = positions(Point3::origin(), &zenith, &azimuth, 2.5);
            for pair in pos.windows(2) {
                assert!((distance(&pair[0], &pair[1]) - 2.5).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn distance_is_euclidean_norm() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 6.0, 3.0);
        assert!(f64_approx_equal(distance(&a, &b), 5.0));
        assert!(f64_approx_equal(distance(&b, &a), 5.0));
    }

    #[test]
    fn relative_angle_of_aligned_directions_is_zero() {
        assert!(f64_approx_equal(relative_angle(0.0, 0.0, 0.0, 0.0), 0.0));
        assert!(relative_angle(0.0, -1.2, 0.0, -1.2).abs() < 1e-6);
    }

    #[test]
    fn relative_angle_of_opposite_directions_is_pi() {
        let angle = relative_angle(0.0, 0.0, 0.0, PI);
        assert!((angle - PI).abs() < 1e-6);
        let angle = relative_angle(0.0, -FRAC_PI_2, 0.0, FRAC_PI_2);
        assert!((angle - PI).abs() < 1e-6);
        assert!(!angle.is_nan());
    }

    #[test]
    fn relative_angle_is_symmetric_in_its_arguments() {
        let a = relative_angle(0.3, 1.1, -0.8, 2.4);
        let b = relative_angle(-0.8, 2.4, 0.3, 1.1);
        assert!(f64_approx_equal(a, b));
    }

    #[test]
    fn relative_angle_of_perpendicular_directions_is_right_angle() {
        let angle = relative_angle(0.0, 0.0, 0.0, FRAC_PI_2);
        assert!(f64_approx_equal(angle, FRAC_PI_2));
    }

    #[test]
    fn relative_angle_stays_in_range_for_random_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let angle = relative_angle(
                random_angle(&mut rng) * 3.0,
                random_angle(&mut rng) * 3.0,
                random_angle(&mut rng) * 3.0,
                random_angle(&mut rng) * 3.0,
            );
            assert!((0.0..=PI).contains(&angle));
        }
    }

    #[test]
    fn reduce_angle_wraps_one_turn_out_of_range() {
        assert!(f64_approx_equal(reduce_angle(PI + 0.5), -PI + 0.5));
        assert!(f64_approx_equal(reduce_angle(-PI - 0.5), PI - 0.5));
        assert!(f64_approx_equal(reduce_angle(1.0), 1.0));
    }

    #[test]
    fn reduce_angle_maps_minus_pi_to_pi() {
        assert_eq!(reduce_angle(-PI), PI);
        assert_eq!(reduce_angle(PI), PI);
    }

    #[test]
    fn reduce_angle_handles_multiple_turns() {
        let reduced = reduce_angle(7.0 * PI + 0.25);
        assert!((reduced - (-PI + 0.25)).abs() < 1e-9);
        let reduced = reduce_angle(-100.0);
        assert!(reduced > -PI && reduced <= PI);
        assert!(((reduced - -100.0) / TAU - ((reduced - -100.0) / TAU).round()).abs() < 1e-9);
    }

    #[test]
    fn reduce_angle_is_idempotent_and_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let x: f64 = rng.gen_range(-50.0..50.0);
            let once = reduce_angle(x);
            assert!(once > -PI && once <= PI, "{x} reduced to {once}");
            assert_eq!(reduce_angle(once), once);
        }
    }

    #[test]
    fn random_angle_is_in_half_open_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            let angle = random_angle(&mut rng);
            assert!((-PI..PI).contains(&angle));
        }
    }
}
