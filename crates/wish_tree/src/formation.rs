//! Target formations: the scattered sphere cloud and the spiral cone tree.
use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::RngCore;

use crate::seed::rand01;
use crate::theme::TreeGeometry;

/// Sample a point uniformly distributed inside a sphere of `radius` around the origin.
///
/// The polar angle is drawn as `acos(2u - 1)` so directions do not bunch at the poles, and
/// the distance as `radius * cbrt(v)` so every volume shell gets its share of points.
/// Draw order: azimuth, polar angle, distance.
pub fn scatter_position(rng: &mut dyn RngCore, radius: f32) -> Vec3 {
    let theta = rand01(rng) * TAU;
    let phi = (2.0 * rand01(rng) - 1.0).clamp(-1.0, 1.0).acos();
    let r = radius * rand01(rng).cbrt();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(
        r * sin_phi * cos_theta,
        r * sin_phi * sin_theta,
        r * cos_phi,
    )
}

/// Place a point on the lateral surface of the tree cone.
///
/// `ratio` in [0, 1] sweeps from the base (`y = -height / 2`) to the apex while winding
/// `ratio * PI * spiral_loops` radians around the trunk. `y_offset` shifts the point
/// vertically after the sweep, so the radius is evaluated at the shifted height.
pub fn tree_position(ratio: f32, y_offset: f32, geometry: &TreeGeometry) -> Vec3 {
    let h = geometry.height;
    let y = ratio * h - h * 0.5 + y_offset;
    let r = geometry.radius_at(y);
    let theta = ratio * PI * geometry.spiral_loops as f32;

    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(r * cos_theta, y, r * sin_theta)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::seed::Mulberry32;

    #[test]
    fn scatter_points_stay_inside_radius() {
        let mut rng = StdRng::seed_from_u64(42);
        let radius = 25.0;
        for _ in 0..50_000 {
            let p = scatter_position(&mut rng, radius);
            assert!(p.length() <= radius * (1.0 + 1e-5), "{p:?} outside sphere");
        }
    }

    #[test]
    fn scatter_is_uniform_in_volume() {
        // Uniform volumetric density means (r / R)^3 is uniform on [0, 1).
        let mut rng = Mulberry32::new(7);
        let radius = 10.0;
        let n = 100_000;
        let bins = 10;
        let mut histogram = vec![0usize; bins];
        let mut inner_half = 0usize;
        for _ in 0..n {
            let p = scatter_position(&mut rng, radius);
            let u = (p.length() / radius).powi(3);
            histogram[((u * bins as f32) as usize).min(bins - 1)] += 1;
            if p.length() < radius * 0.5 {
                inner_half += 1;
            }
        }
        let expected = n / bins;
        for (i, count) in histogram.iter().enumerate() {
            let deviation = (*count as f64 - expected as f64).abs() / expected as f64;
            assert!(deviation < 0.05, "bin {i} has {count}, expected ~{expected}");
        }
        // Uniform-in-radius would put half the points inside R/2; uniform-in-volume puts 1/8.
        let fraction = inner_half as f64 / n as f64;
        assert!((fraction - 0.125).abs() < 0.01, "inner fraction {fraction}");
    }

    #[test]
    fn scatter_directions_are_not_polar_biased() {
        let mut rng = Mulberry32::new(99);
        let n = 60_000;
        let mut upper = 0usize;
        let mut near_poles = 0usize;
        for _ in 0..n {
            let dir = scatter_position(&mut rng, 1.0).normalize_or_zero();
            if dir.z > 0.0 {
                upper += 1;
            }
            if dir.z.abs() > 0.9 {
                near_poles += 1;
            }
        }
        // z of a uniform direction is uniform on [-1, 1]: 10% of points have |z| > 0.9.
        assert!((upper as f64 / n as f64 - 0.5).abs() < 0.02);
        assert!((near_poles as f64 / n as f64 - 0.1).abs() < 0.01);
    }

    #[test]
    fn tree_base_height_and_apex_radius() {
        let geometry = TreeGeometry {
            height: 13.5,
            radius_base: 5.0,
            spiral_loops: 17,
        };
        for y_offset in [0.0, 0.75, -1.25] {
            let base = tree_position(0.0, y_offset, &geometry);
            assert_eq!(base.y, -geometry.height / 2.0 + y_offset);
        }

        let apex = tree_position(1.0, 0.0, &geometry);
        assert_eq!(apex.x, 0.0);
        assert_eq!(apex.z, 0.0);
        assert_eq!(apex.y, geometry.height / 2.0);

        let base = tree_position(0.0, 0.0, &geometry);
        assert_eq!(base, Vec3::new(geometry.radius_base, -geometry.height / 2.0, 0.0));
    }

    #[test]
    fn tree_radius_never_grows_with_ratio() {
        let geometry = TreeGeometry::default();
        let mut last = f32::INFINITY;
        for i in 0..=1000 {
            let ratio = i as f32 / 1000.0;
            let p = tree_position(ratio, 0.0, &geometry);
            let radius = Vec3::new(p.x, 0.0, p.z).length();
            assert!(radius <= last + 1e-5, "radius grew at ratio {ratio}");
            assert!((radius - geometry.radius_at(p.y)).abs() < 1e-4);
            last = radius;
        }
    }

    #[test]
    fn tree_spiral_winds_with_loops() {
        let geometry = TreeGeometry {
            height: 12.0,
            radius_base: 4.0,
            spiral_loops: 2,
        };
        // ratio 0.25 with two loops is a quarter of 2π: the point lies on +z.
        let p = tree_position(0.25, 0.0, &geometry);
        assert!(p.x.abs() < 1e-5);
        assert!(p.z > 0.0);
        assert!((p.z - 3.0).abs() < 1e-5);
    }
}
