//! Deterministic seeding: string hashing and a small seeded generator.
//!
//! Everything derived from a wish (palette, tree geometry, formation datasets) flows
//! through these two primitives, so their outputs must never change between releases.
pub mod hash;
pub mod rng;

pub use hash::{hash, hash53};
pub use rng::Mulberry32;

/// Convert a raw `u32` draw into a float in [0, 1).
#[inline]
pub fn unit_f64(bits: u32) -> f64 {
    f64::from(bits) / 4_294_967_296.0
}

/// Draw a float in [0, 1) from any [`rand::RngCore`].
///
/// The division happens in `f64`; narrowing to `f32` could otherwise round values just
/// below one up to exactly `1.0`.
#[inline]
pub(crate) fn rand01(rng: &mut dyn rand::RngCore) -> f32 {
    let v = unit_f64(rng.next_u32()) as f32;
    if v >= 1.0 {
        ONE_BELOW
    } else {
        v
    }
}

/// Largest `f32` strictly below `1.0`.
pub(crate) const ONE_BELOW: f32 = 1.0 - f32::EPSILON / 2.0;

#[cfg(test)]
mod tests {
    use rand::RngCore;

    use super::*;

    struct FixedRng {
        value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    #[test]
    fn unit_f64_bounds() {
        assert_eq!(unit_f64(0), 0.0);
        assert!(unit_f64(u32::MAX) < 1.0);
        assert!((unit_f64(u32::MAX / 2) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn rand01_stays_below_one_for_max_input() {
        let mut rng = FixedRng { value: u32::MAX };
        let v = rand01(&mut rng);
        assert!(v < 1.0);
        assert!(v > 0.999);
    }

    #[test]
    fn rand01_zero_for_zero_input() {
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand01(&mut rng), 0.0);
    }
}
