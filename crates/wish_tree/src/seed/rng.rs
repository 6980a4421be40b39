//! Mulberry32 seeded generator.
use rand::{RngCore, SeedableRng};

use crate::seed::{unit_f64, ONE_BELOW};

const INCREMENT: u32 = 0x6d2b_79f5;

/// Small 32-bit state generator with a fixed, platform independent output sequence.
///
/// State only ever changes through wrapping integer arithmetic, so two generators built
/// from the same seed yield identical streams everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create a generator from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Create a generator seeded by [`super::hash`] of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new(super::hash(text, 0))
    }

    /// Advance and return the next raw 32-bit output.
    #[inline]
    pub fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Advance and return a float uniformly distributed in [0, 1).
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        unit_f64(self.next_raw())
    }

    /// Advance and return an `f32` in [0, 1), clamped below one after narrowing.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_f64() as f32).min(ONE_BELOW)
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.next_raw());
        let hi = u64::from(self.next_raw());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sequence() {
        let mut rng = Mulberry32::new(0);
        assert_eq!(rng.next_raw(), 1_144_304_738);
        assert_eq!(rng.next_raw(), 1_416_247);
        assert_eq!(rng.next_raw(), 958_946_056);

        let mut rng = Mulberry32::new(42);
        let expected = [0.601_103_751_920_163_6, 0.448_290_558_997_541_67, 0.852_465_793_490_409_9];
        for e in expected {
            assert!((rng.next_f64() - e).abs() < 1e-15);
        }
    }

    #[test]
    fn hundred_thousand_draws_stay_in_unit_range() {
        let mut rng = Mulberry32::new(0xC0FFEE);
        for _ in 0..100_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "draw {v} out of [0, 1)");
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Mulberry32::new(2025);
        let mut b = Mulberry32::new(2025);
        for _ in 0..100_000 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }

        let mut c = Mulberry32::new(2026);
        let mut a = Mulberry32::new(2025);
        let differs = (0..16).any(|_| a.next_raw() != c.next_raw());
        assert!(differs);
    }

    #[test]
    fn rng_core_shares_the_raw_stream() {
        let mut a = Mulberry32::new(9);
        let mut b = Mulberry32::new(9);
        assert_eq!(a.next_u32(), b.next_raw());

        let mut bytes = [0u8; 6];
        a.fill_bytes(&mut bytes);
        let first = b.next_raw().to_le_bytes();
        let second = b.next_raw().to_le_bytes();
        assert_eq!(&bytes[..4], &first);
        assert_eq!(&bytes[4..], &second[..2]);
    }

    #[test]
    fn next_f32_never_reaches_one() {
        // Raw output u32::MAX narrows to exactly 1.0 without the clamp.
        let mut rng = Mulberry32::new(0);
        for _ in 0..100_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v), "draw {v} out of [0, 1)");
        }
        assert!((unit_f64(u32::MAX) as f32).min(ONE_BELOW) < 1.0);
    }

    #[test]
    fn seed_bytes_are_little_endian() {
        let mut a = Mulberry32::from_seed(42u32.to_le_bytes());
        let mut b = Mulberry32::new(42);
        assert_eq!(a.next_raw(), b.next_raw());
        assert_eq!(Mulberry32::from_seed([1, 0, 0, 0]), Mulberry32::new(1));
    }

    #[test]
    fn from_text_uses_hash_seed() {
        let mut a = Mulberry32::from_text("peace");
        let mut b = Mulberry32::new(2_466_467_776);
        assert_eq!(a.next_raw(), b.next_raw());
    }
}
