//! cyrb53-style string hash.
//!
//! Two 32-bit accumulators are fed every UTF-16 code unit of the input with
//! multiply-xor rounds and cross-mixed at the end. Code units are hashed, not UTF-8 bytes;
//! switching would move every non-ASCII wish to a different theme.

const H1_INIT: u32 = 0xdead_beef;
const H2_INIT: u32 = 0x41c6_ce57;
const H1_MUL: u32 = 2_654_435_761;
const H2_MUL: u32 = 1_597_334_677;
const FINAL_MUL_A: u32 = 2_246_822_507;
const FINAL_MUL_B: u32 = 3_266_489_909;

/// Mask keeping the 21 high bits contributed by the second accumulator.
const HIGH_MASK: u32 = 0x1f_ffff;

#[inline]
fn accumulate(text: &str, seed: u32) -> (u32, u32) {
    let mut h1 = H1_INIT ^ seed;
    let mut h2 = H2_INIT ^ seed;

    for unit in text.encode_utf16() {
        let ch = u32::from(unit);
        h1 = (h1 ^ ch).wrapping_mul(H1_MUL);
        h2 = (h2 ^ ch).wrapping_mul(H2_MUL);
    }

    h1 = (h1 ^ (h1 >> 16)).wrapping_mul(FINAL_MUL_A) ^ (h2 ^ (h2 >> 13)).wrapping_mul(FINAL_MUL_B);
    h2 = (h2 ^ (h2 >> 16)).wrapping_mul(FINAL_MUL_A) ^ (h1 ^ (h1 >> 13)).wrapping_mul(FINAL_MUL_B);
    (h1, h2)
}

/// Hash `text` into a 32-bit seed.
///
/// This is the low word of [`hash53`] and the value fed to [`super::Mulberry32`].
/// The empty string is valid and hashes to a fixed value.
pub fn hash(text: &str, seed: u32) -> u32 {
    accumulate(text, seed).0
}

/// Hash `text` into the full 53-bit value (fits losslessly into an `f64` mantissa).
pub fn hash53(text: &str, seed: u32) -> u64 {
    let (h1, h2) = accumulate(text, seed);
    (u64::from(h2 & HIGH_MASK) << 32) | u64::from(h1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(hash53("a", 0), 7_929_297_801_672_961);
        assert_eq!(hash("a", 0), 2_194_241_793);
        assert_eq!(hash53("", 0), 3_338_908_027_751_811);
        assert_eq!(hash("", 0), 451_841_411);
        assert_eq!(hash("peace", 0), 2_466_467_776);
    }

    #[test]
    fn low_word_matches_hash53() {
        for text in ["", "a", "peace", "merry christmas", "雪"] {
            assert_eq!(hash53(text, 7) as u32, hash(text, 7));
            assert!(hash53(text, 7) < (1u64 << 53));
        }
    }

    #[test]
    fn deterministic_and_seed_sensitive() {
        assert_eq!(hash("snow", 0), hash("snow", 0));
        assert_ne!(hash("snow", 0), hash("snow", 1));
        assert_ne!(hash("a", 0), hash("b", 0));
    }

    #[test]
    fn hashes_utf16_code_units() {
        // U+1F384 and U+1F385 share their high surrogate and differ only in the low one.
        assert_ne!(hash("\u{1F384}", 0), hash("\u{1F385}", 0));
        assert_eq!(hash("雪", 0), 3_698_020_939);
    }

    #[test]
    fn single_character_changes_avalanche() {
        // Flip one character at a time and count differing output bits; an ideal hash
        // averages 16 of 32.
        let base = "make a wish for snowy nights";
        let mut total_bits = 0u32;
        let mut pairs = 0u32;
        for (i, _) in base.char_indices() {
            for replacement in ['x', 'Q', '7'] {
                let mut changed = String::with_capacity(base.len());
                changed.push_str(&base[..i]);
                changed.push(replacement);
                changed.push_str(&base[i + 1..]);
                if changed == base {
                    continue;
                }
                total_bits += (hash(base, 0) ^ hash(&changed, 0)).count_ones();
                pairs += 1;
            }
        }
        let mean = total_bits as f64 / pairs as f64;
        assert!(
            (12.0..=20.0).contains(&mean),
            "mean differing bits {mean} is far from 16"
        );
    }

    #[test]
    fn output_bits_are_balanced() {
        let mut ones = [0u32; 32];
        let n = 4096;
        for i in 0..n {
            let h = hash(&format!("wish-{i}"), 0);
            for (bit, count) in ones.iter_mut().enumerate() {
                *count += (h >> bit) & 1;
            }
        }
        for (bit, count) in ones.iter().enumerate() {
            let ratio = *count as f64 / n as f64;
            assert!((0.45..=0.55).contains(&ratio), "bit {bit} set ratio {ratio}");
        }
    }
}
