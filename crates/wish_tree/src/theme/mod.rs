//! Wish-seeded themes.
//!
//! A [`Theme`] is derived from a wish string with [`generate_theme`]: the wish is hashed,
//! the hash seeds a [`Mulberry32`], and a fixed sequence of draws selects the palette and
//! the tree geometry. Themes are immutable values; a new wish produces a new theme.
use std::fmt;

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{TREE_HEIGHT, TREE_RADIUS_BASE, TREE_SPIRAL_LOOPS};
use crate::seed::{hash, Mulberry32};

pub mod color;
pub mod palette;

pub use color::Rgb;
pub use palette::{palette_by_name, Palette, ThemeColors, DEFAULT_COLORS, PALETTES};

const HEIGHT_MIN: f64 = 10.0;
const HEIGHT_SPAN: f64 = 6.0;
const RADIUS_MIN: f64 = 3.0;
const RADIUS_SPAN: f64 = 3.0;
const LOOPS_MIN: u32 = 10;
const LOOPS_SPAN: u32 = 30;

/// Identity of a theme: the wish it came from, or the neutral startup theme.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ThemeId {
    #[default]
    Default,
    Wish(String),
}

impl ThemeId {
    /// Text hashed when deriving per-group formation seeds.
    ///
    /// The default theme hashes as the empty wish, which never collides with a real wish.
    pub fn seed_text(&self) -> &str {
        match self {
            ThemeId::Default => "",
            ThemeId::Wish(wish) => wish,
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeId::Default => f.write_str("default"),
            ThemeId::Wish(wish) => write!(f, "wish:{wish:?}"),
        }
    }
}

/// Spiral cone parameters of the tree formation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeGeometry {
    /// Height of the cone; the tree spans `-height / 2 ..= height / 2`.
    pub height: f32,
    /// Cone radius at the base.
    pub radius_base: f32,
    /// Half-turns swept over the full height (θ = ratio·π·loops).
    pub spiral_loops: u32,
}

impl Default for TreeGeometry {
    fn default() -> Self {
        Self {
            height: TREE_HEIGHT,
            radius_base: TREE_RADIUS_BASE,
            spiral_loops: TREE_SPIRAL_LOOPS,
        }
    }
}

impl TreeGeometry {
    /// Cone radius at world height `y`: `radius_base` at the base, zero at the apex.
    #[inline]
    pub fn radius_at(&self, y: f32) -> f32 {
        ((self.height - (y + self.height * 0.5)) / self.height) * self.radius_base
    }

    /// Y coordinate of the apex.
    #[inline]
    pub fn apex_y(&self) -> f32 {
        self.height * 0.5
    }
}

/// Render parameters of the star sitting on top of the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarParams {
    pub position: Vec3,
    pub color: Rgb,
    pub size: f32,
    pub emissive_intensity: f32,
}

/// A deterministic set of colors and geometry derived from a wish.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    id: ThemeId,
    palette: Option<usize>,
    colors: ThemeColors,
    geometry: TreeGeometry,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            id: ThemeId::Default,
            palette: None,
            colors: DEFAULT_COLORS,
            geometry: TreeGeometry::default(),
        }
    }
}

impl Theme {
    pub fn id(&self) -> &ThemeId {
        &self.id
    }

    /// Name of the palette the theme was drawn from; `None` for the default theme.
    pub fn palette_name(&self) -> Option<&'static str> {
        self.palette
            .and_then(|index| PALETTES.get(index))
            .map(|p| p.name)
    }

    pub fn colors(&self) -> &ThemeColors {
        &self.colors
    }

    pub fn geometry(&self) -> &TreeGeometry {
        &self.geometry
    }

    /// Seed for building the formation dataset of one entity group.
    ///
    /// `salt` separates groups so that foliage and ornaments draw independent streams.
    pub fn formation_seed(&self, salt: u32) -> u32 {
        hash(self.id.seed_text(), salt)
    }

    /// The star placed half a unit above the apex, glowing in the tip color.
    pub fn star(&self) -> StarParams {
        StarParams {
            position: Vec3::new(0.0, self.geometry.apex_y() + 0.5, 0.0),
            color: self.colors.foliage_tip,
            size: 0.8,
            emissive_intensity: 2.0,
        }
    }
}

/// Derive the theme for `wish`.
///
/// The empty wish yields [`Theme::default`] without touching the generator. Any other
/// string, unicode included, seeds a generator whose draws are consumed in a fixed order:
/// palette index, height, base radius, spiral loop count.
pub fn generate_theme(wish: &str) -> Theme {
    if wish.is_empty() {
        return Theme::default();
    }

    let mut rng = Mulberry32::new(hash(wish, 0));

    let index = ((rng.next_f64() * PALETTES.len() as f64).floor() as usize).min(PALETTES.len() - 1);
    let palette = &PALETTES[index];

    let height = HEIGHT_MIN + rng.next_f64() * HEIGHT_SPAN;
    let radius_base = RADIUS_MIN + rng.next_f64() * RADIUS_SPAN;
    let spiral_loops = LOOPS_MIN + (rng.next_f64() * f64::from(LOOPS_SPAN)).floor() as u32;

    Theme {
        id: ThemeId::Wish(wish.to_owned()),
        palette: Some(index),
        colors: palette.colors,
        geometry: TreeGeometry {
            height: height as f32,
            radius_base: radius_base as f32,
            spiral_loops,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_wish_is_default_theme() {
        let theme = generate_theme("");
        assert_eq!(theme, Theme::default());
        assert_eq!(theme.id(), &ThemeId::Default);
        assert_eq!(theme.palette_name(), None);
        assert_eq!(theme.colors().foliage_base, Rgb::from_hex(0x001a10));
        assert_eq!(theme.colors().foliage_tip, Rgb::from_hex(0xFFD700));
        assert_eq!(theme.colors().ornament_sphere, Rgb::from_hex(0xFFD700));
        assert_eq!(theme.colors().ornament_box, Rgb::from_hex(0x8B0000));
        assert_eq!(theme.geometry().height, 12.0);
        assert_eq!(theme.geometry().radius_base, 4.5);
        assert_eq!(theme.geometry().spiral_loops, 20);
    }

    #[test]
    fn peace_golden_fixture() {
        let theme = generate_theme("peace");
        assert_eq!(theme.id(), &ThemeId::Wish("peace".into()));
        assert_eq!(theme.palette_name(), Some("Sunset"));
        assert_eq!(theme.colors(), &PALETTES[4].colors);
        assert_close(theme.geometry().height, 12.664_112);
        assert_close(theme.geometry().radius_base, 4.791_745);
        assert_eq!(theme.geometry().spiral_loops, 27);
    }

    #[test]
    fn other_fixtures() {
        let a = generate_theme("a");
        assert_eq!(a.palette_name(), Some("Mystery"));
        assert_close(a.geometry().height, 13.637_906);
        assert_close(a.geometry().radius_base, 3.542_647);
        assert_eq!(a.geometry().spiral_loops, 33);

        let snow = generate_theme("雪");
        assert_eq!(snow.palette_name(), Some("Romance"));
        assert_eq!(snow.geometry().spiral_loops, 35);
    }

    #[test]
    fn deterministic_bit_for_bit() {
        for wish in ["peace", "love", "a longer wish with spaces", "🎄 joy"] {
            let a = generate_theme(wish);
            let b = generate_theme(wish);
            assert_eq!(a.colors(), b.colors());
            assert_eq!(a.geometry().height.to_bits(), b.geometry().height.to_bits());
            assert_eq!(
                a.geometry().radius_base.to_bits(),
                b.geometry().radius_base.to_bits()
            );
            assert_eq!(a.geometry().spiral_loops, b.geometry().spiral_loops);
        }
    }

    #[test]
    fn geometry_stays_in_documented_ranges() {
        for i in 0..500 {
            let theme = generate_theme(&format!("wish number {i}"));
            let g = theme.geometry();
            assert!((10.0..=16.0).contains(&g.height));
            assert!((3.0..=6.0).contains(&g.radius_base));
            assert!((10..40).contains(&g.spiral_loops));
            assert!(theme.palette_name().is_some());
        }
    }

    #[test]
    fn all_palettes_are_reachable() {
        let mut seen = [false; PALETTES.len()];
        for i in 0..200 {
            let theme = generate_theme(&format!("w{i}"));
            let name = theme.palette_name().unwrap();
            let idx = PALETTES.iter().position(|p| p.name == name).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn formation_seed_differs_per_group_and_wish() {
        let peace = generate_theme("peace");
        let love = generate_theme("love");
        assert_ne!(peace.formation_seed(1), peace.formation_seed(2));
        assert_ne!(peace.formation_seed(1), love.formation_seed(1));
        assert_eq!(Theme::default().formation_seed(3), hash("", 3));
    }

    #[test]
    fn star_sits_above_apex_in_tip_color() {
        let theme = generate_theme("peace");
        let star = theme.star();
        assert_close(star.position.y, theme.geometry().height / 2.0 + 0.5);
        assert_eq!(star.color, theme.colors().foliage_tip);
    }

    #[test]
    fn radius_at_base_and_apex() {
        let g = TreeGeometry::default();
        assert_close(g.radius_at(-6.0), 4.5);
        assert_close(g.radius_at(6.0), 0.0);
        assert_close(g.radius_at(0.0), 2.25);
    }
}
