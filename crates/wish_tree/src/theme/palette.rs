//! The fixed, ordered palette list wishes select from.
//!
//! Order is part of the wish-to-theme mapping: inserting or reordering entries changes
//! which palette every existing wish resolves to.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::theme::color::Rgb;

/// The four colors a theme paints the scene with.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub foliage_base: Rgb,
    pub foliage_tip: Rgb,
    pub ornament_sphere: Rgb,
    pub ornament_box: Rgb,
}

/// A named palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: ThemeColors,
}

const fn palette(name: &'static str, base: u32, tip: u32, sphere: u32, ornament_box: u32) -> Palette {
    Palette {
        name,
        colors: ThemeColors {
            foliage_base: Rgb::from_hex(base),
            foliage_tip: Rgb::from_hex(tip),
            ornament_sphere: Rgb::from_hex(sphere),
            ornament_box: Rgb::from_hex(ornament_box),
        },
    }
}

pub const PALETTES: [Palette; 5] = [
    palette("Classic", 0x001a10, 0xFFD700, 0xFFD700, 0x8B0000),
    palette("Frozen", 0x001133, 0xaaddff, 0xffffff, 0x004488),
    palette("Romance", 0x1a0010, 0xffbbaa, 0xff88aa, 0x550022),
    palette("Mystery", 0x110022, 0xcc88ff, 0xaa00ff, 0x440066),
    palette("Sunset", 0x220a00, 0xffaa00, 0xff5500, 0x661100),
];

/// Colors of the default (no wish) theme.
pub const DEFAULT_COLORS: ThemeColors = ThemeColors {
    foliage_base: Rgb::from_hex(0x001a10),
    foliage_tip: Rgb::from_hex(0xFFD700),
    ornament_sphere: Rgb::from_hex(0xFFD700),
    ornament_box: Rgb::from_hex(0x8B0000),
};

/// Look up a palette by name, ignoring ASCII case.
pub fn palette_by_name(name: &str) -> Option<&'static Palette> {
    PALETTES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
