//! Ornaments: the instance-evaluated groups (spheres and boxes).
use glam::Vec3;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::dataset::{EntityCount, FormationDataset};
use crate::formation::{scatter_position, tree_position};
use crate::seed::rand01;
use crate::theme::{Rgb, Theme};

/// Ornament categories, each animated as its own group.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrnamentKind {
    Sphere,
    Box,
}

impl OrnamentKind {
    pub const ALL: [OrnamentKind; 2] = [OrnamentKind::Sphere, OrnamentKind::Box];

    /// Base mesh size: sphere radius or box edge length.
    pub fn mesh_size(self) -> f32 {
        match self {
            OrnamentKind::Sphere => 0.25,
            OrnamentKind::Box => 0.4,
        }
    }

    /// Surface parameters for rendering this kind under `theme`.
    pub fn material(self, theme: &Theme) -> OrnamentMaterial {
        let colors = theme.colors();
        match self {
            OrnamentKind::Sphere => OrnamentMaterial {
                base_color: colors.ornament_sphere,
                roughness: 0.1,
                metalness: 1.0,
                emissive: colors.ornament_sphere,
                emissive_intensity: 0.2,
            },
            OrnamentKind::Box => OrnamentMaterial {
                base_color: colors.ornament_box,
                roughness: 0.3,
                metalness: 0.4,
                emissive: Rgb::from_hex(0x220000),
                emissive_intensity: 0.2,
            },
        }
    }
}

/// PBR-style surface description for an ornament group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentMaterial {
    pub base_color: Rgb,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
}

/// Tunable distribution of ornament tree positions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentShape {
    /// Exponent applied to the spiral ratio; values above one crowd ornaments toward the base.
    pub ratio_exponent: f32,
    /// Full width of the random angular offset around the trunk, in radians.
    pub angle_spread: f32,
    /// Maximum distance ornaments are pushed outward from the cone surface.
    pub outward_push: f32,
}

impl Default for OrnamentShape {
    fn default() -> Self {
        Self {
            ratio_exponent: 1.0,
            angle_spread: 1.0,
            outward_push: 0.5,
        }
    }
}

impl OrnamentShape {
    /// Default shape of `kind`: boxes settle denser near the base.
    pub fn for_kind(kind: OrnamentKind) -> Self {
        match kind {
            OrnamentKind::Sphere => Self::default(),
            OrnamentKind::Box => Self {
                ratio_exponent: 1.5,
                ..Self::default()
            },
        }
    }
}

/// One ornament instance. Every attribute is fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ornament {
    pub scatter: Vec3,
    pub tree: Vec3,
    /// Angular speed per Euler axis in radians per second, each in [-1, 1).
    pub rotation_speed: Vec3,
    /// Uniform scale in [0.5, 1.5).
    pub scale: f32,
}

/// Dataset of one ornament group.
pub type OrnamentDataset = FormationDataset<Ornament>;

/// Build `count` ornaments of `kind` for `theme`.
///
/// Per ornament the generator is drawn for: the scatter position, the spiral ratio, the
/// angular offset, the outward push, the three rotation speeds and the scale.
pub fn build_ornaments(
    theme: &Theme,
    kind: OrnamentKind,
    shape: &OrnamentShape,
    count: EntityCount,
    scatter_radius: f32,
    rng: &mut dyn RngCore,
) -> OrnamentDataset {
    let geometry = theme.geometry();
    let mut ornaments = Vec::with_capacity(count.get());

    for _ in 0..count.get() {
        let scatter = scatter_position(rng, scatter_radius);

        let ratio = rand01(rng).powf(shape.ratio_exponent);
        let on_cone = tree_position(ratio, 0.0, geometry);

        let angle = on_cone.z.atan2(on_cone.x) + (rand01(rng) - 0.5) * shape.angle_spread;
        let radius = geometry.radius_at(on_cone.y) + rand01(rng) * shape.outward_push;
        let tree = Vec3::new(radius * angle.cos(), on_cone.y, radius * angle.sin());

        let rotation_speed = Vec3::new(
            (rand01(rng) - 0.5) * 2.0,
            (rand01(rng) - 0.5) * 2.0,
            (rand01(rng) - 0.5) * 2.0,
        );
        let scale = 0.5 + rand01(rng);

        ornaments.push(Ornament {
            scatter,
            tree,
            rotation_speed,
            scale,
        });
    }

    trace!(
        "Built {} {:?} ornaments for {}.",
        ornaments.len(),
        kind,
        theme.id()
    );
    FormationDataset::new(theme.id().clone(), ornaments)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::theme::generate_theme;

    fn build(kind: OrnamentKind, count: usize, seed: u64) -> (Theme, OrnamentDataset) {
        let theme = generate_theme("ornaments");
        let mut rng = StdRng::seed_from_u64(seed);
        let dataset = build_ornaments(
            &theme,
            kind,
            &OrnamentShape::for_kind(kind),
            EntityCount::new(count).unwrap(),
            25.0,
            &mut rng,
        );
        (theme, dataset)
    }

    #[test]
    fn ornaments_sit_on_or_just_outside_the_cone() {
        let (theme, dataset) = build(OrnamentKind::Sphere, 500, 3);
        let g = theme.geometry();
        for o in &dataset {
            let horizontal = Vec3::new(o.tree.x, 0.0, o.tree.z).length();
            let cone = g.radius_at(o.tree.y);
            assert!(horizontal >= cone - 1e-4, "ornament inside cone");
            assert!(horizontal <= cone + 0.5 + 1e-4, "ornament pushed too far");
            assert!(o.tree.y >= -g.height / 2.0 - 1e-4 && o.tree.y <= g.height / 2.0 + 1e-4);
        }
    }

    #[test]
    fn random_attributes_in_range() {
        let (_, dataset) = build(OrnamentKind::Box, 500, 8);
        for o in &dataset {
            assert!((0.5..1.5).contains(&o.scale));
            for s in o.rotation_speed.to_array() {
                assert!((-1.0..1.0).contains(&s));
            }
        }
    }

    #[test]
    fn boxes_are_denser_near_the_base() {
        let count = 4000;
        let (theme, spheres) = build(OrnamentKind::Sphere, count, 21);
        let (_, boxes) = build(OrnamentKind::Box, count, 21);
        let mid = 0.0;
        let lower = |d: &OrnamentDataset| d.iter().filter(|o| o.tree.y < mid).count();
        // ratio^1.5 < 0.5 for ratio < 0.63, so ~63% of boxes fall below the middle.
        let sphere_fraction = lower(&spheres) as f64 / count as f64;
        let box_fraction = lower(&boxes) as f64 / count as f64;
        assert!((sphere_fraction - 0.5).abs() < 0.04, "{sphere_fraction}");
        assert!((box_fraction - 0.63).abs() < 0.04, "{box_fraction}");
        assert_eq!(boxes.theme_id(), theme.id());
    }

    #[test]
    fn materials_follow_theme_colors() {
        let theme = generate_theme("peace");
        let sphere = OrnamentKind::Sphere.material(&theme);
        assert_eq!(sphere.base_color, theme.colors().ornament_sphere);
        assert_eq!(sphere.emissive, theme.colors().ornament_sphere);
        let boxes = OrnamentKind::Box.material(&theme);
        assert_eq!(boxes.base_color, theme.colors().ornament_box);
        assert_eq!(boxes.emissive, Rgb::from_hex(0x220000));
        assert!(OrnamentKind::Box.mesh_size() > OrnamentKind::Sphere.mesh_size());
    }
}
