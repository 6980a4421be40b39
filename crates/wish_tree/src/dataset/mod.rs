//! Per-group formation datasets.
//!
//! A dataset is an arena of per-entity records holding both target positions and the
//! random attributes used for motion variation. Datasets are built in one pass from a
//! [`Theme`] and never patched: a theme change produces a fresh [`Formations`] value that
//! replaces the previous one wholesale.
use std::num::NonZeroUsize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SceneConfig;
use crate::error::{Error, Result};
use crate::seed::Mulberry32;
use crate::theme::{Theme, ThemeId};

pub mod foliage;
pub mod ornament;

pub use foliage::{build_foliage, FoliageDataset, FoliageParticle};
pub use ornament::{
    build_ornaments, Ornament, OrnamentDataset, OrnamentKind, OrnamentMaterial, OrnamentShape,
};

/// Seed salt of the foliage group.
pub const FOLIAGE_SALT: u32 = 1;
/// Seed salt of the sphere ornament group.
pub const SPHERE_SALT: u32 = 2;
/// Seed salt of the box ornament group.
pub const BOX_SALT: u32 = 3;

/// A validated, non-zero entity count.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityCount(NonZeroUsize);

impl EntityCount {
    /// Validates `count`, rejecting zero.
    pub fn new(count: usize) -> Result<Self> {
        NonZeroUsize::new(count)
            .map(Self)
            .ok_or_else(|| Error::InvalidConfig("entity count must be > 0".into()))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for EntityCount {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<EntityCount> for usize {
    fn from(value: EntityCount) -> Self {
        value.get()
    }
}

/// Fixed-size arena of entity records built for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct FormationDataset<E> {
    theme_id: ThemeId,
    entities: Vec<E>,
}

impl<E> FormationDataset<E> {
    pub(crate) fn new(theme_id: ThemeId, entities: Vec<E>) -> Self {
        Self { theme_id, entities }
    }

    /// Identity of the theme the dataset was built for.
    pub fn theme_id(&self) -> &ThemeId {
        &self.theme_id
    }

    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entities.iter()
    }
}

impl<'a, E> IntoIterator for &'a FormationDataset<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

/// All datasets of a scene, built together for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Formations {
    pub foliage: FoliageDataset,
    pub spheres: OrnamentDataset,
    pub boxes: OrnamentDataset,
}

impl Formations {
    /// Builds every group for `theme`, each from its own seeded generator.
    ///
    /// Identical `(theme, config)` pairs always produce identical datasets.
    pub fn build(theme: &Theme, config: &SceneConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            warn!("Rejected scene config for {}: {}", theme.id(), err);
            return Err(err);
        }

        let foliage = build_foliage(
            theme,
            EntityCount::new(config.foliage_count)?,
            config.scatter_radius,
            &mut Mulberry32::new(theme.formation_seed(FOLIAGE_SALT)),
        );
        let spheres = build_ornaments(
            theme,
            OrnamentKind::Sphere,
            &OrnamentShape::for_kind(OrnamentKind::Sphere),
            EntityCount::new(config.sphere_count)?,
            config.scatter_radius,
            &mut Mulberry32::new(theme.formation_seed(SPHERE_SALT)),
        );
        let boxes = build_ornaments(
            theme,
            OrnamentKind::Box,
            &OrnamentShape::for_kind(OrnamentKind::Box),
            EntityCount::new(config.box_count)?,
            config.scatter_radius,
            &mut Mulberry32::new(theme.formation_seed(BOX_SALT)),
        );

        debug!(
            "Built formations for {}: foliage={} spheres={} boxes={}.",
            theme.id(),
            foliage.len(),
            spheres.len(),
            boxes.len()
        );

        Ok(Self {
            foliage,
            spheres,
            boxes,
        })
    }

    /// Identity of the theme all groups were built for.
    pub fn theme_id(&self) -> &ThemeId {
        self.foliage.theme_id()
    }

    /// The ornament dataset of `kind`.
    pub fn ornaments(&self, kind: OrnamentKind) -> &OrnamentDataset {
        match kind {
            OrnamentKind::Sphere => &self.spheres,
            OrnamentKind::Box => &self.boxes,
        }
    }
}
