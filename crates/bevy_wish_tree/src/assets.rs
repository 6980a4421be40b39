use core::result::Result;

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::tasks::ConditionalSendFuture;
use serde::{Deserialize, Serialize};
use wish_tree::prelude::SceneConfig;

use crate::{schedule_rebuild, ActiveTheme, FormationJob, WishTreeSettings};

/// Asset describing the scene configuration, loaded from RON files.
///
/// ```ron
/// (
///     scene: (foliage_count: 6000, scatter_radius: 30.0),
///     device_pixel_ratio: Some(2.0),
/// )
/// ```
#[derive(Asset, TypePath, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WishTreeConfigAsset {
    pub scene: SceneConfig,
    pub device_pixel_ratio: Option<f32>,
}

impl WishTreeConfigAsset {
    /// Parse and validate a RON document.
    pub fn from_ron(bytes: &[u8]) -> anyhow::Result<Self> {
        let asset: WishTreeConfigAsset =
            ron::de::from_bytes(bytes).map_err(|e| anyhow::anyhow!(e))?;
        asset.scene.validate()?;
        Ok(asset)
    }
}

/// Config asset whose loads and hot reloads replace [`WishTreeSettings`].
#[derive(Resource, Clone, Debug)]
pub struct WishTreeConfigHandle(pub Handle<WishTreeConfigAsset>);

/// Asset loader for [`WishTreeConfigAsset`] using RON files with `.wishtree` extension.
#[derive(TypePath)]
pub struct WishTreeConfigAssetLoader;

impl AssetLoader for WishTreeConfigAssetLoader {
    type Asset = WishTreeConfigAsset;
    type Settings = ();
    type Error = anyhow::Error;

    fn extensions(&self) -> &[&str] {
        &["wishtree"]
    }

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        Box::pin(async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            WishTreeConfigAsset::from_ron(&bytes)
        })
    }
}

impl FromWorld for WishTreeConfigAssetLoader {
    fn from_world(_: &mut World) -> Self {
        WishTreeConfigAssetLoader
    }
}

pub(crate) fn apply_config_assets(
    mut commands: Commands,
    mut asset_events: MessageReader<AssetEvent<WishTreeConfigAsset>>,
    handle: Option<Res<WishTreeConfigHandle>>,
    assets: Res<Assets<WishTreeConfigAsset>>,
    theme: Res<ActiveTheme>,
    mut settings: ResMut<WishTreeSettings>,
    mut job: ResMut<FormationJob>,
) {
    let Some(handle) = handle else {
        asset_events.clear();
        return;
    };

    let mut reloaded = false;
    for event in asset_events.read() {
        if let AssetEvent::LoadedWithDependencies { id } | AssetEvent::Modified { id } = event {
            reloaded |= *id == handle.0.id();
        }
    }
    if !reloaded {
        return;
    }

    let Some(config) = assets.get(&handle.0) else {
        return;
    };
    if let Err(err) = config.scene.validate() {
        warn!("Ignoring wish tree config {:?}: {}", handle.0, err);
        return;
    }

    settings.scene = config.scene.clone();
    if let Some(device_pixel_ratio) = config.device_pixel_ratio {
        settings.device_pixel_ratio = device_pixel_ratio;
    }
    info!("Wish tree config applied, rebuilding formations.");
    let theme = job.target_theme(&theme);
    schedule_rebuild(&mut commands, &mut job, &settings, theme);
}
