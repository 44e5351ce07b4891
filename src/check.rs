use derive_more::*;
use rayon::prelude::*;
use tracing::instrument;
use crate::tileset::{TileDefinition, TilesetDescriptor};
use crate::{AssetManager, Texture};

/// Outcome of checking one tile's image against its declaration.
#[derive(Display, Clone, Eq, PartialEq, Debug)]
pub enum ImageStatus {
    #[display(fmt="ok")]
    Ok,
    /// The image could not be read.
    #[display(fmt="unreadable: {_0}")]
    Unreadable(String),
    /// The image was read but is not a decodable picture.
    #[display(fmt="undecodable: {_0}")]
    Undecodable(String),
    #[display(fmt="declared {declared:?}, actual {actual:?}")]
    SizeMismatch { declared: (u32, u32), actual: (u32, u32) },
}

/// Check result for a single tile.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ImageCheck {
    pub id: u32,
    pub path: String,
    pub status: ImageStatus,
}

impl ImageCheck {
    pub fn is_ok(&self) -> bool {
        self.status == ImageStatus::Ok
    }
}

/// Loads every tile image through the manager and compares its size to the declared one.
/// Results are in tile order.
#[instrument(skip_all, fields(tileset = %tileset.name))]
pub fn check_images(tileset: &TilesetDescriptor, manager: &AssetManager) -> Vec<ImageCheck> {
    tileset
        .tiles()
        .par_iter()
        .map(|tile| check_image(tileset, tile, manager))
        .collect()
}

fn check_image(tileset: &TilesetDescriptor, tile: &TileDefinition, manager: &AssetManager) -> ImageCheck {
    let path = tileset.image_path(tile);
    let status = match read_texture(&path, manager) {
        Err(status) => status,
        Ok(texture) => {
            let declared = (tile.image.width, tile.image.height);
            let actual = (texture.width(), texture.height());
            if declared == actual {
                ImageStatus::Ok
            }
            else {
                ImageStatus::SizeMismatch { declared, actual }
            }
        },
    };
    if status != ImageStatus::Ok {
        log::warn!("Tile {} image '{}': {}", tile.id, path, status);
    }
    ImageCheck { id: tile.id, path, status }
}

fn read_texture(path: &str, manager: &AssetManager) -> Result<Texture, ImageStatus> {
    let asset_path = manager
        .parse_path(path)
        .map_err(|err| ImageStatus::Unreadable(err.to_string()))?;
    let bytes = manager
        .read(&asset_path)
        .map_err(|err| ImageStatus::Unreadable(err.to_string()))?;
    manager
        .load_bytes::<Texture>(&bytes, &asset_path)
        .map_err(|err| ImageStatus::Undecodable(err.to_string()))
}
