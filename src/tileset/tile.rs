use crate::EntityKind;

/// One <tile> of a tileset.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TileDefinition {
    /// ID of tile local to its tileset
    pub id: u32,
    /// Semantic type label. None for unused / reserved tiles.
    pub tile_type: Option<String>,
    pub image: TileImage,
}

impl TileDefinition {

    pub fn tile_type(&self) -> Option<&str> {
        self.tile_type.as_deref()
    }

    pub fn is_type(&self, label: &str) -> bool {
        self.tile_type() == Some(label)
    }

    pub fn entity_kind(&self) -> Option<EntityKind> {
        self.tile_type().and_then(EntityKind::from_label)
    }
}

/// Image of a single tile, as written in the file.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TileImage {
    /// Path relative to the tileset file.
    pub source: String,
    pub width: u32,
    pub height: u32,
}
