use roxmltree::Document;
use tracing::instrument;
use crate::tileset::parse;
use crate::{join_relative, Asset, AssetLoader, AssetPath, IntMap};
use super::{DuplicatePolicy, InvalidTilePolicy, LoadOptions, SkippedTile, TileDefinition, TsxParseError};

/// Loader for a .tsx file.
/// Outputs a [`TilesetDescriptor`] whose image paths resolve next to the file.
#[derive(Copy, Clone, Default, Debug)]
pub struct TsxLoader {
    pub options: LoadOptions,
}

impl TsxLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }
}

impl AssetLoader for TsxLoader {
    type AssetType = TilesetDescriptor;

    fn load(&self, bytes: &[u8], path: &AssetPath) -> anyhow::Result<TilesetDescriptor> {
        let mut tileset = TilesetDescriptor::load_bytes_with(bytes, &self.options)?;
        tileset.base = path.parent();
        Ok(tileset)
    }

    fn extensions(&self) -> &[&str] {
        &["tsx"]
    }
}

/// A named, immutable collection of tile definitions, addressed by id.
#[derive(Debug)]
pub struct TilesetDescriptor {
    pub name: String,
    pub class: Option<String>,
    pub version: Option<String>,
    pub tiled_version: Option<String>,
    /// Nominal grid cell size. Tile images may be larger or smaller.
    pub tile_width: u32,
    pub tile_height: u32,
    /// Tile count as declared by the file. Not necessarily the number of loaded tiles.
    pub tile_count: Option<u32>,
    pub columns: u32,
    pub grid: Option<Grid>,
    base: Option<String>,
    tiles: Vec<TileDefinition>,
    index: IntMap<u32, usize>,
    skipped: Vec<SkippedTile>,
}

impl TilesetDescriptor {

    /// Parses a tileset with strict [`LoadOptions`].
    pub fn load(source: &str) -> Result<Self, TsxParseError> {
        Self::load_with(source, &LoadOptions::default())
    }

    #[instrument(skip_all)]
    pub fn load_with(source: &str, options: &LoadOptions) -> Result<Self, TsxParseError> {
        let doc = Document::parse(source)?;
        let parsed = parse::Tileset::parse_doc(&doc)?;
        Self::from_parsed(parsed, options)
    }

    pub fn load_bytes_with(bytes: &[u8], options: &LoadOptions) -> Result<Self, TsxParseError> {
        let source = std::str::from_utf8(bytes)?;
        Self::load_with(source, options)
    }

    pub fn from_parsed(parsed: parse::Tileset, options: &LoadOptions) -> Result<Self, TsxParseError> {
        let mut skipped = parsed.rejected;
        if options.invalid_tiles == InvalidTilePolicy::Fail && !skipped.is_empty() {
            let first = skipped.remove(0);
            return Err(first.error);
        }
        for skipped_tile in &skipped {
            log::warn!(
                "Skipping tile at position {} (line {}, id {:?}): {}",
                skipped_tile.position, skipped_tile.line, skipped_tile.id, skipped_tile.error,
            );
        }

        let mut tiles: Vec<TileDefinition> = Vec::with_capacity(parsed.tiles.len());
        let mut index = IntMap::default();
        for entry in parsed.tiles {
            let id = entry.tile.id;
            match index.get(&id).copied() {
                None => {
                    index.insert(id, tiles.len());
                    tiles.push(entry.tile);
                },
                Some(existing) => match options.duplicate_ids {
                    DuplicatePolicy::Reject => return Err(TsxParseError::DuplicateTileId { id }),
                    DuplicatePolicy::LastWins => {
                        log::warn!("Tile id {id} redeclared on line {}, replacing earlier definition", entry.line);
                        tiles[existing] = entry.tile;
                    },
                },
            }
        }

        if let Some(tile_count) = parsed.tile_count {
            if tile_count as usize != tiles.len() {
                log::warn!(
                    "Tileset '{}' declares {} tiles but {} were loaded",
                    parsed.name, tile_count, tiles.len(),
                );
            }
        }
        log::debug!("Loaded tileset '{}' with {} tiles", parsed.name, tiles.len());

        Ok(Self {
            name: parsed.name,
            class: parsed.class,
            version: parsed.version,
            tiled_version: parsed.tiled_version,
            tile_width: parsed.tile_width,
            tile_height: parsed.tile_height,
            tile_count: parsed.tile_count,
            columns: parsed.columns,
            grid: parsed.grid,
            base: None,
            tiles,
            index,
            skipped,
        })
    }

    /// Sets the directory image sources are relative to.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Tile with the given id, if any.
    pub fn lookup(&self, id: u32) -> Option<&TileDefinition> {
        self.index.get(&id).map(|idx| &self.tiles[*idx])
    }

    /// Tiles labeled with the given semantic type, in file order.
    /// An empty label matches nothing; see [`Self::untyped_tiles`].
    pub fn tiles_of_type(&self, tile_type: &str) -> Vec<&TileDefinition> {
        self.tiles
            .iter()
            .filter(|tile| tile.is_type(tile_type))
            .collect()
    }

    /// Tiles without a semantic type, in file order.
    pub fn untyped_tiles(&self) -> Vec<&TileDefinition> {
        self.tiles
            .iter()
            .filter(|tile| tile.tile_type.is_none())
            .collect()
    }

    /// Distinct semantic types, in order of first appearance.
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for tile_type in self.tiles.iter().filter_map(TileDefinition::tile_type) {
            if !types.contains(&tile_type) {
                types.push(tile_type);
            }
        }
        types
    }

    pub fn tiles(&self) -> &[TileDefinition] {
        &self.tiles
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.tiles.iter().map(|tile| tile.id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles dropped while loading with [`InvalidTilePolicy::Skip`].
    pub fn skipped(&self) -> &[SkippedTile] {
        &self.skipped
    }

    /// Path of a tile's image, resolved against the directory of the tileset file.
    pub fn image_path(&self, tile: &TileDefinition) -> String {
        join_relative(self.base.as_deref(), &tile.image.source)
    }
}

impl Asset for TilesetDescriptor {}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum Orientation {
    #[default]
    Orthogonal,
    Isometric,
}

impl Orientation {
    pub fn parse(str: &str) -> Result<Self, TsxParseError> {
        match str {
            "orthogonal" => Ok(Self::Orthogonal),
            "isometric" => Ok(Self::Isometric),
            _ => Err(TsxParseError::InvalidAttributeValue { attribute: "orientation", value: String::from(str) }),
        }
    }
}

/// Grid used for tile alignment in image collection tilesets.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct Grid {
    pub orientation: Orientation,
    pub width: u32,
    pub height: u32,
}
