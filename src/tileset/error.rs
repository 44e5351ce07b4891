use std::str::Utf8Error;
use derive_more::*;
use crate::PathSyntaxError;

/// Everything that can go wrong while reading a .tsx file.
#[derive(Error, Display, From, Debug)]
pub enum TsxParseError {
    XmlError(roxmltree::Error),
    #[display(fmt="{_0}")]
    Utf8Error(Utf8Error),
    #[display(fmt="Expected root <tileset>, found <{tag_name}>")]
    #[from(ignore)]
    UnexpectedRoot { tag_name: String },
    #[display(fmt="<tileset> is missing required attribute '{attribute}'")]
    #[from(ignore)]
    MissingTilesetAttribute { attribute: &'static str },
    #[display(fmt="Attribute '{attribute}' of <{element}> is not a non-negative integer: '{value}'")]
    #[from(ignore)]
    InvalidInteger { element: &'static str, attribute: &'static str, value: String },
    #[display(fmt="Unexpected value '{value}' for attribute '{attribute}'")]
    #[from(ignore)]
    InvalidAttributeValue { attribute: &'static str, value: String },
    #[display(fmt="Tile id {id} is declared more than once")]
    #[from(ignore)]
    DuplicateTileId { id: u32 },
    #[display(fmt="<{element}> is missing required attribute '{attribute}'")]
    #[from(ignore)]
    MissingAttribute { element: &'static str, attribute: &'static str },
    #[display(fmt="Tile {id} has no <image>")]
    #[from(ignore)]
    MissingImage { id: u32 },
    #[display(fmt="Tile {id} has more than one <image>")]
    #[from(ignore)]
    MultipleImages { id: u32 },
    #[display(fmt="Tile {id} has a malformed image source '{path}': {reason}")]
    #[from(ignore)]
    MalformedImageSource { id: u32, path: String, reason: PathSyntaxError },
}

impl TsxParseError {

    /// Whether this error concerns the document as a whole, or a single tile's references.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::XmlError(_)
            | Self::Utf8Error(_)
            | Self::UnexpectedRoot { .. }
            | Self::MissingTilesetAttribute { .. }
            | Self::InvalidInteger { .. }
            | Self::InvalidAttributeValue { .. }
            | Self::DuplicateTileId { .. } => ErrorKind::Format,
            Self::MissingAttribute { .. }
            | Self::MissingImage { .. }
            | Self::MultipleImages { .. }
            | Self::MalformedImageSource { .. } => ErrorKind::Reference,
        }
    }
}

#[derive(Display, Copy, Clone, Eq, PartialEq, Debug)]
pub enum ErrorKind {
    /// Input is malformed or unparseable. Always fatal.
    #[display(fmt="format error")]
    Format,
    /// A tile entry is missing something it needs, or points at a malformed path.
    #[display(fmt="reference error")]
    Reference,
}

/// A tile dropped while loading with [`InvalidTilePolicy::Skip`](crate::tileset::InvalidTilePolicy::Skip).
#[derive(Debug)]
pub struct SkippedTile {
    /// Index of the <tile> element among its siblings, starting at 0.
    pub position: usize,
    /// 1-based line of the <tile> element in the source.
    pub line: u32,
    /// Declared id, if the tile had a readable one.
    pub id: Option<u32>,
    pub error: TsxParseError,
}
