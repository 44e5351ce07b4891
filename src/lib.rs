mod asset;
mod check;
mod entity;
mod util;
pub mod tileset;

pub use asset::*;
pub use check::*;
pub use entity::*;
pub use util::*;
pub use tileset::{TilesetDescriptor, TsxLoader};
