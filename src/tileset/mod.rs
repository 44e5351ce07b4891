//! Tiled tileset (.tsx) descriptors.
pub mod parse;
mod error;
mod options;
mod tile;
mod descriptor;

pub use error::*;
pub use options::*;
pub use tile::*;
pub use descriptor::*;
