use std::path::Path;
use ::image::RgbaImage;
use derive_more::*;
use crate::{Asset, AssetLoader, AssetPath};

/// Decodes png and jpeg files into [`Texture`]s.
#[derive(Copy, Clone, Default, Debug)]
pub struct TextureLoader;

impl TextureLoader {

    pub fn decode(&self, bytes: &[u8]) -> Result<Texture, TextureError> {
        let pixels = ::image::load_from_memory(bytes)?.to_rgba8();
        Ok(Texture { pixels })
    }

    /// Reads and decodes a texture straight from the file system.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Texture, TextureError> {
        let bytes = std::fs::read(path)?;
        self.decode(&bytes)
    }
}

impl AssetLoader for TextureLoader {

    type AssetType = Texture;

    fn load(&self, bytes: &[u8], _path: &AssetPath) -> anyhow::Result<Texture> {
        Ok(self.decode(bytes)?)
    }

    fn extensions(&self) -> &[&str] {
        &["png", "jpg", "jpeg"]
    }
}

/// Decoded RGBA pixel data.
#[derive(Clone, Debug)]
pub struct Texture {
    pub pixels: RgbaImage,
}

impl Texture {
    pub fn width(&self) -> u32 { self.pixels.width() }
    pub fn height(&self) -> u32 { self.pixels.height() }
}

impl Asset for Texture {}

#[derive(Error, Display, From, Debug)]
pub enum TextureError {
    #[display(fmt="{_0}")]
    Io(std::io::Error),
    #[display(fmt="{_0}")]
    Decode(::image::ImageError),
}

#[cfg(test)]
mod test {
    use std::io::Cursor;
    use ::image::{ImageOutputFormat, RgbaImage};
    use crate::{TextureError, TextureLoader};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbaImage::new(width, height)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decode_png() {
        let texture = TextureLoader.decode(&png(54, 64)).unwrap();
        assert_eq!((54, 64), (texture.width(), texture.height()));
    }

    #[test]
    fn decode_garbage() {
        let result = TextureLoader.decode(b"not an image");
        assert!(matches!(result, Err(TextureError::Decode(_))));
    }

    #[test]
    fn open_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("door.png");
        std::fs::write(&path, png(32, 96)).unwrap();
        let texture = TextureLoader.open(&path).unwrap();
        assert_eq!((32, 96), (texture.width(), texture.height()));
    }

    #[test]
    fn open_missing() {
        let result = TextureLoader.open("definitely/not/here.png");
        assert!(matches!(result, Err(TextureError::Io(_))));
    }
}
