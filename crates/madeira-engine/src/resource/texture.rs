use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::{Context, Result};

use super::loader::Load;

/// Process-unique texture identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        TextureId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Decoded image ready for upload: tightly packed RGBA8 rows, top row first.
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Texture {
    /// Wraps raw RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        anyhow::ensure!(width > 0 && height > 0, "texture has zero size");
        let expected = width as usize * height as usize * 4;
        anyhow::ensure!(
            pixels.len() == expected,
            "expected {expected} bytes for a {width}x{height} RGBA8 texture, got {}",
            pixels.len()
        );
        Ok(Self {
            id: TextureId::next(),
            width,
            height,
            pixels,
        })
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("id", &self.id.0)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Texture (id: {}, {}x{})", self.id.0, self.width, self.height)
    }
}

/// Decodes any image format enabled on the `image` crate into a texture.
pub fn decode_image(bytes: &[u8]) -> Result<Texture> {
    let rgba = image::load_from_memory(bytes)
        .context("failed to decode image")?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Texture::from_rgba8(width, height, rgba.into_raw())
}

/// Default loader for [`Texture`].
#[derive(Debug, Default)]
pub struct TextureLoader;

impl Load for TextureLoader {
    type Asset = Texture;

    fn load(&mut self, path: &Path) -> Result<Texture> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read texture: {}", path.display()))?;
        decode_image(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba8() {
        let texture = decode_image(&png(3, 2)).unwrap();
        assert_eq!((texture.width(), texture.height()), (3, 2));
        assert_eq!(texture.pixels().len(), 3 * 2 * 4);
        assert_eq!(&texture.pixels()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode_image(b"definitely not an image").is_err());
    }

    #[test]
    fn ids_are_unique() {
        let a = Texture::from_rgba8(1, 1, vec![0; 4]).unwrap();
        let b = Texture::from_rgba8(1, 1, vec![0; 4]).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn pixel_count_must_match_size() {
        assert!(Texture::from_rgba8(2, 2, vec![0; 4]).is_err());
    }

    #[test]
    fn loader_reads_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dot.png");
        std::fs::write(&path, png(1, 1)).unwrap();

        let texture = TextureLoader.load(&path).unwrap();
        assert_eq!(texture.width(), 1);
        assert!(TextureLoader.load(&tmp.path().join("nope.png")).is_err());
    }
}
