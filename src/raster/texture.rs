//! Decoded bitmaps with clamped nearest-neighbor sampling

use std::path::Path;

use glam::{DVec2, DVec4};
use log::info;

use super::color;

/// Error type for texture loading
#[derive(Debug)]
pub enum TextureError {
    IoError(std::io::Error),
    DecodeError(image::ImageError),
}

impl From<std::io::Error> for TextureError {
    fn from(e: std::io::Error) -> Self {
        TextureError::IoError(e)
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::DecodeError(e)
    }
}

impl std::fmt::Display for TextureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureError::IoError(e) => write!(f, "IO error: {}", e),
            TextureError::DecodeError(e) => write!(f, "Decode error: {}", e),
        }
    }
}

/// A decoded bitmap. Samples are nearest-neighbor with uv clamped to the
/// edge texels; an empty texture samples as transparent black.
///
/// Cloning copies the pixel buffer; each instance owns its memory.
#[derive(Debug, Clone, Default)]
pub struct Texture2D {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl Texture2D {
    /// Wrap externally decoded pixels (3 or 4 channels, row-major).
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Self {
        assert!(channels == 3 || channels == 4, "unsupported channel count");
        assert_eq!(data.len(), width * height * channels);
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Decode an image file (png/jpeg/bmp) into a texture.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let bytes = std::fs::read(&path)?;
        let texture = Self::from_bytes(&bytes)?;
        info!(
            "loaded texture {} ({}x{})",
            path.as_ref().display(),
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Decode raw image bytes into a texture.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TextureError> {
        use image::GenericImageView;

        let img = image::load_from_memory(bytes)?;
        let (width, height) = img.dimensions();
        let (channels, data) = match img {
            image::DynamicImage::ImageRgb8(rgb) => (3, rgb.into_raw()),
            other => (4, other.to_rgba8().into_raw()),
        };
        Ok(Self {
            width: width as usize,
            height: height as usize,
            channels,
            data,
        })
    }

    /// Procedural checkerboard test pattern (4x4 texel cells).
    pub fn checkerboard(width: usize, height: usize, color1: DVec4, color2: DVec4) -> Self {
        let mut data = Vec::with_capacity(width * height * 4);
        for y in 0..height {
            for x in 0..width {
                let checker = ((x / 4) + (y / 4)) % 2 == 0;
                let c = if checker { color1 } else { color2 };
                data.push((c.x * 255.0) as u8);
                data.push((c.y * 255.0) as u8);
                data.push((c.z * 255.0) as u8);
                data.push((c.w * 255.0) as u8);
            }
        }
        Self {
            width,
            height,
            channels: 4,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Nearest-neighbor sample, uv clamped to [0,1]² and the texel index
    /// clamped to the extent. RGB bitmaps sample with alpha 1.0.
    pub fn sample(&self, uv: DVec2) -> DVec4 {
        if self.data.is_empty() {
            return color::TRANSPARENT;
        }
        let u = uv.x.clamp(0.0, 1.0);
        let v = uv.y.clamp(0.0, 1.0);
        let x = ((u * self.width as f64) as usize).min(self.width - 1);
        let y = ((v * self.height as f64) as usize).min(self.height - 1);
        let offset = (y * self.width + x) * self.channels;
        let alpha = if self.channels == 4 {
            self.data[offset + 3] as f64 / 255.0
        } else {
            1.0
        };
        DVec4::new(
            self.data[offset] as f64 / 255.0,
            self.data[offset + 1] as f64 / 255.0,
            self.data[offset + 2] as f64 / 255.0,
            alpha,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> Texture2D {
        // Texel layout: (0,0) red, (1,0) green, (0,1) blue, (1,1) white.
        Texture2D::from_raw(
            2,
            2,
            4,
            vec![
                255, 0, 0, 255, //
                0, 255, 0, 255, //
                0, 0, 255, 255, //
                255, 255, 255, 255,
            ],
        )
    }

    #[test]
    fn corner_samples_hit_first_and_last_texels() {
        let tex = two_by_two();
        let first = tex.sample(DVec2::new(0.0, 0.0));
        assert_eq!((first.x, first.y, first.z), (1.0, 0.0, 0.0));

        let last = tex.sample(DVec2::new(1.0, 1.0));
        assert_eq!((last.x, last.y, last.z), (1.0, 1.0, 1.0));
    }

    #[test]
    fn out_of_range_uv_clamps_to_edge() {
        let tex = two_by_two();
        let clamped = tex.sample(DVec2::new(-3.0, 0.0));
        let edge = tex.sample(DVec2::new(0.0, 0.0));
        assert_eq!(clamped, edge);

        let clamped = tex.sample(DVec2::new(2.5, 7.0));
        let edge = tex.sample(DVec2::new(1.0, 1.0));
        assert_eq!(clamped, edge);
    }

    #[test]
    fn empty_texture_samples_transparent_black() {
        let tex = Texture2D::default();
        assert_eq!(tex.sample(DVec2::new(0.5, 0.5)), DVec4::ZERO);
    }

    #[test]
    fn rgb_texture_samples_opaque() {
        let tex = Texture2D::from_raw(1, 1, 3, vec![10, 20, 30]);
        let c = tex.sample(DVec2::new(0.0, 0.0));
        assert_eq!(c.w, 1.0);
        assert!((c.x - 10.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn checkerboard_alternates_cells() {
        let tex = Texture2D::checkerboard(8, 8, DVec4::new(1.0, 1.0, 1.0, 1.0), DVec4::ZERO);
        let a = tex.sample(DVec2::new(0.0, 0.0));
        let b = tex.sample(DVec2::new(0.5, 0.0));
        assert_eq!(a.x, 1.0);
        assert_eq!(b.x, 0.0);
    }
}
