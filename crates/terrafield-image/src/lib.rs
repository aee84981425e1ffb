//! **terrafield-image** — [`PixelSampler`] backend over the `image` crate.
//!
//! Decoding happens once at construction; the sampler then serves
//! grayscale intensities from the decoded buffer. This keeps all image
//! I/O outside the core engine, which only ever sees the trait.

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageError};

use terrafield_core::PixelSampler;

/// A pixel sampler backed by a decoded grayscale image.
///
/// Any [`DynamicImage`] is converted to 8-bit luma; samples are the luma
/// channel as `f32` in `[0, 255]`. Black-and-white sources work best as
/// data maps, matching how intensity maps are usually authored.
pub struct ImageSampler {
    pixels: GrayImage,
}

impl ImageSampler {
    /// Wrap an already-decoded image.
    pub fn new(image: DynamicImage) -> Self {
        Self {
            pixels: image.into_luma8(),
        }
    }

    /// Decode an image file and wrap it. Decoding failures propagate.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        Ok(Self::new(image::open(path)?))
    }
}

impl From<GrayImage> for ImageSampler {
    fn from(pixels: GrayImage) -> Self {
        Self { pixels }
    }
}

impl PixelSampler for ImageSampler {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Luma at `(x, y)`. Coordinates past the edge read the edge pixel,
    /// so slightly-off rounding from map resampling cannot panic.
    fn sample(&self, x: u32, y: u32) -> f32 {
        let x = x.min(self.pixels.width().saturating_sub(1));
        let y = y.min(self.pixels.height().saturating_sub(1));
        self.pixels.get_pixel(x, y).0[0] as f32
    }
}
