use image::DynamicImage;
use serde::{Serialize, Serializer};

/// Bitmap value for a dark pixel (dot flipped on).
pub const ON: u8 = 0;
/// Bitmap value for a light pixel (dot flipped off).
pub const OFF: u8 = 1;

/// A frame reduced to one 0/1 value per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl Bitmap {
    /// Threshold a decoded frame.
    pub fn from_image(image: &DynamicImage, threshold: u8) -> Self {
        let channels = image.color().channel_count() as usize;
        Self {
            width: image.width(),
            height: image.height(),
            bits: threshold_pixels(image.as_bytes(), channels, threshold),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Value at `(x, y)`, or `None` outside the frame.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.bits
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.bits.chunks(self.width.max(1) as usize)
    }
}

impl Serialize for Bitmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.bits)
    }
}

/// Intensity of one pixel given its channel bytes.
///
/// A single channel is used as is. Otherwise the first three channels are
/// averaged with truncating division and anything after them (alpha) is
/// ignored.
pub fn intensity(pixel: &[u8]) -> u8 {
    match pixel {
        [v] => *v,
        [r, g, b, ..] => ((u16::from(*r) + u16::from(*g) + u16::from(*b)) / 3) as u8,
        // Two-channel buffers never reach here once frames are normalized.
        [v, ..] => *v,
        [] => 0,
    }
}

/// Reduce a flat interleaved buffer to 0/1 per pixel.
///
/// Dark pixels (`intensity < threshold`) map to [`ON`], the rest to [`OFF`].
pub fn threshold_pixels(data: &[u8], channels: usize, threshold: u8) -> Vec<u8> {
    debug_assert!(channels > 0, "channel count must be positive");
    data.chunks_exact(channels)
        .map(|px| if intensity(px) < threshold { ON } else { OFF })
        .collect()
}
