use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::debug;

use crate::error::{Error, Result};

/// One input file, identified by its position after natural sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDescriptor {
    /// 0-based position in the sorted sequence.
    pub index: usize,
    pub file_name: String,
    pub path: PathBuf,
}

/// A single decoded frame with metadata.
pub struct Frame {
    /// Always 8-bit Luma, Rgb or Rgba. See [`normalize`].
    pub image: DynamicImage,
    pub index: usize,
    pub file_name: String,
}

impl Frame {
    /// Decode the file behind `descriptor`.
    pub fn load(descriptor: &FrameDescriptor) -> Result<Self> {
        let frame = Self {
            image: decode(&descriptor.path)?,
            index: descriptor.index,
            file_name: descriptor.file_name.clone(),
        };
        debug!(
            index = frame.index,
            file = %frame.file_name,
            width = frame.width(),
            height = frame.height(),
            channels = frame.channels(),
            "decoded frame"
        );
        Ok(frame)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn channels(&self) -> usize {
        self.image.color().channel_count() as usize
    }
}

fn decode(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(normalize(image))
}

/// Narrow any decoded layout to 8-bit grey, RGB or RGBA.
///
/// Grey+alpha loses its alpha so it is treated as single channel.
pub fn normalize(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => {
            image
        }
        other => {
            let color = other.color();
            if !color.has_color() {
                DynamicImage::ImageLuma8(other.to_luma8())
            } else if color.has_alpha() {
                DynamicImage::ImageRgba8(other.to_rgba8())
            } else {
                DynamicImage::ImageRgb8(other.to_rgb8())
            }
        }
    }
}
