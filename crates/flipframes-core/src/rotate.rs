//! Frame rotation.
//!
//! Quarter turns are lossless. Any other angle is resampled with nearest
//! neighbour into a canvas sized to the rotated bounding box, rounded down.

use image::{DynamicImage, ImageBuffer, Luma, Pixel, Rgb, Rgba};
use imageproc::definitions::Clamp;
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use tracing::debug;

/// Rotate `image` clockwise by `degrees`. Negative angles turn counter-clockwise.
pub fn rotate(image: DynamicImage, degrees: f32) -> DynamicImage {
    let angle = degrees.rem_euclid(360.0);
    let (w, h) = (image.width(), image.height());

    match angle {
        a if a == 0.0 => image,
        a if a == 90.0 => {
            debug!(w, h, "rotating frame 90 degrees");
            image.rotate90()
        }
        a if a == 180.0 => {
            debug!(w, h, "rotating frame 180 degrees");
            image.rotate180()
        }
        a if a == 270.0 => {
            debug!(w, h, "rotating frame 270 degrees");
            image.rotate270()
        }
        a => {
            debug!(w, h, angle = a, "rotating frame by free angle");
            rotate_free(&image, a)
        }
    }
}

/// Canvas size for a `w` x `h` frame turned by `degrees`: the rotated
/// bounding box, rounded down.
pub fn rotated_dimensions(w: u32, h: u32, degrees: f32) -> (u32, u32) {
    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let (w, h) = (w as f32, h as f32);
    // Absorb float noise so exact fits do not lose a pixel.
    let fit = |v: f32| ((v + 1e-3).floor().max(1.0)) as u32;
    (fit(w * cos + h * sin), fit(w * sin + h * cos))
}

fn rotate_free(image: &DynamicImage, degrees: f32) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma8(img) => {
            DynamicImage::ImageLuma8(warp_rotated(img, degrees, Luma([0])))
        }
        DynamicImage::ImageRgb8(img) => {
            DynamicImage::ImageRgb8(warp_rotated(img, degrees, Rgb([0, 0, 0])))
        }
        DynamicImage::ImageRgba8(img) => {
            DynamicImage::ImageRgba8(warp_rotated(img, degrees, Rgba([0, 0, 0, 0])))
        }
        other => {
            DynamicImage::ImageRgba8(warp_rotated(&other.to_rgba8(), degrees, Rgba([0, 0, 0, 0])))
        }
    }
}

fn warp_rotated<P>(
    img: &ImageBuffer<P, Vec<P::Subpixel>>,
    degrees: f32,
    fill: P,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + Send + Sync,
    P::Subpixel: Send + Sync + Into<f32> + Clamp<f32>,
{
    let (w, h) = img.dimensions();
    let (out_w, out_h) = rotated_dimensions(w, h, degrees);

    let projection = Projection::translate(out_w as f32 / 2.0, out_h as f32 / 2.0)
        * Projection::rotate(degrees.to_radians())
        * Projection::translate(-(w as f32) / 2.0, -(h as f32) / 2.0);

    let mut out = ImageBuffer::from_pixel(out_w, out_h, fill);
    warp_into(img, &projection, Interpolation::Nearest, fill, &mut out);
    out
}
