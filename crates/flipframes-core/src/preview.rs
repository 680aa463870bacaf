use std::io::Write;

use crate::bitmap::{Bitmap, ON};

const ON_CELL: &str = "██";
const OFF_CELL: &str = "  ";

/// Draw a bitmap as text, two characters per pixel and one line per row,
/// followed by a blank line.
pub fn render_preview(bitmap: &Bitmap) -> String {
    let cell_len = ON_CELL.len().max(OFF_CELL.len());
    let mut out = String::with_capacity(bitmap.bits().len() * cell_len + bitmap.height() as usize + 1);

    for row in bitmap.rows() {
        for &bit in row {
            out.push_str(if bit == ON { ON_CELL } else { OFF_CELL });
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Write the preview of `bitmap` to `sink`.
pub fn write_preview(sink: &mut dyn Write, bitmap: &Bitmap) -> std::io::Result<()> {
    sink.write_all(render_preview(bitmap).as_bytes())?;
    sink.flush()
}
