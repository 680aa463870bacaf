use std::io::Write;
use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::bitmap::Bitmap;
use crate::error::{Error, Result};
use crate::output::VideoData;
use crate::preview::write_preview;
use crate::rotate::rotate;
use crate::sequence::{resolve_frames, Frame, FrameDescriptor};

/// File name suffix used to pick input frames when none is given.
pub const DEFAULT_FORMAT: &str = "png";
/// Intensities below this are dark.
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Parameters for one conversion run. Built once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Directory holding the image sequence.
    pub input_dir: PathBuf,
    /// Output base name; `.json` is appended when writing.
    pub output: PathBuf,
    /// Only files whose name ends with this are used.
    pub format: String,
    /// Clockwise rotation applied to every frame before thresholding.
    pub rotate_degrees: f32,
    /// Intensity cutoff, 0-255.
    pub threshold: u8,
    /// Emit the text preview of each frame.
    pub preview: bool,
    /// Decode and threshold frames on the rayon pool.
    pub parallel: bool,
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output: output.into(),
            format: DEFAULT_FORMAT.to_string(),
            rotate_degrees: 0.0,
            threshold: DEFAULT_THRESHOLD,
            preview: true,
            parallel: false,
        }
    }
}

/// Convert the image sequence described by `config` into video data.
///
/// Each frame's text preview is written to `preview` unless `config.preview` is off.
/// The first frame that fails aborts the run, so a partial sequence is never
/// returned. The reported error is always the earliest failing frame in
/// natural order, in parallel mode too.
pub fn run_pipeline(
    config: &PipelineConfig,
    mut preview: Option<&mut dyn Write>,
) -> Result<VideoData> {
    if config.format.is_empty() {
        return Err(Error::Configuration("image format must not be empty".into()));
    }
    if !config.rotate_degrees.is_finite() {
        return Err(Error::Configuration(format!(
            "rotation must be a finite number of degrees, got {}",
            config.rotate_degrees
        )));
    }
    if !config.input_dir.is_dir() {
        return Err(Error::Configuration(format!(
            "image sequence directory does not exist: {}",
            config.input_dir.display()
        )));
    }

    info!(
        input_dir = ?config.input_dir,
        format = %config.format,
        rotate = config.rotate_degrees,
        threshold = config.threshold,
        parallel = config.parallel,
        "pipeline starting"
    );

    let descriptors = resolve_frames(&config.input_dir, &config.format)?;
    if !config.preview {
        preview = None;
    }

    let video = if config.parallel {
        let results: Vec<Result<Bitmap>> = descriptors
            .par_iter()
            .map(|d| process_frame(d, config))
            .collect();
        // Report the first failure in frame order.
        let bitmaps = results.into_iter().collect::<Result<Vec<_>>>()?;
        // Previews wait until every frame is in, then go out in order.
        if let Some(sink) = preview.as_deref_mut() {
            for bitmap in &bitmaps {
                emit_preview(sink, bitmap);
            }
        }
        VideoData::from(bitmaps)
    } else {
        let mut video = VideoData::new();
        for descriptor in &descriptors {
            let bitmap = process_frame(descriptor, config)?;
            if let Some(sink) = preview.as_deref_mut() {
                emit_preview(sink, &bitmap);
            }
            video.push(bitmap);
        }
        video
    };

    info!(frame_count = video.len(), "pipeline complete");
    Ok(video)
}

/// Decode, rotate and threshold a single frame.
pub fn process_frame(descriptor: &FrameDescriptor, config: &PipelineConfig) -> Result<Bitmap> {
    let frame = Frame::load(descriptor)?;
    let image = rotate(frame.image, config.rotate_degrees);
    let bitmap = Bitmap::from_image(&image, config.threshold);

    debug!(
        index = frame.index,
        file = %frame.file_name,
        width = bitmap.width(),
        height = bitmap.height(),
        "processed frame"
    );
    Ok(bitmap)
}

fn emit_preview(sink: &mut dyn Write, bitmap: &Bitmap) {
    if let Err(e) = write_preview(sink, bitmap) {
        warn!(error = %e, "failed to write frame preview");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = PipelineConfig::new("seq", "out");
        assert_eq!(config.format, "png");
        assert_eq!(config.threshold, 127);
        assert_eq!(config.rotate_degrees, 0.0);
        assert!(config.preview);
        assert!(!config.parallel);
    }

    #[test]
    fn missing_directory_is_configuration_error() {
        let config = PipelineConfig::new("/definitely/not/a/real/flipframes/dir", "out");
        let err = run_pipeline(&config, None).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn non_finite_rotation_is_configuration_error() {
        let mut config = PipelineConfig::new(std::env::temp_dir(), "out");
        config.rotate_degrees = f32::NAN;
        let err = run_pipeline(&config, None).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn empty_format_is_configuration_error() {
        let mut config = PipelineConfig::new(std::env::temp_dir(), "out");
        config.format = String::new();
        let err = run_pipeline(&config, None).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
