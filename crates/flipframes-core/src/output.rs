use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::bitmap::Bitmap;
use crate::error::{Error, Result};

/// Every processed frame in input order. Serializes as `[[0,1,...],...]`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VideoData {
    frames: Vec<Bitmap>,
}

impl VideoData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next frame. Earlier frames are never touched.
    pub fn push(&mut self, bitmap: Bitmap) {
        self.frames.push(bitmap);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Bitmap] {
        &self.frames
    }
}

impl From<Vec<Bitmap>> for VideoData {
    fn from(frames: Vec<Bitmap>) -> Self {
        Self { frames }
    }
}

/// `<base>.json`, appending rather than replacing any existing extension.
pub fn output_path(base: &Path) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".json");
    PathBuf::from(name)
}

/// Serialize `video` to `<base>.json` and return the written path.
///
/// Blocks until the file is fully written.
pub fn write_video_data(video: &VideoData, base: &Path) -> Result<PathBuf> {
    let path = output_path(base);
    let io_err = |source: std::io::Error| Error::Io {
        path: path.clone(),
        source,
    };

    info!(?path, frame_count = video.len(), "writing video data");

    let buf = serde_json::to_vec(video).map_err(|e| io_err(e.into()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    std::fs::write(&path, &buf).map_err(io_err)?;

    info!(?path, bytes = buf.len(), "video data written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage};

    fn bitmap(pixels: Vec<u8>) -> Bitmap {
        let gray = GrayImage::from_raw(2, 2, pixels).unwrap();
        Bitmap::from_image(&DynamicImage::ImageLuma8(gray), 127)
    }

    #[test]
    fn output_path_appends_json() {
        assert_eq!(output_path(Path::new("out")), PathBuf::from("out.json"));
        assert_eq!(
            output_path(Path::new("dir/clip.v2")),
            PathBuf::from("dir/clip.v2.json")
        );
    }

    #[test]
    fn serializes_as_nested_arrays() {
        let mut video = VideoData::new();
        video.push(bitmap(vec![10, 200, 10, 200]));
        video.push(bitmap(vec![200, 200, 200, 200]));
        assert_eq!(
            serde_json::to_string(&video).unwrap(),
            "[[0,1,0,1],[1,1,1,1]]"
        );
    }

    #[test]
    fn empty_video_is_empty_array() {
        assert_eq!(serde_json::to_string(&VideoData::new()).unwrap(), "[]");
    }

    #[test]
    fn write_creates_parent_directories() {
        let root = std::env::temp_dir().join(format!("flipframes-output-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        let base = root.join("nested").join("clip");

        let video = VideoData::from(vec![bitmap(vec![0, 0, 255, 255])]);
        let path = write_video_data(&video, &base).unwrap();

        assert_eq!(path, root.join("nested").join("clip.json"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[[0,0,1,1]]");

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn unwritable_target_is_io_error() {
        let root = std::env::temp_dir().join(format!("flipframes-output-blocked-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        // A directory already sits where the file should go.
        std::fs::create_dir_all(root.join("taken.json")).unwrap();

        let err = write_video_data(&VideoData::new(), &root.join("taken")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
