//! Locating and ordering the frame files of an image sequence.

pub mod frame;
pub mod natural;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

pub use frame::{Frame, FrameDescriptor};
pub use natural::natural_cmp;

/// List the files directly inside `dir` whose name ends with `format`,
/// in natural order.
pub fn resolve_frames(dir: &Path, format: &str) -> Result<Vec<FrameDescriptor>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::Configuration(format!(
            "cannot read image sequence directory {}: {e}",
            dir.display()
        ))
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::Configuration(format!("cannot list {}: {e}", dir.display()))
        })?;

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            continue;
        }

        let Ok(name) = entry.file_name().into_string() else {
            warn!(name = ?entry.file_name(), "skipping file with non UTF-8 name");
            continue;
        };

        if name.ends_with(format) {
            names.push(name);
        } else {
            debug!(%name, format, "skipping file with other format");
        }
    }

    if names.is_empty() {
        return Err(Error::NoInput {
            dir: dir.to_path_buf(),
            format: format.to_string(),
        });
    }

    names.sort_by(|a, b| natural_cmp(a, b));
    info!(?dir, format, frame_count = names.len(), "image sequence resolved");

    Ok(names
        .into_iter()
        .enumerate()
        .map(|(index, file_name)| FrameDescriptor {
            index,
            path: dir.join(&file_name),
            file_name,
        })
        .collect())
}
