use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a conversion run can fail. All of them end the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("no \"{format}\" images found in {}, check the sequence directory", dir.display())]
    NoInput { dir: PathBuf, format: String },

    #[error("failed to decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit status for this failure. Never 0, and distinct per variant.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Configuration(_) => 2,
            Error::NoInput { .. } => 3,
            Error::Decode { .. } => 4,
            Error::Io { .. } => 5,
        }
    }
}
