use std::path::PathBuf;

use clap::{ArgAction, Parser};

use flipframes_core::pipeline::{PipelineConfig, DEFAULT_FORMAT, DEFAULT_THRESHOLD};
use flipframes_core::Error;

#[derive(Parser, Debug)]
#[command(
    name = "flipframes",
    version,
    about = "Convert an image sequence into raw 2-bit display data",
    disable_version_flag = true
)]
pub struct Cli {
    /// Directory holding the image sequence.
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Output file name; ".json" is appended.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Image sequence file format.
    #[arg(short, long, default_value = DEFAULT_FORMAT)]
    pub format: String,

    /// Rotate video clockwise by this many degrees.
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub rotate: f32,

    /// Black/white threshold range [0-255].
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: u8,

    /// Do not print the text preview of each frame.
    #[arg(short, long)]
    pub quiet: bool,

    /// Process frames concurrently. Output order is unchanged.
    #[arg(short, long)]
    pub parallel: bool,

    /// Print version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    /// Check required arguments and build the run configuration.
    pub fn into_config(self) -> Result<PipelineConfig, Error> {
        let dir = self.dir.ok_or_else(|| {
            Error::Configuration("image sequence directory is required (-d)".into())
        })?;
        let output = self
            .output
            .ok_or_else(|| Error::Configuration("output file name is required (-o)".into()))?;

        Ok(PipelineConfig {
            format: self.format,
            rotate_degrees: self.rotate,
            threshold: self.threshold,
            preview: !self.quiet,
            parallel: self.parallel,
            ..PipelineConfig::new(dir, output)
        })
    }
}
