//! Convert a directory of still frames into 0/1 pixel data for two-colour
//! matrix displays such as flip-dot panels.

pub mod bitmap;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod preview;
pub mod rotate;
pub mod sequence;

pub use error::{Error, Result};
