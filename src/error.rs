use std::path::PathBuf;

use thiserror::Error;

/// Library error type for parallax-frame setup operations.
///
/// Runtime input failures (denied permissions, unsupported sensors, invalid
/// samples) are absorbed where they occur and never surface here; only setup
/// problems are fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// An asset path does not point at a readable file.
    #[error("missing asset image: {0}")]
    MissingAsset(PathBuf),

    /// An asset decoded to a zero-sized image.
    #[error("{0} image has a zero dimension")]
    EmptyImage(String),

    /// Color and depth images disagree on aspect ratio.
    #[error(
        "aspect ratio mismatch: color {color_width}x{color_height} vs depth {depth_width}x{depth_height}"
    )]
    AspectMismatch {
        color_width: u32,
        color_height: u32,
        depth_width: u32,
        depth_height: u32,
    },

    /// A configuration value failed validation.
    #[error("invalid configuration: {0}")]
    BadConfig(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    /// Image decode error.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
