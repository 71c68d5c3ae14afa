//! Asset loading and validation for the color/depth image pair.
//!
//! This is the single fatal error surface: a missing, undecodable, empty, or
//! mismatched image aborts setup before the first render tick. After
//! construction the pair is immutable and the kernel cannot fail per-pixel.

use std::path::Path;

use image::{ImageReader, RgbaImage};
use tracing::debug;

use crate::error::Error;

/// Depth map reduced to its red channel, each sample mapped to [0, 1] and
/// interpreted as a parallax multiplier.
#[derive(Debug, Clone)]
pub struct DepthPlane {
    width: u32,
    height: u32,
    samples: Vec<f32>,
}

impl DepthPlane {
    /// Extract the red channel; green, blue, and alpha are ignored.
    #[must_use]
    pub fn from_red_channel(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let samples = img.pixels().map(|p| f32::from(p[0]) / 255.0).collect();
        Self {
            width,
            height,
            samples,
        }
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Nearest sample at normalized (u, v), edge-clamped.
    #[must_use]
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let x = texel(self.width, u);
        let y = texel(self.height, v);
        self.samples[(y * self.width + x) as usize]
    }
}

/// Nearest-texel index for a normalized coordinate, clamped to the edge.
#[must_use]
pub(crate) fn texel(dim: u32, coord: f32) -> u32 {
    let t = (coord * dim as f32).floor();
    t.clamp(0.0, (dim - 1) as f32) as u32
}

/// The immutable image pair the shading kernel reads every frame.
#[derive(Debug, Clone)]
pub struct ScenePair {
    pub color: RgbaImage,
    pub depth: DepthPlane,
}

impl ScenePair {
    /// Validate and bind a decoded color/depth pair.
    ///
    /// # Errors
    /// Returns [`Error::EmptyImage`] for a zero dimension and
    /// [`Error::AspectMismatch`] when the two images disagree on aspect
    /// ratio. The depth map may be a lower-resolution rendition of the same
    /// frame; only the ratio has to agree.
    pub fn new(color: RgbaImage, depth: &RgbaImage) -> Result<Self, Error> {
        let (cw, ch) = color.dimensions();
        let (dw, dh) = depth.dimensions();
        if cw == 0 || ch == 0 {
            return Err(Error::EmptyImage("color".into()));
        }
        if dw == 0 || dh == 0 {
            return Err(Error::EmptyImage("depth".into()));
        }
        if u64::from(cw) * u64::from(dh) != u64::from(ch) * u64::from(dw) {
            return Err(Error::AspectMismatch {
                color_width: cw,
                color_height: ch,
                depth_width: dw,
                depth_height: dh,
            });
        }
        Ok(Self {
            color,
            depth: DepthPlane::from_red_channel(depth),
        })
    }
}

/// Load and validate the color and depth images from disk.
///
/// # Errors
/// Any failure here is the fatal setup class: missing file, decode error,
/// zero dimension, or aspect mismatch.
pub fn load_pair(color_path: &Path, depth_path: &Path) -> Result<ScenePair, Error> {
    let color = decode(color_path)?;
    let depth = decode(depth_path)?;
    debug!(
        color = %color_path.display(),
        depth = %depth_path.display(),
        "decoded scene pair"
    );
    ScenePair::new(color, &depth)
}

fn decode(path: &Path) -> Result<RgbaImage, Error> {
    if !path.is_file() {
        return Err(Error::MissingAsset(path.to_path_buf()));
    }
    let img = ImageReader::open(path)?
        .with_guessed_format()? // sniff based on content/extension
        .decode()?;
    Ok(img.to_rgba8())
}
