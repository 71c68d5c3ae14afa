use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::Error;
use crate::signal::DEFAULT_GAIN;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Color image bound as the base texture.
    pub color_image_path: PathBuf,
    /// Depth map whose red channel drives the parallax multiplier.
    pub depth_image_path: PathBuf,

    /// Gain applied to raw device units before fusion.
    #[serde(default = "Configuration::default_gain")]
    pub gain: f32,

    /// Pacing of the headless demo loop.
    #[serde(
        default = "Configuration::default_tick_interval",
        with = "humantime_serde"
    )]
    pub tick_interval: Duration,
    /// How many frames the headless demo renders.
    #[serde(default = "Configuration::default_demo_frames")]
    pub demo_frames: u32,
    /// Where demo frames are written.
    #[serde(default = "Configuration::default_output_dir")]
    pub output_dir: PathBuf,
}

impl Configuration {
    fn default_gain() -> f32 {
        DEFAULT_GAIN
    }

    fn default_tick_interval() -> Duration {
        Duration::from_millis(16)
    }

    fn default_demo_frames() -> u32 {
        60
    }

    fn default_output_dir() -> PathBuf {
        PathBuf::from("frames")
    }

    /// Check value ranges; path existence is checked later by asset loading.
    ///
    /// # Errors
    /// Returns [`Error::BadConfig`] with the offending field.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.gain.is_finite() && self.gain > 0.0) {
            return Err(Error::BadConfig(format!(
                "gain must be a positive finite number, got {}",
                self.gain
            )));
        }
        if self.tick_interval.is_zero() {
            return Err(Error::BadConfig("tick-interval must be non-zero".into()));
        }
        if self.demo_frames == 0 {
            return Err(Error::BadConfig("demo-frames must be at least 1".into()));
        }
        Ok(())
    }
}

/// Load a [`Configuration`] from a YAML file.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
/// if the YAML does not parse.
pub fn from_yaml_file(path: &Path) -> Result<Configuration, Error> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}
