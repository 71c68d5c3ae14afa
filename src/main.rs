//! Binary entrypoint for the parallax frame demo.
//!
//! Plays the role of the render host: binds the scene pair, drives the tick
//! loop with a synthetic pointer sweep, and writes each shaded frame to disk.
//! All engine logic lives in the library crate.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tokio::sync::oneshot;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use parallaxframe::engine::Engine;
use parallaxframe::permission::{ConsentApi, ConsentDecision, SensorKind};
use parallaxframe::processing::kernel::render_frame;

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "parallax-frame", about = "Pseudo-3D parallax still renderer")]
struct Cli {
    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    /// Override the number of demo frames
    #[arg(long, value_name = "COUNT")]
    frames: Option<u32>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("parallax_frame={level}").parse()?)
        .add_directive(format!("parallaxframe={level}").parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

/// The headless host exposes no sensor streams; the engine runs pointer-only.
struct HeadlessPlatform;

impl ConsentApi for HeadlessPlatform {
    fn supports(&self, _kind: SensorKind) -> bool {
        false
    }

    fn requires_consent(&self, _kind: SensorKind) -> bool {
        false
    }

    fn request_consent(&self, _kind: SensorKind) -> oneshot::Receiver<ConsentDecision> {
        let (_tx, rx) = oneshot::channel();
        rx
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = parallaxframe::config::from_yaml_file(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    cfg.validate().context("validating configuration")?;

    let scene = parallaxframe::assets::load_pair(&cfg.color_image_path, &cfg.depth_image_path)
        .context("loading scene images")?;
    info!(
        color = %cfg.color_image_path.display(),
        depth = %cfg.depth_image_path.display(),
        "scene pair bound"
    );

    let engine = Engine::new(Arc::new(HeadlessPlatform), cfg.gain);
    let frames = cli.frames.unwrap_or(cfg.demo_frames);
    std::fs::create_dir_all(&cfg.output_dir)
        .with_context(|| format!("creating output dir {}", cfg.output_dir.display()))?;

    let mut ticker = tokio::time::interval(cfg.tick_interval);
    for frame in 0..frames {
        ticker.tick().await;
        // Sweep the pointer around the unit circle for a full orbit.
        let t = std::f32::consts::TAU * frame as f32 / frames as f32;
        let signal = engine.tick([t.cos(), t.sin()]);
        let out = render_frame(&scene, &signal);
        let path = cfg.output_dir.join(format!("frame-{frame:04}.png"));
        out.save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    engine.shutdown();
    info!(frames, dir = %cfg.output_dir.display(), "demo render complete");
    Ok(())
}
