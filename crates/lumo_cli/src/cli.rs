use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumo_core::RenderConfig;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render the moving-lights demo scene to PNG files
#[derive(Debug, Parser)]
#[command(name = "lumo")]
#[command(about = "A parallel Phong ray tracer")]
pub struct Args {
    /// JSON render settings; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "800")]
    pub height: u32,

    /// Anti-aliasing samples per pixel
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Worker threads (defaults to every available core)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Seed for the anti-aliasing jitter
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip shadow rays
    #[arg(long)]
    pub no_shadows: bool,

    /// Test every shape for every ray instead of using the octree
    #[arg(long)]
    pub no_index: bool,

    /// Number of frames; the light moves an eighth of a turn per frame
    #[arg(short, long, default_value = "1")]
    pub frames: u32,

    /// Draw a white sphere at the light's position
    #[arg(long)]
    pub show_lights: bool,

    /// Add a floor plane and a backdrop behind the spheres
    #[arg(long)]
    pub extras: bool,

    /// Output file prefix; frames are written as `<prefix>_<n>.png`
    #[arg(short, long, default_value = "lumo")]
    pub output: String,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command-line overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(samples) = self.samples {
            config.anti_aliasing_samples = samples;
        }
        if self.workers.is_some() {
            config.worker_count = self.workers;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_shadows {
            config.shadows_enabled = false;
        }
        if self.no_index {
            config.spatial_index_enabled = false;
        }
    }

    /// Path of the PNG for frame `n`.
    pub fn frame_path(&self, n: u32) -> PathBuf {
        PathBuf::from(format!("{}_{:03}.png", self.output, n))
    }
}

/// Initialize the logger with the specified level
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}
