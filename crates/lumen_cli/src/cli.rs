use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_core::RenderSettings;

/// Log levels accepted on the command line
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

#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Band-parallel CPU path tracer")]
pub struct Args {
    /// Scene file in JSON; the built-in demo scene is used when omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum ray depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Number of worker threads
    #[arg(long, short = 't')]
    pub threads: Option<usize>,

    /// Base seed for a reproducible render
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}

impl Args {
    /// Command-line overrides in the same shape as a scene file's `config` block.
    pub fn settings(&self) -> RenderSettings {
        RenderSettings {
            canvas_width: self.width,
            canvas_height: self.height,
            max_depth: self.depth,
            samples_per_pixel: self.samples,
            threads: self.threads,
            seed: self.seed,
            ..Default::default()
        }
    }
}
