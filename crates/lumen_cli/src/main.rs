//! Lumen command-line renderer.
//!
//! Loads a scene, runs one render session and writes the result as a PNG.

mod cli;
mod sink;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use lumen_core::{load_scene, SceneDescription};
use lumen_renderer::{RenderConfig, Renderer};

use crate::cli::Args;
use crate::sink::LoggingSink;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let scene = match &args.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            info!("No scene given, using the demo scene");
            SceneDescription::demo()
        }
    };
    if scene.invalid_count() > 0 {
        warn!("{} scene entities were not recognised and will be skipped", scene.invalid_count());
    }

    let config = build_config(&scene, &args);
    let renderer = Renderer::from_description(&scene, config);
    let mut sink = LoggingSink::new(config.canvas_width, config.canvas_height);

    let stats = renderer.render(&mut sink).context("Render failed")?;
    info!(
        "Rendered {} pixels with {} workers in {:.2}s",
        stats.pixels,
        stats.workers,
        stats.elapsed.as_secs_f64()
    );

    sink.frame()
        .save_png(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Saved to {}", args.output.display());

    Ok(())
}

/// Defaults, then the scene file's `config` block, then command-line flags.
fn build_config(scene: &SceneDescription, args: &Args) -> RenderConfig {
    let mut config = RenderConfig::default();
    if let Some(settings) = &scene.config {
        config = config.with_settings(settings);
    }
    config.with_settings(&args.settings())
}
