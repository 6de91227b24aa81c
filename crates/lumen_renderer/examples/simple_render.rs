//! Simple band-parallel render example.
//!
//! Renders the built-in two-sphere scene at a low sample count and saves it
//! in PPM format.

use lumen_core::SceneDescription;
use lumen_renderer::{FrameBuffer, RenderConfig, Renderer};
use std::fs::File;
use std::io::{BufWriter, Write};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    println!("Lumen Path Tracer - Simple Example");
    println!("==================================");

    let config = RenderConfig {
        canvas_width: 320,
        canvas_height: 180,
        samples_per_pixel: 16,
        max_depth: 10,
        threads: 4,
        ..Default::default()
    };

    let renderer = Renderer::from_description(&SceneDescription::demo(), config);
    let mut frame = FrameBuffer::new(config.canvas_width, config.canvas_height);

    println!(
        "Rendering {}x{} @ {} spp on {} threads...",
        config.canvas_width, config.canvas_height, config.samples_per_pixel, config.threads
    );

    let stats = renderer.render(&mut frame).expect("Render failed");
    println!("Rendered {} pixels in {:?}", stats.pixels, stats.elapsed);

    let filename = "output.ppm";
    save_ppm(&frame, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn save_ppm(frame: &FrameBuffer, filename: &str) -> std::io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", frame.width(), frame.height())?;
    writeln!(writer, "255")?;

    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let [r, g, b, _] = frame.get_pixel(x, y);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    Ok(())
}
