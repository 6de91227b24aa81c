//! Example: Load and inspect a scene file.
//!
//! Run with: cargo run --example inspect_scene -- scenes/demo.json

use std::env;

use lumen_core::{load_scene, EntityDesc, MaterialDesc};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_scene <path-to-scene-json>");
        println!("\nExample:");
        println!("  cargo run --example inspect_scene -- scenes/demo.json");
        return;
    }

    let path = &args[1];
    println!("Loading scene file: {}", path);

    match load_scene(path) {
        Ok(scene) => {
            println!("\n=== Scene ===");
            println!("Camera: {:?}", scene.camera_position());
            println!("Entities: {} ({} invalid)", scene.entities.len(), scene.invalid_count());
            if let Some(config) = &scene.config {
                println!("Config overrides: {:?}", config);
            }

            println!("\n--- Entities ---");
            for (index, entity) in scene.entities.iter().enumerate() {
                match entity {
                    EntityDesc::Sphere {
                        center,
                        radius,
                        material,
                    } => {
                        let material = match material {
                            MaterialDesc::Diffuse { color } => {
                                format!("diffuse ({}, {}, {})", color.x, color.y, color.z)
                            }
                            MaterialDesc::Invalid => "invalid".to_string(),
                        };
                        println!(
                            "  [{}] sphere at ({}, {}, {}) r={} - {}",
                            index, center.x, center.y, center.z, radius, material
                        );
                    }
                    EntityDesc::Invalid => println!("  [{}] invalid", index),
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to load scene: {}", e);
            std::process::exit(1);
        }
    }
}
