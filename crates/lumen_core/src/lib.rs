//! Lumen Core - scene descriptions for the Lumen path tracer.
//!
//! This crate provides:
//!
//! - **Scene records**: `SceneDescription`, `EntityDesc`, `MaterialDesc`
//! - **Loading**: JSON scene files decoded record by record, where anything
//!   unrecognised becomes an inert `Invalid` record instead of an error
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} entities", scene.entities.len());
//! ```

pub mod loader;
pub mod scene;

pub use loader::{load_scene, load_scene_from_str, SceneError, SceneResult};
pub use scene::{EntityDesc, MaterialDesc, RenderSettings, SceneDescription, Vector3Desc};
