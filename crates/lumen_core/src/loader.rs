//! Scene file loading.
//!
//! Scene files are JSON objects with an optional `camera`, an optional
//! `config` block and an `entities` array. Each entity is decoded on its own:
//! a record with an unknown `type`, a missing field or a zero radius becomes
//! [`EntityDesc::Invalid`] rather than failing the whole file. A malformed
//! `camera` or `config` is dropped the same way. Only a file that cannot be
//! read, is not a JSON object or has a non-array `entities` is an error.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::scene::{EntityDesc, MaterialDesc, RenderSettings, SceneDescription, Vector3Desc};

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene format: {0}")]
    Format(String),
}

/// Result type for loading operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Top level shape of a scene file before per-entity decoding.
#[derive(Deserialize)]
struct RawScene {
    #[serde(default)]
    camera: Option<Value>,
    #[serde(default)]
    config: Option<Value>,
    #[serde(default)]
    entities: Vec<Value>,
}

/// Load a scene description from a JSON file.
pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    log::debug!("Loading scene from {}", path.display());
    let source = std::fs::read_to_string(path)?;
    load_scene_from_str(&source)
}

/// Load a scene description from a JSON string.
pub fn load_scene_from_str(source: &str) -> SceneResult<SceneDescription> {
    let value: Value = serde_json::from_str(source)?;
    if !value.is_object() {
        return Err(SceneError::Format(
            "expected a JSON object at the top level".to_string(),
        ));
    }

    let raw: RawScene = serde_json::from_value(value)?;
    let entities: Vec<EntityDesc> = raw
        .entities
        .iter()
        .enumerate()
        .map(|(index, record)| decode_entity(index, record))
        .collect();

    let scene = SceneDescription {
        camera: raw.camera.as_ref().and_then(decode_camera),
        config: raw.config.as_ref().and_then(decode_settings),
        entities,
    };

    log::info!(
        "Loaded scene with {} entities ({} invalid)",
        scene.entities.len(),
        scene.invalid_count()
    );

    Ok(scene)
}

/// Decode one entity record, falling back to [`EntityDesc::Invalid`].
pub fn decode_entity(index: usize, record: &Value) -> EntityDesc {
    match record.get("type").and_then(Value::as_str) {
        Some("Sphere") => match decode_sphere(record) {
            Some(sphere) => sphere,
            None => {
                log::warn!("Entity {}: malformed sphere, treating as invalid", index);
                EntityDesc::Invalid
            }
        },
        Some(other) => {
            log::warn!("Entity {}: unknown type {:?}, treating as invalid", index, other);
            EntityDesc::Invalid
        }
        None => {
            log::warn!("Entity {}: missing type tag, treating as invalid", index);
            EntityDesc::Invalid
        }
    }
}

fn decode_sphere(record: &Value) -> Option<EntityDesc> {
    let center = decode_vector(record.get("center")?)?;
    let radius = record.get("radius")?.as_f64()? as f32;
    if radius == 0.0 || !radius.is_finite() {
        return None;
    }
    let material = record
        .get("material")
        .map(decode_material)
        .unwrap_or(MaterialDesc::Invalid);

    Some(EntityDesc::Sphere {
        center,
        radius,
        material,
    })
}

/// Decode one material record, falling back to [`MaterialDesc::Invalid`].
pub fn decode_material(record: &Value) -> MaterialDesc {
    match record.get("type").and_then(Value::as_str) {
        Some("Diffuse") => match record.get("color").and_then(decode_vector) {
            Some(color) => MaterialDesc::Diffuse { color },
            None => {
                log::warn!("Diffuse material without a valid color, treating as invalid");
                MaterialDesc::Invalid
            }
        },
        other => {
            log::warn!("Unknown material type {:?}, treating as invalid", other);
            MaterialDesc::Invalid
        }
    }
}

fn decode_camera(value: &Value) -> Option<Vector3Desc> {
    let camera = decode_vector(value);
    if camera.is_none() {
        log::warn!("Malformed camera position, using the origin");
    }
    camera
}

fn decode_settings(value: &Value) -> Option<RenderSettings> {
    match RenderSettings::deserialize(value) {
        Ok(settings) => Some(settings),
        Err(e) => {
            log::warn!("Malformed config block ({}), using defaults", e);
            None
        }
    }
}

fn decode_vector(value: &Value) -> Option<Vector3Desc> {
    Vector3Desc::deserialize(value).ok()
}
