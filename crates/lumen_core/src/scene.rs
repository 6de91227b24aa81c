//! Scene description records.
//!
//! These are the plain data the orchestrator snapshots and the loader
//! produces. They are renderer-agnostic: the renderer turns them into
//! intersectable entities.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

/// A three component record as it appears in scene files: `{"x":..,"y":..,"z":..}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3Desc {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3Desc {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<Vector3Desc> for Vec3 {
    fn from(v: Vector3Desc) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for Vector3Desc {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Surface description, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MaterialDesc {
    /// Scatters towards the normal plus a random offset, tinted by `color`.
    Diffuse { color: Vector3Desc },
    /// Unrecognised or malformed material. Absorbs every ray.
    #[serde(other)]
    Invalid,
}

/// Geometry description, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntityDesc {
    Sphere {
        center: Vector3Desc,
        radius: f32,
        material: MaterialDesc,
    },
    /// Unrecognised or malformed geometry. Never intersects.
    #[serde(other)]
    Invalid,
}

impl EntityDesc {
    /// Convenience constructor for a diffuse sphere.
    pub fn diffuse_sphere(center: Vec3, radius: f32, color: Vec3) -> Self {
        EntityDesc::Sphere {
            center: center.into(),
            radius,
            material: MaterialDesc::Diffuse {
                color: color.into(),
            },
        }
    }

    /// Check if this record decoded to the null object.
    pub fn is_invalid(&self) -> bool {
        matches!(self, EntityDesc::Invalid)
    }
}

/// Optional render parameter overrides carried by a scene file.
///
/// Every field is optional; missing fields keep whatever the caller already had.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub canvas_width: Option<u32>,
    pub canvas_height: Option<u32>,
    pub max_depth: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub viewport_height: Option<f32>,
    pub threads: Option<usize>,
    pub seed: Option<u64>,
}

/// A complete scene: camera position, optional settings and the ordered entity list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Camera position; the origin when absent.
    #[serde(default)]
    pub camera: Option<Vector3Desc>,

    /// Render parameter overrides.
    #[serde(default)]
    pub config: Option<RenderSettings>,

    /// Entities in insertion order.
    #[serde(default)]
    pub entities: Vec<EntityDesc>,
}

impl SceneDescription {
    /// Create an empty scene with the camera at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity.
    pub fn add_entity(&mut self, entity: EntityDesc) {
        self.entities.push(entity);
    }

    /// Camera position, defaulting to the origin.
    pub fn camera_position(&self) -> Vec3 {
        self.camera.map(Vec3::from).unwrap_or(Vec3::ZERO)
    }

    /// Number of entities that decoded to the null object.
    pub fn invalid_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_invalid()).count()
    }

    /// The built-in demo scene: a pink sphere resting above a large blue ground sphere.
    pub fn demo() -> Self {
        let mut scene = Self::new();
        scene.add_entity(EntityDesc::diffuse_sphere(
            Vec3::new(0.0, 0.0, -4.0),
            2.0,
            Vec3::new(1.0, 0.5, 0.5),
        ));
        scene.add_entity(EntityDesc::diffuse_sphere(
            Vec3::new(0.0, -102.0, -4.0),
            100.0,
            Vec3::new(0.5, 0.5, 1.0),
        ));
        scene
    }
}
