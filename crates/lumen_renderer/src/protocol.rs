//! Messages exchanged between the orchestrator and its workers.
//!
//! Everything crossing a channel is an owned value; workers never share
//! scene or pixel memory with the orchestrator or with each other.

use lumen_math::{Color, Position};

use crate::{Band, RenderConfig, Scene};

/// Everything a worker needs to render its band, sent once at dispatch.
#[derive(Debug, Clone)]
pub struct Preload {
    pub worker_index: usize,
    pub camera_position: Position,
    pub scene: Scene,
    pub band: Band,
    pub config: RenderConfig,
}

/// Worker to orchestrator traffic.
///
/// A worker sends zero or more `Progress` messages followed by exactly one
/// `Render`.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Progress {
        worker_index: usize,
        /// Fully finished pixels over pixels in the band
        fraction: f64,
    },
    Render {
        worker_index: usize,
        /// Linear colours of the band, row-major
        pixels: Vec<Color>,
    },
}
