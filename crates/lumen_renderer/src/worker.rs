//! Render worker: samples one band and reports back over a channel.

use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, SystemTime};

use lumen_math::Color;
use log::{debug, error, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::protocol::{Preload, WorkerMessage};
use crate::sampler::render_pixel;
use crate::throttle::ProgressThrottle;
use crate::{Band, Camera, RenderConfig, Scene};

/// Interval between progress reports of a single worker.
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// One worker's private copy of the render inputs.
pub struct RenderWorker {
    index: usize,
    camera: Camera,
    scene: Scene,
    band: Band,
    config: RenderConfig,
}

impl RenderWorker {
    pub fn from_preload(preload: Preload) -> Self {
        let camera = Camera::new(preload.camera_position, &preload.config);
        Self {
            index: preload.worker_index,
            camera,
            scene: preload.scene,
            band: preload.band,
            config: preload.config,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn band(&self) -> Band {
        self.band
    }

    /// Generator for this worker: `seed + index` when seeded, entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.index as u64)),
            None => StdRng::from_entropy(),
        }
    }

    /// Sample every pixel of the band, row-major.
    ///
    /// After each sample the throttle is checked and, when due, the fraction
    /// of fully finished pixels is sent to `to_parent`.
    pub fn draw(&self, rng: &mut dyn RngCore, to_parent: &Sender<WorkerMessage>) -> Vec<Color> {
        let total = self.band.pixel_count();
        let mut pixels = Vec::with_capacity(total);
        let mut throttle = ProgressThrottle::aligned(PROGRESS_INTERVAL);

        for y in self.band.start_y..self.band.end_y {
            for x in self.band.start_x..self.band.end_x {
                let finished = pixels.len();
                let index = self.index;
                let mut report = || {
                    if throttle.ready(SystemTime::now()) {
                        let fraction = finished as f64 / total as f64;
                        trace!("Render thread {}: progress {:.3}", index, fraction);
                        let message = WorkerMessage::Progress { worker_index: index, fraction };
                        if let Err(why) = to_parent.send(message) {
                            error!("Render thread {}: Error sending progress: {}", index, why);
                        }
                    }
                };

                let color = render_pixel(
                    &self.camera,
                    &self.scene,
                    x,
                    y,
                    &self.config,
                    rng,
                    &mut report,
                );
                pixels.push(color);
            }
        }

        pixels
    }
}

/// Thread entry point.
///
/// Blocks for the single preload, renders, and finishes with a `Render` message.
pub fn launch(from_parent: Receiver<Preload>, to_parent: Sender<WorkerMessage>) {
    let preload = match from_parent.recv() {
        Ok(preload) => preload,
        Err(why) => {
            debug!("Render thread: No preload received, exiting: {}", why);
            return;
        }
    };

    let worker = RenderWorker::from_preload(preload);
    debug!("Render thread {}: Begin {:?}", worker.index(), worker.band());

    let mut rng = worker.rng();
    let pixels = worker.draw(&mut rng, &to_parent);

    debug!("Render thread {}: Done", worker.index());
    let message = WorkerMessage::Render { worker_index: worker.index(), pixels };
    if let Err(why) = to_parent.send(message) {
        error!("Render thread {}: Error sending render: {}", worker.index(), why);
    }
}
