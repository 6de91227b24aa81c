//! Render session orchestration.
//!
//! The [`Renderer`] partitions the canvas into bands, dispatches one worker
//! thread per band with its own copy of the scene, aggregates their progress
//! and merges finished bands into a [`PixelSink`].

use std::collections::HashMap;
use std::sync::mpsc::{channel, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant, SystemTime};

use log::{debug, error, info, trace};
use lumen_core::SceneDescription;
use lumen_math::{Color, Position, Vec3};
use thiserror::Error;

use crate::band::generate_bands;
use crate::framebuffer::{linear_to_srgb, PixelSink};
use crate::protocol::{Preload, WorkerMessage};
use crate::throttle::ProgressThrottle;
use crate::worker;
use crate::{Band, ConfigError, Entity, RenderConfig, Scene};

/// Interval between display updates while workers are running.
pub const DISPLAY_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to spawn render thread {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("all workers disconnected with {completed} of {total} bands rendered")]
    WorkerDisconnected { completed: usize, total: usize },
}

/// Summary of a finished render session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    pub elapsed: Duration,
    pub workers: usize,
    pub pixels: usize,
}

/// Orchestrator-side record of one dispatched worker.
#[derive(Debug)]
struct WorkerInfo {
    handle: Option<JoinHandle<()>>,
    band: Band,
    progress: f64,
    responded: bool,
}

/// Bookkeeping of a single render session.
struct Session {
    workers: HashMap<usize, WorkerInfo>,
    completed: usize,
    start: Instant,
    throttle: ProgressThrottle,
}

impl Session {
    fn new(throttle: ProgressThrottle) -> Self {
        Self { workers: HashMap::new(), completed: 0, start: Instant::now(), throttle }
    }

    fn insert(&mut self, band: Band, handle: Option<JoinHandle<()>>) {
        self.workers
            .insert(band.index, WorkerInfo { handle, band, progress: 0.0, responded: false });
    }

    fn worker_mut(&mut self, index: usize) -> &mut WorkerInfo {
        match self.workers.get_mut(&index) {
            Some(info) => info,
            None => panic!("Render manager: message from unknown worker {}", index),
        }
    }

    fn all_responded(&self) -> bool {
        self.workers.values().all(|w| w.responded)
    }

    fn progress(&self) -> f64 {
        if self.workers.is_empty() {
            return 0.0;
        }
        self.workers.values().map(|w| w.progress).sum::<f64>() / self.workers.len() as f64
    }

    fn update_displays(&self, sink: &mut dyn PixelSink) {
        sink.update_progress(self.progress());
        sink.update_elapsed_time(self.start.elapsed());
    }

    /// Record a worker's progress; returns whether the display was updated.
    ///
    /// Nothing is shown until every worker has reported once, then at most
    /// once per throttle interval.
    fn on_progress(
        &mut self,
        index: usize,
        fraction: f64,
        now: SystemTime,
        sink: &mut dyn PixelSink,
    ) -> bool {
        let info = self.worker_mut(index);
        info.progress = fraction;
        info.responded = true;
        debug!("Render thread {}: {:.1}%", index, fraction * 100.0);

        if self.all_responded() && self.throttle.ready(now) {
            self.update_displays(sink);
            true
        } else {
            false
        }
    }

    /// Join a finished worker and merge its band into the sink.
    fn on_render(&mut self, index: usize, pixels: &[Color], sink: &mut dyn PixelSink) {
        let info = self.worker_mut(index);
        if let Some(handle) = info.handle.take() {
            if handle.join().is_err() {
                error!("Render thread {}: panicked after delivering", index);
            }
        }
        info.progress = 1.0;
        info.responded = true;
        let band = info.band;
        self.completed += 1;

        merge_band(sink, &band, pixels);
        info!("Render thread {} finished ({}/{})", index, self.completed, self.workers.len());
    }
}

/// Owns the scene and configuration of a render.
pub struct Renderer {
    scene: Scene,
    camera_position: Position,
    config: RenderConfig,
}

impl Renderer {
    /// Empty scene, camera at the origin.
    pub fn new(config: RenderConfig) -> Self {
        Self { scene: Scene::new(), camera_position: Vec3::ZERO, config }
    }

    /// Build the scene from a description, keeping record order.
    pub fn from_description(desc: &SceneDescription, config: RenderConfig) -> Self {
        let mut renderer = Self::new(config).with_camera_position(desc.camera_position());
        for entity in &desc.entities {
            renderer.add_entity(Entity::from_desc(entity));
        }
        renderer
    }

    pub fn with_camera_position(mut self, position: Position) -> Self {
        self.camera_position = position;
        self
    }

    /// Append an entity to the scene snapshot handed to workers.
    pub fn add_entity(&mut self, entity: impl Into<Entity>) {
        self.scene.add(entity);
    }

    /// Run one render session to completion.
    ///
    /// Blocks until every worker has delivered its band. Progress reaches the
    /// sink at most once per [`DISPLAY_INTERVAL`] and only after every worker
    /// has reported at least once; the final update after the last merge is
    /// always sent.
    pub fn render(&self, sink: &mut dyn PixelSink) -> Result<RenderStats, RenderError> {
        self.config.validate()?;
        let config = self.config;

        info!(
            "Rendering {} entities at {}x{}, {} spp, depth {}, {} threads",
            self.scene.len(),
            config.canvas_width,
            config.canvas_height,
            config.samples_per_pixel,
            config.max_depth,
            config.threads
        );

        let (to_parent, from_workers) = channel::<WorkerMessage>();
        let mut session = Session::new(ProgressThrottle::aligned(DISPLAY_INTERVAL));

        // Spawn every worker before sending any preload. On a spawn failure the
        // preload senders are dropped and the spawned workers exit without rendering.
        let bands = generate_bands(config.canvas_width, config.canvas_height, config.threads);
        let mut to_workers = Vec::with_capacity(bands.len());
        for band in bands {
            match spawn_worker(band.index, &to_parent) {
                Ok((handle, to_worker)) => {
                    session.insert(band, Some(handle));
                    to_workers.push((band, to_worker));
                }
                Err(e) => {
                    error!(
                        "Render manager: {}, stopping {} spawned workers",
                        e,
                        to_workers.len()
                    );
                    return Err(e);
                }
            }
        }
        for (band, to_worker) in to_workers {
            self.dispatch(band, &to_worker);
        }
        // Workers hold the only senders now, so recv fails once all of them are gone
        drop(to_parent);

        let total = session.workers.len();
        while session.completed < total {
            let message = match from_workers.recv() {
                Ok(message) => message,
                Err(_) => {
                    error!(
                        "Render manager: workers disconnected with {}/{} bands done",
                        session.completed, total
                    );
                    return Err(RenderError::WorkerDisconnected {
                        completed: session.completed,
                        total,
                    });
                }
            };

            match message {
                WorkerMessage::Progress { worker_index, fraction } => {
                    session.on_progress(worker_index, fraction, SystemTime::now(), sink);
                }
                WorkerMessage::Render { worker_index, pixels } => {
                    session.on_render(worker_index, &pixels, sink);
                }
            }
        }

        sink.commit();
        session.update_displays(sink);

        let elapsed = session.start.elapsed();
        info!("Render finished in {} ms", elapsed.as_millis());

        Ok(RenderStats { elapsed, workers: total, pixels: config.pixel_count() })
    }

    fn dispatch(&self, band: Band, to_worker: &Sender<Preload>) {
        debug!("Render thread {}: dispatched rows {}..{}", band.index, band.start_y, band.end_y);

        let preload = Preload {
            worker_index: band.index,
            camera_position: self.camera_position,
            scene: self.scene.clone(),
            band,
            config: self.config,
        };
        if let Err(why) = to_worker.send(preload) {
            error!("Render thread {}: Error sending preload: {}", band.index, why);
        }
    }
}

/// Start a named worker thread waiting for its preload.
fn spawn_worker(
    index: usize,
    to_parent: &Sender<WorkerMessage>,
) -> Result<(JoinHandle<()>, Sender<Preload>), RenderError> {
    let (to_worker, from_parent) = channel();
    let to_parent = to_parent.clone();

    let handle = thread::Builder::new()
        .name(format!("render-worker-{}", index))
        .spawn(move || worker::launch(from_parent, to_parent))
        .map_err(|source| RenderError::Spawn { index, source })?;

    Ok((handle, to_worker))
}

/// Write a finished band into the sink, converting linear colour to sRGB bytes.
fn merge_band(sink: &mut dyn PixelSink, band: &Band, pixels: &[Color]) {
    assert_eq!(
        pixels.len(),
        band.pixel_count(),
        "Render thread {}: wrong pixel count",
        band.index
    );
    trace!("Render thread {}: merging {} pixels", band.index, pixels.len());

    let width = band.width() as usize;
    for (i, color) in pixels.iter().enumerate() {
        let x = band.start_x + (i % width) as u32;
        let y = band.start_y + (i / width) as u32;
        sink.set_pixel(x, y, linear_to_srgb(*color) * 255.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FrameBuffer, Material, Sphere};
    use std::time::UNIX_EPOCH;

    /// Sink recording every call for inspection.
    #[derive(Default)]
    struct RecordingSink {
        pixels: HashMap<(u32, u32), Color>,
        writes: usize,
        progress: Vec<f64>,
        elapsed: Vec<Duration>,
        commits: usize,
    }

    impl PixelSink for RecordingSink {
        fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
            self.writes += 1;
            self.pixels.insert((x, y), color);
        }

        fn update_progress(&mut self, fraction: f64) {
            self.progress.push(fraction);
        }

        fn update_elapsed_time(&mut self, elapsed: Duration) {
            self.elapsed.push(elapsed);
        }

        fn commit(&mut self) {
            self.commits += 1;
        }
    }

    fn small_config(threads: usize) -> RenderConfig {
        RenderConfig {
            canvas_width: 16,
            canvas_height: 9,
            samples_per_pixel: 2,
            max_depth: 4,
            threads,
            seed: Some(7),
            ..Default::default()
        }
    }

    fn demo_renderer(config: RenderConfig) -> Renderer {
        Renderer::from_description(&SceneDescription::demo(), config)
    }

    #[test]
    fn test_render_covers_every_pixel_once() {
        let config = small_config(4);
        let mut sink = RecordingSink::default();

        let stats = demo_renderer(config).render(&mut sink).unwrap();

        assert_eq!(stats.workers, 4);
        assert_eq!(stats.pixels, 16 * 9);
        assert_eq!(sink.writes, 16 * 9);
        assert_eq!(sink.pixels.len(), 16 * 9);
        for y in 0..9 {
            for x in 0..16 {
                let color = sink.pixels[&(x, y)];
                assert!(color.min_element() >= 0.0 && color.max_element() <= 255.0 + 1e-3);
            }
        }
    }

    #[test]
    fn test_render_commits_once_with_full_progress() {
        let mut sink = RecordingSink::default();
        demo_renderer(small_config(3)).render(&mut sink).unwrap();

        assert_eq!(sink.commits, 1);
        assert_eq!(sink.progress.last(), Some(&1.0));
        assert_eq!(sink.progress.len(), sink.elapsed.len());
    }

    #[test]
    fn test_empty_scene_renders_sky() {
        let config = RenderConfig { seed: Some(1), ..small_config(2) };
        let mut frame = FrameBuffer::new(config.canvas_width, config.canvas_height);

        Renderer::new(config).render(&mut frame).unwrap();

        for y in 0..config.canvas_height {
            for x in 0..config.canvas_width {
                let [r, g, b, a] = frame.get_pixel(x, y);
                assert_eq!(b, 255);
                assert_eq!(a, 255);
                assert!(r <= g && g <= b, "({}, {}) = {:?}", x, y, [r, g, b]);
            }
        }
        assert_eq!(frame.commits(), 1);
        assert_eq!(frame.progress(), 1.0);
    }

    #[test]
    fn test_seeded_render_is_reproducible() {
        let config = small_config(3);
        let mut first = FrameBuffer::new(16, 9);
        let mut second = FrameBuffer::new(16, 9);

        demo_renderer(config).render(&mut first).unwrap();
        demo_renderer(config).render(&mut second).unwrap();

        assert_eq!(first.to_rgba(), second.to_rgba());
    }

    #[test]
    fn test_thread_count_does_not_change_coverage() {
        for threads in [1, 2, 5, 9] {
            let mut sink = RecordingSink::default();
            demo_renderer(small_config(threads)).render(&mut sink).unwrap();
            assert_eq!(sink.pixels.len(), 16 * 9, "threads = {}", threads);
        }
    }

    #[test]
    fn test_smaller_frame_keeps_its_corner() {
        let config = small_config(3);
        let mut frame = FrameBuffer::new(4, 4);

        Renderer::new(config).render(&mut frame).unwrap();

        assert_eq!(frame.commits(), 1);
        assert_eq!(frame.get_pixel(0, 0)[2], 255);
        assert_eq!(frame.get_pixel(3, 3)[2], 255);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut sink = RecordingSink::default();
        let config = RenderConfig { threads: 10, ..small_config(1) };

        let err = demo_renderer(config).render(&mut sink).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Config(ConfigError::TooManyThreads { threads: 10, height: 9 })
        ));
        assert_eq!(sink.writes, 0);
        assert_eq!(sink.commits, 0);
    }

    #[test]
    fn test_added_entities_are_rendered() {
        let config = small_config(2);
        let mut renderer = Renderer::new(config).with_camera_position(Vec3::new(0.0, 0.0, 0.0));
        renderer.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, -1.5),
            100.0,
            Material::Invalid,
        ));
        assert_eq!(renderer.scene.len(), 1);

        // The camera sits inside an absorbing sphere
        let mut frame = FrameBuffer::new(16, 9);
        renderer.render(&mut frame).unwrap();
        assert_eq!(frame.get_pixel(8, 4), [0, 0, 0, 255]);
    }

    #[test]
    fn test_spawned_worker_without_preload_exits() {
        let (to_parent, from_workers) = channel();
        let (handle, to_worker) = spawn_worker(0, &to_parent).unwrap();
        drop(to_parent);

        // Abandoning the dispatch releases the worker before it renders anything
        drop(to_worker);
        handle.join().unwrap();
        assert!(from_workers.recv().is_err());
    }

    #[test]
    fn test_merge_band_places_rows() {
        let band = Band::new(0, 2, 3, 4, 1);
        let pixels = vec![Color::ONE; 6];
        let mut sink = RecordingSink::default();

        merge_band(&mut sink, &band, &pixels);

        assert_eq!(sink.writes, 6);
        assert!(sink.pixels.contains_key(&(2, 3)));
        assert!(!sink.pixels.contains_key(&(0, 1)));
        assert!((sink.pixels[&(0, 2)].x - 255.0).abs() < 1e-3);
    }

    #[test]
    #[should_panic(expected = "wrong pixel count")]
    fn test_merge_band_rejects_short_buffer() {
        let band = Band::new(0, 0, 2, 2, 0);
        merge_band(&mut RecordingSink::default(), &band, &[Color::ZERO]);
    }

    fn session_at(start: SystemTime, workers: usize) -> Session {
        let mut session = Session::new(ProgressThrottle::starting_at(start, DISPLAY_INTERVAL));
        for band in generate_bands(4, workers as u32, workers) {
            session.insert(band, None);
        }
        session
    }

    #[test]
    fn test_no_display_until_every_worker_reported() {
        let start = UNIX_EPOCH + Duration::from_secs(100);
        let mut session = session_at(start, 3);
        let mut sink = RecordingSink::default();
        let late = start + Duration::from_secs(10);

        assert!(!session.on_progress(0, 0.5, late, &mut sink));
        assert!(!session.on_progress(2, 0.25, late, &mut sink));
        assert!(!session.on_progress(0, 0.75, late, &mut sink));
        assert!(sink.progress.is_empty());
        assert!(sink.elapsed.is_empty());

        assert!(session.on_progress(1, 0.5, late, &mut sink));
        assert_eq!(sink.progress.len(), 1);
        assert_eq!(sink.elapsed.len(), 1);
    }

    #[test]
    fn test_display_at_most_once_per_interval() {
        let start = UNIX_EPOCH + Duration::from_secs(100);
        let mut session = session_at(start, 2);
        let mut sink = RecordingSink::default();
        let at = |ms: u64| start + Duration::from_millis(ms);

        assert!(!session.on_progress(0, 0.1, at(10), &mut sink));
        assert!(session.on_progress(1, 0.1, at(20), &mut sink));
        assert!(!session.on_progress(0, 0.2, at(400), &mut sink));
        assert!(!session.on_progress(1, 0.2, at(900), &mut sink));
        assert!(session.on_progress(0, 0.3, at(1_100), &mut sink));
        assert!(!session.on_progress(1, 0.3, at(1_500), &mut sink));
        assert!(session.on_progress(1, 0.4, at(2_050), &mut sink));

        assert_eq!(sink.progress.len(), 3);
    }

    #[test]
    fn test_displayed_progress_is_mean_of_workers() {
        let start = UNIX_EPOCH + Duration::from_secs(100);
        let mut session = session_at(start, 4);
        let mut sink = RecordingSink::default();
        let late = start + Duration::from_secs(1);

        session.on_progress(0, 0.2, late, &mut sink);
        session.on_progress(1, 0.4, late, &mut sink);
        session.on_progress(2, 0.6, late, &mut sink);
        session.on_progress(3, 1.0, late, &mut sink);

        assert_eq!(sink.progress.len(), 1);
        assert!((sink.progress[0] - 0.55).abs() < 1e-12);
    }

    #[test]
    fn test_render_counts_as_response() {
        let start = UNIX_EPOCH + Duration::from_secs(100);
        let mut session = session_at(start, 2);
        let mut sink = RecordingSink::default();
        let late = start + Duration::from_secs(5);

        session.on_render(0, &[Color::ZERO; 4], &mut sink);
        assert_eq!(session.completed, 1);
        assert_eq!(sink.writes, 4);

        assert!(session.on_progress(1, 0.5, late, &mut sink));
        assert_eq!(sink.progress, vec![0.75]);
    }

    #[test]
    #[should_panic(expected = "unknown worker")]
    fn test_unknown_worker_panics() {
        let mut session = session_at(UNIX_EPOCH, 2);
        session.on_progress(3, 0.5, UNIX_EPOCH, &mut RecordingSink::default());
    }
}
