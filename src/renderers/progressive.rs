// Copyright @yucwang 2021

use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::io::saver::SaveError;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::thread;
use std::time::Instant;

pub use super::renderer::Renderer;

/// Hook invoked at every checkpoint with the sample count, the normalized
/// image and the wall-clock minutes elapsed since the render started.
pub type FinishCallback = Box<dyn FnMut(u32, &Bitmap, f64) -> Result<(), SaveError> + Send>;

const BLOCK_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub min_samples: u32,
    pub max_samples: u32,
    pub step: u32,
    /// Strata per pixel side; each sample traces `supersamples^2` rays.
    pub supersamples: u32,
    /// Worker threads per sweep, 0 for the available parallelism.
    pub threads: usize,
    pub seed: u64,
    pub show_progress: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            min_samples: 4,
            max_samples: 64,
            step: 4,
            supersamples: 2,
            threads: 0,
            seed: 0,
            show_progress: true,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.supersamples == 0 {
            return Err(ConfigError::InvalidSupersamples);
        }
        if self.step == 0 {
            return Err(ConfigError::InvalidStep);
        }
        if self.min_samples == 0 {
            return Err(ConfigError::ZeroMinSamples);
        }
        if self.min_samples > self.max_samples {
            return Err(ConfigError::InvalidSampleRange { min: self.min_samples, max: self.max_samples });
        }
        Ok(())
    }

    pub fn checkpoints(&self) -> SampleSequence {
        SampleSequence::new(self.min_samples, self.max_samples, self.step)
    }

    pub fn worker_count(&self) -> usize {
        match self.threads {
            0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            n => n,
        }
    }

    fn rays_per_sample(&self) -> u32 {
        self.supersamples * self.supersamples
    }
}

/// `start, start + step, ...` capped at `end`, which is always the last
/// element and appears once.
#[derive(Debug, Clone)]
pub struct SampleSequence {
    next: Option<u32>,
    end: u32,
    step: u32,
}

impl SampleSequence {
    pub fn new(start: u32, end: u32, step: u32) -> Self {
        Self { next: Some(start.min(end)), end, step: step.max(1) }
    }
}

impl Iterator for SampleSequence {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let current = self.next?;
        self.next = if current >= self.end {
            None
        } else {
            Some(current.saturating_add(self.step).min(self.end))
        };
        Some(current)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidSampleRange { min: u32, max: u32 },
    InvalidStep,
    InvalidSupersamples,
    ZeroMinSamples,
    EmptyImage,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::InvalidSampleRange { min, max } =>
                write!(f, "minimum samples ({}) exceed maximum samples ({})", min, max),
            ConfigError::InvalidStep => write!(f, "sample step must be positive"),
            ConfigError::InvalidSupersamples => write!(f, "supersamples must be positive"),
            ConfigError::ZeroMinSamples => write!(f, "minimum samples must be positive"),
            ConfigError::EmptyImage => write!(f, "image has no pixels"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub enum RenderError {
    /// A checkpoint callback failed. Rendering still ran to the last
    /// checkpoint; `samples` is the first failing checkpoint.
    Checkpoint { samples: u32, failed_checkpoints: usize, source: SaveError },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::Checkpoint { samples, failed_checkpoints, source } =>
                write!(f, "{} checkpoint(s) failed, first at {} samples: {}", failed_checkpoints, samples, source),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Checkpoint { source, .. } => Some(source),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Idle,
    Running { target: u32 },
    Checkpoint { samples: u32 },
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub checkpoints: Vec<u32>,
    pub elapsed_minutes: f64,
}

struct Accumulation {
    bitmap: Bitmap,
    samples: u32,
}

/// Progressive path tracer: sweeps the image once per checkpoint of the
/// sample sequence and keeps the summed (unnormalized) radiance per pixel.
pub struct ProgressiveRenderer {
    sensor: Box<dyn Sensor>,
    integrator: Box<dyn Integrator>,
    settings: RenderSettings,
    callback: Mutex<Option<FinishCallback>>,
    accumulation: RwLock<Accumulation>,
    state: Mutex<RenderState>,
    started: Mutex<Option<Instant>>,
}

impl ProgressiveRenderer {
    pub fn new(sensor: Box<dyn Sensor>,
               integrator: Box<dyn Integrator>,
               settings: RenderSettings,
               callback: Option<FinishCallback>) -> Result<Self, ConfigError> {
        settings.validate()?;
        let (width, height) = (sensor.width(), sensor.height());
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyImage);
        }

        Ok(Self {
            sensor,
            integrator,
            settings,
            callback: Mutex::new(callback),
            accumulation: RwLock::new(Accumulation { bitmap: Bitmap::new(width, height), samples: 0 }),
            state: Mutex::new(RenderState::Idle),
            started: Mutex::new(None),
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn sensor(&self) -> &dyn Sensor {
        self.sensor.as_ref()
    }

    pub fn state(&self) -> RenderState {
        *lock(&self.state)
    }

    /// Wall-clock minutes since the current (or last) `render_scene` call
    /// started, `None` before the first one.
    pub fn elapsed_minutes(&self) -> Option<f64> {
        let started = *lock(&self.started);
        started.map(|start| start.elapsed().as_secs_f64() / 60.0)
    }

    /// Completed sample count and the raw accumulated sums. Never contains
    /// part of a sweep that is still running.
    pub fn latest(&self) -> (u32, Bitmap) {
        let acc = read(&self.accumulation);
        (acc.samples, acc.bitmap.clone())
    }

    /// Like `latest`, divided by samples x supersamples^2. `None` before the
    /// first sweep has finished.
    pub fn latest_normalized(&self) -> Option<(u32, Bitmap)> {
        let acc = read(&self.accumulation);
        if acc.samples == 0 {
            return None;
        }
        Some((acc.samples, self.normalize(&acc.bitmap, acc.samples)))
    }

    /// Runs every sweep of the sample sequence, publishing a checkpoint after
    /// each. Starts from an empty accumulator.
    pub fn render_scene(&self, scene: &Scene) -> Result<RenderSummary, RenderError> {
        let start = Instant::now();
        *lock(&self.started) = Some(start);
        {
            let mut acc = write(&self.accumulation);
            acc.bitmap = Bitmap::new(self.sensor.width(), self.sensor.height());
            acc.samples = 0;
        }

        let threads = self.settings.worker_count();
        log::info!("Rendering {}x{} image, samples {}..={} (step {}), {}x{} supersamples, {} threads.",
                   self.sensor.width(), self.sensor.height(),
                   self.settings.min_samples, self.settings.max_samples, self.settings.step,
                   self.settings.supersamples, self.settings.supersamples, threads);
        log::debug!("{}", self.integrator.describe());

        let mut previous = 0;
        let mut checkpoints = Vec::new();
        let mut first_failure: Option<(u32, SaveError)> = None;
        let mut failed_checkpoints = 0;

        for target in self.settings.checkpoints() {
            self.set_state(RenderState::Running { target });
            let sweep = self.sweep(scene, previous, target, threads);
            {
                let mut acc = write(&self.accumulation);
                acc.bitmap += &sweep;
                acc.samples = target;
            }
            previous = target;

            self.set_state(RenderState::Checkpoint { samples: target });
            let elapsed_minutes = start.elapsed().as_secs_f64() / 60.0;
            log::info!("Reached {} samples after {:.2} min.", target, elapsed_minutes);
            if let Err(e) = self.publish(target, elapsed_minutes) {
                log::error!("Checkpoint at {} samples failed: {}.", target, e);
                failed_checkpoints += 1;
                if first_failure.is_none() {
                    first_failure = Some((target, e));
                }
            }
            checkpoints.push(target);
        }

        self.set_state(RenderState::Done);
        let elapsed_minutes = start.elapsed().as_secs_f64() / 60.0;
        log::info!("Rendering finished in {:.2} min.", elapsed_minutes);

        match first_failure {
            Some((samples, source)) => Err(RenderError::Checkpoint { samples, failed_checkpoints, source }),
            None => Ok(RenderSummary { checkpoints, elapsed_minutes }),
        }
    }

    fn publish(&self, samples: u32, elapsed_minutes: f64) -> Result<(), SaveError> {
        let mut callback = lock(&self.callback);
        let callback = match callback.as_mut() {
            Some(cb) => cb,
            None => return Ok(()),
        };
        let image = {
            let acc = read(&self.accumulation);
            self.normalize(&acc.bitmap, samples)
        };
        callback(samples, &image, elapsed_minutes)
    }

    fn normalize(&self, bitmap: &Bitmap, samples: u32) -> Bitmap {
        bitmap.scaled(1.0 / (samples as Float * self.settings.rays_per_sample() as Float))
    }

    /// Traces the samples `previous..target` of every pixel and returns their
    /// per-pixel sums. Blocks of pixels are handed out to the workers through
    /// a shared counter; each pixel is owned by exactly one worker.
    fn sweep(&self, scene: &Scene, previous: u32, target: u32, threads: usize) -> Bitmap {
        let width = self.sensor.width();
        let height = self.sensor.height();
        let mut output = Bitmap::new(width, height);
        if target <= previous {
            return output;
        }

        let blocks_x = (width + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let blocks_y = (height + BLOCK_SIZE - 1) / BLOCK_SIZE;
        let total_blocks = blocks_x * blocks_y;

        let progress = if self.settings.show_progress {
            let bar = ProgressBar::new(total_blocks as u64);
            bar.set_style(
                ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar.set_message(format!("{} spp", target));
            bar
        } else {
            ProgressBar::hidden()
        };

        let next_block = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel::<(usize, usize, usize, usize, Vec<Vector3f>)>();

        thread::scope(|scope| {
            for _ in 0..threads.max(1) {
                let next_block = Arc::clone(&next_block);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let block_index = next_block.fetch_add(1, Ordering::Relaxed);
                        if block_index >= total_blocks {
                            break;
                        }

                        let x0 = (block_index % blocks_x) * BLOCK_SIZE;
                        let y0 = (block_index / blocks_x) * BLOCK_SIZE;
                        let x1 = (x0 + BLOCK_SIZE).min(width);
                        let y1 = (y0 + BLOCK_SIZE).min(height);

                        let mut block = Vec::with_capacity((x1 - x0) * (y1 - y0));
                        for y in y0..y1 {
                            for x in x0..x1 {
                                block.push(self.render_pixel(scene, x, y, previous, target));
                            }
                        }
                        if tx.send((x0, y0, x1, y1, block)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for (x0, y0, x1, y1, block) in rx.iter() {
                for y in y0..y1 {
                    for x in x0..x1 {
                        output[(x, y)] = block[(x - x0) + (x1 - x0) * (y - y0)];
                    }
                }
                progress.inc(1);
            }
        });
        progress.finish_and_clear();
        output
    }

    fn render_pixel(&self, scene: &Scene, x: usize, y: usize, previous: u32, target: u32) -> Vector3f {
        let strata = self.settings.supersamples;
        let inv_strata = 1.0 / strata as Float;
        let stream = pixel_stream(previous, x + y * self.sensor.width());
        let mut rng = LcgRng::from_stream(self.settings.seed, stream);

        let mut color = RGBSpectrum::black();
        for _ in previous..target {
            for sy in 0..strata {
                for sx in 0..strata {
                    let sub_x = (sx as Float + rng.next_f32()) * inv_strata;
                    let sub_y = (sy as Float + rng.next_f32()) * inv_strata;
                    let ray = self.sensor.generate_ray(x, y, sub_x, sub_y);
                    color += self.integrator.radiance(scene, &ray, &mut rng, 0);
                }
            }
        }
        color.to_vector()
    }

    fn set_state(&self, state: RenderState) {
        *lock(&self.state) = state;
    }
}

impl Renderer for ProgressiveRenderer {
    fn render_scene(&self, scene: &Scene) -> Result<RenderSummary, RenderError> {
        ProgressiveRenderer::render_scene(self, scene)
    }

    fn result(&self) -> Option<Bitmap> {
        self.latest_normalized().map(|(_, bitmap)| bitmap)
    }
}

/// Random stream of one pixel for the sweep starting after `previous`
/// samples. Independent of the worker that ends up tracing the pixel.
pub(crate) fn pixel_stream(previous: u32, pixel_index: usize) -> u64 {
    ((previous as u64) << 32) | (pixel_index as u64 & 0xFFFF_FFFF)
}

// A panicking worker or callback must not make the accumulated image
// unreachable, so poisoned locks are recovered.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

fn read<T>(m: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    m.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(m: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    m.write().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::material::Material;
    use crate::core::scene::{Background, SceneObject};
    use crate::integrators::path::PathIntegrator;
    use crate::sensors::pinhole::PinholeCamera;
    use crate::shapes::sphere::Sphere;

    fn camera(width: usize, height: usize) -> Box<dyn Sensor> {
        Box::new(PinholeCamera::new(width, height,
                                    Vector3f::new(0.0, 0.0, 4.0),
                                    Vector3f::new(0.0, 0.0, -1.0),
                                    Vector3f::new(0.0, 1.0, 0.0),
                                    2.0, 2.0))
    }

    fn lit_sphere_scene() -> Scene {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(
            Arc::new(Sphere::new(Vector3f::zeros(), 1.0)),
            Material::diffuse(RGBSpectrum::splat(0.99))).with_name("white"));
        scene.add_object(SceneObject::new(
            Arc::new(Sphere::new(Vector3f::new(1.5, 2.0, 1.0), 0.5)),
            Material::diffuse(RGBSpectrum::black()).with_emission(RGBSpectrum::splat(12.0))).with_name("light"));
        scene
    }

    fn settings(min: u32, max: u32, step: u32, supersamples: u32) -> RenderSettings {
        RenderSettings {
            min_samples: min,
            max_samples: max,
            step,
            supersamples,
            threads: 2,
            seed: 7,
            show_progress: false,
        }
    }

    fn renderer(settings: RenderSettings, callback: Option<FinishCallback>) -> ProgressiveRenderer {
        ProgressiveRenderer::new(camera(4, 4), Box::new(PathIntegrator::default()), settings, callback)
            .expect("valid settings")
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let new = |s: RenderSettings| {
            ProgressiveRenderer::new(camera(4, 4), Box::new(PathIntegrator::default()), s, None).err()
        };
        assert_eq!(new(settings(5, 4, 1, 1)), Some(ConfigError::InvalidSampleRange { min: 5, max: 4 }));
        assert_eq!(new(settings(1, 4, 0, 1)), Some(ConfigError::InvalidStep));
        assert_eq!(new(settings(1, 4, 1, 0)), Some(ConfigError::InvalidSupersamples));
        assert_eq!(new(settings(0, 4, 1, 1)), Some(ConfigError::ZeroMinSamples));
        assert!(new(settings(4, 4, 1, 1)).is_none());

        let empty = ProgressiveRenderer::new(camera(0, 4), Box::new(PathIntegrator::default()),
                                             settings(1, 1, 1, 1), None);
        assert_eq!(empty.err(), Some(ConfigError::EmptyImage));
    }

    #[test]
    fn test_sample_sequence() {
        let seq = |a, b, c| SampleSequence::new(a, b, c).collect::<Vec<u32>>();
        assert_eq!(seq(1, 4, 1), vec![1, 2, 3, 4]);
        assert_eq!(seq(2, 10, 3), vec![2, 5, 8, 10]);
        assert_eq!(seq(5, 5, 3), vec![5]);
        assert_eq!(seq(1, 4, 10), vec![1, 4]);
        assert_eq!(SampleSequence::new(4, 64, 4).last(), Some(64));
    }

    #[test]
    fn test_four_checkpoints_on_small_image() {
        let published = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&published);
        let callback: FinishCallback = Box::new(move |samples, image: &Bitmap, minutes| {
            assert_eq!((image.width(), image.height()), (4, 4));
            assert!(minutes >= 0.0);
            for p in image.pixels() {
                assert!(p.x >= 0.0 && p.y >= 0.0 && p.z >= 0.0);
            }
            sink.lock().unwrap().push((samples, image.mean()));
            Ok(())
        });

        let renderer = renderer(settings(1, 4, 1, 1), Some(callback));
        assert_eq!(renderer.state(), RenderState::Idle);
        let summary = renderer.render_scene(&lit_sphere_scene()).expect("render succeeds");

        assert_eq!(summary.checkpoints, vec![1, 2, 3, 4]);
        let published = published.lock().unwrap();
        let counts: Vec<u32> = published.iter().map(|(s, _)| *s).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
        assert!(published.iter().all(|(_, mean)| mean.is_finite()));
        // The white sphere is lit, and no pixel can exceed the light's
        // emission on average.
        let (_, last_mean) = published[published.len() - 1];
        assert!(last_mean > 0.0 && last_mean < 12.0, "mean {}", last_mean);
        assert_eq!(renderer.state(), RenderState::Done);
        assert_eq!(renderer.latest().0, 4);
    }

    #[test]
    fn test_render_without_callback() {
        let renderer = renderer(settings(2, 7, 2, 1), None);
        assert!(renderer.latest_normalized().is_none());
        assert!(renderer.elapsed_minutes().is_none());
        let summary = renderer.render_scene(&lit_sphere_scene()).expect("render succeeds");
        assert_eq!(summary.checkpoints, vec![2, 4, 6, 7]);
        let (samples, image) = renderer.latest_normalized().expect("image available");
        assert_eq!(samples, 7);
        assert_eq!(renderer.result(), Some(image));
        let elapsed = renderer.elapsed_minutes().expect("render has started");
        assert!(elapsed >= summary.elapsed_minutes);
    }

    #[test]
    fn test_failing_callback_does_not_stop_sweeps() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        let callback: FinishCallback = Box::new(move |samples, _image: &Bitmap, _minutes| {
            sink.lock().unwrap().push(samples);
            if samples == 2 {
                Err(SaveError::Other(String::from("disk full")))
            } else {
                Ok(())
            }
        });

        let renderer = renderer(settings(1, 4, 1, 1), Some(callback));
        match renderer.render_scene(&lit_sphere_scene()) {
            Err(RenderError::Checkpoint { samples, failed_checkpoints, .. }) => {
                assert_eq!(samples, 2);
                assert_eq!(failed_checkpoints, 1);
            }
            other => panic!("expected a checkpoint error, got {:?}", other),
        }
        assert_eq!(*calls.lock().unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(renderer.latest().0, 4);
        assert_eq!(renderer.state(), RenderState::Done);
    }

    #[test]
    fn test_result_is_independent_of_thread_count() {
        let scene = lit_sphere_scene();
        let mut one = settings(1, 3, 1, 2);
        one.threads = 1;
        let mut many = one.clone();
        many.threads = 4;

        let a = renderer(one, None);
        let b = renderer(many, None);
        a.render_scene(&scene).expect("render succeeds");
        b.render_scene(&scene).expect("render succeeds");
        assert_eq!(a.latest(), b.latest());
    }

    #[test]
    fn test_accumulator_is_sum_of_sweeps() {
        let scene = lit_sphere_scene();
        let s = settings(1, 5, 2, 2);
        let renderer = renderer(s.clone(), None);
        renderer.render_scene(&scene).expect("render succeeds");
        let (samples, raw) = renderer.latest();
        assert_eq!(samples, 5);

        // Replay every sweep with the same streams and sum directly.
        let sensor = camera(4, 4);
        let integrator = PathIntegrator::default();
        let mut reference = Bitmap::new(4, 4);
        let mut previous = 0;
        for target in s.checkpoints() {
            let mut sweep = Bitmap::new(4, 4);
            for y in 0..4 {
                for x in 0..4 {
                    let mut rng = LcgRng::from_stream(s.seed, pixel_stream(previous, x + 4 * y));
                    let mut sum = RGBSpectrum::black();
                    let mut rays = 0;
                    for _ in previous..target {
                        for sy in 0..2 {
                            for sx in 0..2 {
                                let sub_x = (sx as Float + rng.next_f32()) * 0.5;
                                let sub_y = (sy as Float + rng.next_f32()) * 0.5;
                                let ray = sensor.generate_ray(x, y, sub_x, sub_y);
                                sum += integrator.radiance(&scene, &ray, &mut rng, 0);
                                rays += 1;
                            }
                        }
                    }
                    assert_eq!(rays, 4 * (target - previous));
                    sweep[(x, y)] = sum.to_vector();
                }
            }
            reference += &sweep;
            previous = target;
        }
        assert_eq!(raw, reference);
    }

    #[test]
    fn test_normalization_uses_rays_per_pixel() {
        // Empty scene: every ray returns the background exactly.
        let mut scene = Scene::new();
        scene.set_background(Background::Constant(RGBSpectrum::new(0.25, 0.5, 1.0)));

        let last = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&last);
        let callback: FinishCallback = Box::new(move |_samples, image: &Bitmap, _minutes| {
            *sink.lock().unwrap() = Some(image.clone());
            Ok(())
        });
        let renderer = renderer(settings(3, 6, 3, 3), Some(callback));
        renderer.render_scene(&scene).expect("render succeeds");

        let image = last.lock().unwrap().clone().expect("callback was invoked");
        for p in image.pixels() {
            assert!((p.x - 0.25).abs() < 1e-5);
            assert!((p.y - 0.5).abs() < 1e-5);
            assert!((p.z - 1.0).abs() < 1e-5);
        }
        let (_, raw) = renderer.latest();
        assert!((raw[(0, 0)].x - 0.25 * 6.0 * 9.0).abs() < 1e-3);
    }

    #[test]
    fn test_render_restarts_from_empty_accumulator() {
        let scene = lit_sphere_scene();
        let renderer = renderer(settings(1, 2, 1, 1), None);
        renderer.render_scene(&scene).expect("render succeeds");
        let first = renderer.latest();
        renderer.render_scene(&scene).expect("render succeeds");
        assert_eq!(renderer.latest(), first);
    }
}
