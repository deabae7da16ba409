// Copyright @yucwang 2026

use crate::io::saver::ImageSaver;
use crate::renderers::progressive::ProgressiveRenderer;

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Background thread saving the renderer's latest image every `span`,
/// independently of the checkpoints. File names carry the minutes elapsed
/// since the render started, like the checkpoint saves.
pub struct TimedSaver {
    stop: Sender<()>,
    handle: Option<JoinHandle<usize>>,
}

impl TimedSaver {
    pub fn start(renderer: Arc<ProgressiveRenderer>, saver: ImageSaver, span: Duration) -> Self {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            let mut saved = 0usize;
            loop {
                match stopped.recv_timeout(span) {
                    Err(RecvTimeoutError::Timeout) => {}
                    _ => break,
                }

                let (samples, image) = match renderer.latest_normalized() {
                    Some(latest) => latest,
                    None => continue,
                };
                let minutes = renderer.elapsed_minutes().unwrap_or(0.0);
                match saver.save(samples, &image, minutes) {
                    Ok(path) => {
                        saved += 1;
                        log::info!("Periodic save of {} samples to {}.", samples, path.display());
                    }
                    Err(e) => log::warn!("Periodic save failed: {}.", e),
                }
            }
            saved
        });

        Self { stop, handle: Some(handle) }
    }

    /// Stops the thread and returns how many images it wrote.
    pub fn stop(mut self) -> usize {
        self.shutdown()
    }

    fn shutdown(&mut self) -> usize {
        let _ = self.stop.send(());
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or(0),
            None => 0,
        }
    }
}

impl Drop for TimedSaver {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::{Background, Scene};
    use crate::integrators::path::PathIntegrator;
    use crate::io::saver::ImageFormat;
    use crate::math::constants::Vector3f;
    use crate::math::spectrum::RGBSpectrum;
    use crate::renderers::progressive::RenderSettings;
    use crate::sensors::pinhole::PinholeCamera;

    #[test]
    fn test_timed_saver_writes_latest_image() {
        let camera = PinholeCamera::new(4, 4, Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0),
                                        Vector3f::new(0.0, 1.0, 0.0), 1.0, 1.0);
        let settings = RenderSettings {
            min_samples: 1,
            max_samples: 2,
            step: 1,
            supersamples: 1,
            threads: 1,
            seed: 0,
            show_progress: false,
        };
        let renderer = Arc::new(ProgressiveRenderer::new(Box::new(camera), Box::new(PathIntegrator::default()),
                                                         settings, None).expect("valid settings"));
        let mut scene = Scene::new();
        scene.set_background(Background::Constant(RGBSpectrum::splat(0.5)));

        let dir = std::env::temp_dir().join(format!("dango_timed_{}", std::process::id()));
        let timed = TimedSaver::start(Arc::clone(&renderer), ImageSaver::new(&dir, "periodic", ImageFormat::Png),
                                      Duration::from_millis(10));
        renderer.render_scene(&scene).expect("render succeeds");
        thread::sleep(Duration::from_millis(100));
        let saved = timed.stop();

        assert!(saved >= 1);
        let names: Vec<String> = std::fs::read_dir(&dir).expect("output directory")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect();
        assert!(!names.is_empty());
        // Minutes in the name are measured from the start of the render.
        let render_minutes = renderer.elapsed_minutes().expect("render started");
        for name in &names {
            let parts: Vec<&str> = name.split('_').collect();
            assert_eq!(parts.len(), 3, "unexpected file {}", name);
            assert!(parts[1] == "00001spp" || parts[1] == "00002spp", "unexpected file {}", name);
            let minutes: f64 = parts[2].trim_end_matches("min.png").parse().expect("minutes in file name");
            assert!(minutes <= render_minutes + 0.05);
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_stop_before_first_image() {
        let camera = PinholeCamera::new(2, 2, Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0),
                                        Vector3f::new(0.0, 1.0, 0.0), 1.0, 1.0);
        let renderer = Arc::new(ProgressiveRenderer::new(Box::new(camera), Box::new(PathIntegrator::default()),
                                                         RenderSettings::default(), None).expect("valid settings"));
        let dir = std::env::temp_dir().join(format!("dango_timed_idle_{}", std::process::id()));
        let timed = TimedSaver::start(renderer, ImageSaver::new(&dir, "idle", ImageFormat::Png),
                                      Duration::from_millis(5));
        thread::sleep(Duration::from_millis(30));
        assert_eq!(timed.stop(), 0);
        assert!(!dir.exists());
    }
}
