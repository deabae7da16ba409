// Copyright @yucwang 2026

use crate::io::exr_utils::write_exr_to_file;
use crate::io::png_utils::write_png_to_file;
use crate::math::bitmap::Bitmap;
use crate::renderers::progressive::FinishCallback;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Image(image::ImageError),
    Exr(exr::error::Error),
    Other(String),
}

impl From<std::io::Error> for SaveError {
    fn from(err: std::io::Error) -> Self {
        SaveError::Io(err)
    }
}

impl From<image::ImageError> for SaveError {
    fn from(err: image::ImageError) -> Self {
        SaveError::Image(err)
    }
}

impl From<exr::error::Error> for SaveError {
    fn from(err: exr::error::Error) -> Self {
        SaveError::Exr(err)
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "io error: {}", e),
            SaveError::Image(e) => write!(f, "png error: {}", e),
            SaveError::Exr(e) => write!(f, "exr error: {}", e),
            SaveError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            SaveError::Image(e) => Some(e),
            SaveError::Exr(e) => Some(e),
            SaveError::Other(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Tone mapped 8-bit.
    Png,
    /// Linear radiance.
    Exr,
}

impl ImageFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "exr" => Some(ImageFormat::Exr),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Exr => "exr",
        }
    }
}

/// Writes normalized images to `directory`, one file per call, named after
/// the sample count and the elapsed time.
#[derive(Debug, Clone)]
pub struct ImageSaver {
    directory: PathBuf,
    prefix: String,
    format: ImageFormat,
}

impl ImageSaver {
    pub fn new<P: AsRef<Path>>(directory: P, prefix: &str, format: ImageFormat) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            prefix: prefix.to_string(),
            format,
        }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn file_path(&self, samples: u32, elapsed_minutes: f64) -> PathBuf {
        self.directory.join(format!("{}_{:05}spp_{:.1}min.{}",
                                    self.prefix, samples, elapsed_minutes, self.format.extension()))
    }

    pub fn save(&self, samples: u32, image: &Bitmap, elapsed_minutes: f64) -> Result<PathBuf, SaveError> {
        fs::create_dir_all(&self.directory)?;
        let path = self.file_path(samples, elapsed_minutes);
        let path_str = path.to_string_lossy().to_string();
        match self.format {
            ImageFormat::Png => write_png_to_file(image, &path_str)?,
            ImageFormat::Exr => write_exr_to_file(&image.raw_copy(), image.width(), image.height(), &path_str)?,
        }
        Ok(path)
    }

    /// Checkpoint hook saving every published image.
    pub fn into_callback(self) -> FinishCallback {
        Box::new(move |samples: u32, image: &Bitmap, elapsed_minutes: f64| -> Result<(), SaveError> {
            let path = self.save(samples, image, elapsed_minutes)?;
            log::info!("Saved {} samples to {} ({:.2} min).", samples, path.display(), elapsed_minutes);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::Vector3f;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dango_saver_{}_{}", name, std::process::id()))
    }

    fn gradient() -> Bitmap {
        let mut bitmap = Bitmap::new(4, 3);
        for y in 0..3 {
            for x in 0..4 {
                bitmap[(x, y)] = Vector3f::new(x as f32 / 3.0, y as f32 / 2.0, 0.5);
            }
        }
        bitmap
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ImageFormat::from_name("PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_name("exr"), Some(ImageFormat::Exr));
        assert_eq!(ImageFormat::from_name("ppm"), None);
    }

    #[test]
    fn test_file_path() {
        let saver = ImageSaver::new("out", "cornell", ImageFormat::Png);
        assert_eq!(saver.file_path(16, 2.3), Path::new("out").join("cornell_00016spp_2.3min.png"));
    }

    #[test]
    fn test_save_png_and_exr() {
        let dir = temp_dir("formats");
        for format in [ImageFormat::Png, ImageFormat::Exr].iter() {
            let saver = ImageSaver::new(&dir, "image", *format);
            let path = saver.save(3, &gradient(), 0.5).expect("image saved");
            assert!(path.exists());
        }
        let png = image::open(dir.join("image_00003spp_0.5min.png")).expect("png readable").to_rgb8();
        assert_eq!(png.dimensions(), (4, 3));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_callback_reports_failures() {
        // A regular file where the output directory should be.
        let blocker = temp_dir("blocker");
        fs::write(&blocker, b"not a directory").expect("temp file");
        let mut callback = ImageSaver::new(blocker.join("sub"), "image", ImageFormat::Png).into_callback();
        assert!(callback(1, &gradient(), 0.0).is_err());
        let _ = fs::remove_file(&blocker);
    }
}
