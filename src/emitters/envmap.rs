// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, Vector3f, PI};
use crate::math::spectrum::RGBSpectrum;

use exr::prelude::*;
use image::io::Reader as ImageReader;
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum EnvMapError {
    Image(image::ImageError),
    Io(std::io::Error),
    Exr(exr::error::Error),
    UnsupportedFormat(String),
    EmptyImage,
}

impl From<image::ImageError> for EnvMapError {
    fn from(err: image::ImageError) -> Self {
        EnvMapError::Image(err)
    }
}

impl From<std::io::Error> for EnvMapError {
    fn from(err: std::io::Error) -> Self {
        EnvMapError::Io(err)
    }
}

impl From<exr::error::Error> for EnvMapError {
    fn from(err: exr::error::Error) -> Self {
        EnvMapError::Exr(err)
    }
}

impl fmt::Display for EnvMapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EnvMapError::Image(e) => write!(f, "cannot decode environment map: {}", e),
            EnvMapError::Io(e) => write!(f, "cannot open environment map: {}", e),
            EnvMapError::Exr(e) => write!(f, "cannot read exr environment map: {}", e),
            EnvMapError::UnsupportedFormat(ext) => write!(f, "unsupported environment map format '{}'", ext),
            EnvMapError::EmptyImage => write!(f, "environment map has no pixels"),
        }
    }
}

impl std::error::Error for EnvMapError {}

/// Latitude-longitude radiance map with +y up. Row 0 is the zenith, the
/// horizontal axis wraps around the y axis starting at -z.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentMap {
    width: usize,
    height: usize,
    texels: Vec<RGBSpectrum>,
    scale: Float,
}

struct Texels {
    width: usize,
    data: Vec<RGBSpectrum>,
}

fn srgb_to_linear(v: Float) -> Float {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

impl EnvironmentMap {
    /// Tabulates `radiance(direction)` at every texel center.
    pub fn from_fn<F>(width: usize, height: usize, radiance: F) -> Self
        where F: Fn(&Vector3f) -> RGBSpectrum {
        let width = width.max(1);
        let height = height.max(1);
        let mut texels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let uv = Vector2f::new((x as Float + 0.5) / width as Float,
                                       (y as Float + 0.5) / height as Float);
                texels.push(radiance(&direction_from_uv(&uv)));
            }
        }
        Self { width, height, texels, scale: 1.0 }
    }

    /// Loads an EXR (linear) or PNG/JPEG (sRGB) panorama.
    pub fn from_file<P: AsRef<Path>>(path: P, scale: Float) -> std::result::Result<Self, EnvMapError> {
        let path = path.as_ref();
        let ext = path.extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let (width, height, texels) = match ext.as_str() {
            "exr" => read_exr(path)?,
            "png" | "jpg" | "jpeg" => read_ldr(path)?,
            _ => return Err(EnvMapError::UnsupportedFormat(ext)),
        };
        if width == 0 || height == 0 {
            return Err(EnvMapError::EmptyImage);
        }
        log::info!("Loaded {}x{} environment map {}.", width, height, path.display());
        Ok(Self { width, height, texels, scale })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn with_scale(mut self, scale: Float) -> Self {
        self.scale = scale;
        self
    }

    /// Radiance arriving from direction `dir`, nearest texel.
    pub fn eval(&self, dir: &Vector3f) -> RGBSpectrum {
        let uv = uv_from_direction(dir);
        let x = ((uv.x * self.width as Float) as usize).min(self.width - 1);
        let y = ((uv.y * self.height as Float) as usize).min(self.height - 1);
        self.texels[x + y * self.width] * self.scale
    }
}

fn read_ldr(path: &Path) -> std::result::Result<(usize, usize, Vec<RGBSpectrum>), EnvMapError> {
    let rgb = ImageReader::open(path)?.decode()?.to_rgb32f();
    let (width, height) = rgb.dimensions();
    let texels = rgb.pixels()
        .map(|p| RGBSpectrum::new(srgb_to_linear(p[0]), srgb_to_linear(p[1]), srgb_to_linear(p[2])))
        .collect();
    Ok((width as usize, height as usize, texels))
}

fn read_exr(path: &Path) -> std::result::Result<(usize, usize, Vec<RGBSpectrum>), EnvMapError> {
    let image = read()
        .no_deep_data()
        .largest_resolution_level()
        .rgba_channels(
            |resolution, _| {
                let width = resolution.width() as usize;
                let height = resolution.height() as usize;
                Texels { width, data: vec![RGBSpectrum::black(); width * height] }
            },
            |texels: &mut Texels, position, (r, g, b, _a): (f32, f32, f32, f32)| {
                let index = position.x() + position.y() * texels.width;
                texels.data[index] = RGBSpectrum::new(r, g, b);
            },
        )
        .first_valid_layer()
        .all_attributes()
        .from_file(path)?;

    let size = image.layer_data.size;
    let texels = image.layer_data.channel_data.pixels;
    Ok((size.width(), size.height(), texels.data))
}

fn uv_from_direction(d: &Vector3f) -> Vector2f {
    let inv_two_pi = 1.0 / (2.0 * PI);
    let raw_u = d.x.atan2(-d.z) * inv_two_pi;
    let u = raw_u - raw_u.floor();
    let v = d.y.max(-1.0).min(1.0).acos() * (1.0 / PI);
    Vector2f::new(u, v)
}

fn direction_from_uv(uv: &Vector2f) -> Vector3f {
    let theta = uv.y * PI;
    let phi = uv.x * 2.0 * PI;
    let sin_theta = theta.sin();
    Vector3f::new(sin_theta * phi.sin(), theta.cos(), -sin_theta * phi.cos())
}
