// Copyright @yucwang 2026

use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;

pub const DISPLAY_GAMMA: Float = 2.2;

/// Clamps linear radiance to [0, 1] and applies display gamma.
pub fn tone_map(v: Float) -> u8 {
    let clamped = if v.is_finite() { v.max(0.0).min(1.0) } else { 0.0 };
    (clamped.powf(1.0 / DISPLAY_GAMMA) * 255.0 + 0.5) as u8
}

pub fn to_rgb_image(bitmap: &Bitmap) -> image::RgbImage {
    image::RgbImage::from_fn(bitmap.width() as u32, bitmap.height() as u32, |x, y| {
        let p = bitmap[(x as usize, y as usize)];
        image::Rgb([tone_map(p.x), tone_map(p.y), tone_map(p.z)])
    })
}

pub fn write_png_to_file(bitmap: &Bitmap, file_path: &str) -> image::ImageResult<()> {
    log::info!("Starting writing png image: {}.", file_path);
    to_rgb_image(bitmap).save(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::constants::Vector3f;

    #[test]
    fn test_tone_map() {
        assert_eq!(tone_map(0.0), 0);
        assert_eq!(tone_map(1.0), 255);
        assert_eq!(tone_map(7.5), 255);
        assert_eq!(tone_map(-1.0), 0);
        assert_eq!(tone_map(std::f32::NAN), 0);
        // Gamma brightens mid tones.
        assert!(tone_map(0.5) > 128);
    }

    #[test]
    fn test_to_rgb_image_layout() {
        let mut bitmap = Bitmap::new(3, 2);
        bitmap[(2, 1)] = Vector3f::new(1.0, 0.0, 1.0);
        let img = to_rgb_image(&bitmap);
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [255, 0, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
