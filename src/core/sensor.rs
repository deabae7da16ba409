// Copyright @yucwang 2026

use crate::math::constants::Float;
use crate::math::ray::Ray3f;

pub trait Sensor: Send + Sync {
    /// Primary ray through pixel `(x, y)`, displaced inside the pixel by
    /// `(sub_x, sub_y)` in `[0, 1)`. Row 0 is the top of the image.
    fn generate_ray(&self, x: usize, y: usize, sub_x: Float, sub_y: Float) -> Ray3f;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn describe(&self) -> String {
        String::from("Sensor")
    }
}
