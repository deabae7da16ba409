// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector3f};
use crate::math::ray::Ray3f;

/// Pinhole camera looking through a virtual screen of `screen_height` world
/// units placed `screen_distance` in front of the eye.
#[derive(Debug, Clone)]
pub struct PinholeCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    screen_width: Float,
    screen_height: Float,
    screen_distance: Float,
    width: usize,
    height: usize,
}

impl PinholeCamera {
    pub fn new(width: usize,
               height: usize,
               origin: Vector3f,
               direction: Vector3f,
               up: Vector3f,
               screen_height: Float,
               screen_distance: Float) -> Self {
        let forward = direction.normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();
        let aspect = if height > 0 { width as Float / height as Float } else { 1.0 };

        Self {
            origin,
            forward,
            right,
            up,
            screen_width: screen_height * aspect,
            screen_height,
            screen_distance,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }
}

impl Sensor for PinholeCamera {
    fn generate_ray(&self, x: usize, y: usize, sub_x: Float, sub_y: Float) -> Ray3f {
        let u = (x as Float + sub_x) / self.width as Float - 0.5;
        let v = 0.5 - (y as Float + sub_y) / self.height as Float;

        let on_screen = self.forward * self.screen_distance
            + self.right * (u * self.screen_width)
            + self.up * (v * self.screen_height);
        Ray3f::new(self.origin, on_screen, None, None)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn describe(&self) -> String {
        format!("PinholeCamera\n  origin: {:?}\n  forward: {:?}\n  resolution: {}x{}\n  screen: {}x{} at {}",
                self.origin, self.forward, self.width, self.height,
                self.screen_width, self.screen_height, self.screen_distance)
    }
}
