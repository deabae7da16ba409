// Copyright @yucwang 2023

use crate::core::interaction::ShapeHit;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

pub trait Shape: Send + Sync {
    /// Nearest hit inside the ray's `[min_t, max_t]` segment.
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeHit>;
    fn area(&self) -> Float;
    /// Point distributed uniformly over the surface and its outward normal.
    fn sample_position(&self, u: &Vector2f) -> (Vector3f, Vector3f);
    fn describe(&self) -> String {
        String::from("Shape")
    }
}
