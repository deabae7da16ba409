// Copyright @yucwang 2026

use crate::core::interaction::ShapeHit;
use crate::core::shape::Shape;
use crate::math::constants::{Float, Vector2f, Vector3f, PI};
use crate::math::ray::Ray3f;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius: radius.abs() }
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeHit> {
        let d = ray.dir();
        let po = self.center - ray.origin();
        let b = po.dot(&d);
        // Distance from the center to the ray line, computed directly to keep
        // precision when the origin is far from the sphere.
        let closest = po - d * b;
        let det = self.radius * self.radius - closest.norm_squared();
        if det < 0.0 {
            return None;
        }

        let sqrt_det = det.sqrt();
        let t = [b - sqrt_det, b + sqrt_det]
            .iter()
            .copied()
            .find(|t| ray.test_segment(*t))?;

        let p = ray.at(t);
        let mut normal = p - self.center;
        if self.radius > 0.0 {
            normal /= self.radius;
        }
        Some(ShapeHit { t, p, normal })
    }

    fn area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }

    fn sample_position(&self, u: &Vector2f) -> (Vector3f, Vector3f) {
        let z = 1.0 - 2.0 * u.x;
        let r = (1.0 - z * z).max(0.0).sqrt();
        let phi = 2.0 * PI * u.y;
        let normal = Vector3f::new(r * phi.cos(), r * phi.sin(), z);
        (self.center + normal * self.radius, normal)
    }

    fn describe(&self) -> String {
        format!("Sphere(center: {:?}, radius: {})", self.center, self.radius)
    }
}
