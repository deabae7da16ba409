// Copyright @yucwang 2026

use crate::core::interaction::ShapeHit;
use crate::core::shape::Shape;
use crate::math::constants::{EPSILON, Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Parallelogram `center + s * dp_du + t * dp_dv` for `s, t` in `[-1, 1]`.
pub struct Rectangle {
    center: Vector3f,
    dp_du: Vector3f,
    dp_dv: Vector3f,
    normal: Vector3f,
    area: Float,
}

impl Rectangle {
    /// `dp_du` and `dp_dv` are half-extents; the normal is `dp_du x dp_dv`.
    pub fn new(center: Vector3f, dp_du: Vector3f, dp_dv: Vector3f) -> Self {
        let cross = dp_du.cross(&dp_dv);
        let area = 4.0 * cross.norm();
        let normal = if cross.norm() > 0.0 {
            cross.normalize()
        } else {
            Vector3f::zeros()
        };

        Self { center, dp_du, dp_dv, normal, area }
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    fn local_coordinates(&self, p: &Vector3f) -> (Float, Float) {
        let d = p - self.center;
        let uu = self.dp_du.norm_squared();
        let vv = self.dp_dv.norm_squared();
        let uv = self.dp_du.dot(&self.dp_dv);
        let du = d.dot(&self.dp_du);
        let dv = d.dot(&self.dp_dv);
        let det = uu * vv - uv * uv;
        if det.abs() < 1e-12 {
            return (Float::MAX, Float::MAX);
        }
        ((du * vv - dv * uv) / det, (dv * uu - du * uv) / det)
    }
}

impl Shape for Rectangle {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<ShapeHit> {
        let denom = self.normal.dot(&ray.dir());
        if denom.abs() < EPSILON {
            return None;
        }

        let t = (self.center - ray.origin()).dot(&self.normal) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let p = ray.at(t);
        let (s, r) = self.local_coordinates(&p);
        if s.abs() > 1.0 || r.abs() > 1.0 {
            return None;
        }

        Some(ShapeHit { t, p, normal: self.normal })
    }

    fn area(&self) -> Float {
        self.area
    }

    fn sample_position(&self, u: &Vector2f) -> (Vector3f, Vector3f) {
        let p = self.center + self.dp_du * (2.0 * u.x - 1.0) + self.dp_dv * (2.0 * u.y - 1.0);
        (p, self.normal)
    }

    fn describe(&self) -> String {
        format!("Rectangle(center: {:?}, area: {})", self.center, self.area)
    }
}
