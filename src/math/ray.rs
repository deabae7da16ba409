// Copyright 2020 @TwoCookingMice

use super::constants::{EPSILON, FLOAT_MAX, Float, Vector3f};

#[derive(Debug, Clone, Copy)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(FLOAT_MAX)}
    }

    /// Secondary ray leaving a surface. The origin is pushed off the surface
    /// along `offset_normal` so the next query cannot hit the same point.
    pub fn spawn(p: Vector3f, offset_normal: Vector3f, d: Vector3f) -> Self {
        Self::new(p + offset_normal * EPSILON, d, Some(EPSILON), None)
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }
}

/* Tests for Ray */
