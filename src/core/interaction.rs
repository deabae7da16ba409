// Copyright @yucwang 2023

use crate::core::material::Material;
use crate::math::constants::{ Float, Vector3f };

/// Geometric part of a hit, as reported by a shape.
#[derive(Debug, Clone, Copy)]
pub struct ShapeHit {
    pub t: Float,
    pub p: Vector3f,
    pub normal: Vector3f,
}

/// Nearest hit of a scene query. Lives only as long as the query that
/// produced it.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceIntersection<'a> {
    p: Vector3f,
    geo_normal: Vector3f,
    t: Float,
    material: &'a Material,
    object_index: usize,
}

impl<'a> SurfaceIntersection<'a> {
    pub fn new(hit: ShapeHit, material: &'a Material, object_index: usize) -> Self {
        Self { p: hit.p, geo_normal: hit.normal, t: hit.t, material, object_index }
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    pub fn material(&self) -> &'a Material {
        self.material
    }

    pub fn object_index(&self) -> usize {
        self.object_index
    }
}
