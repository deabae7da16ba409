// Copyright @yucwang 2023

pub mod dielectric;
pub mod lambertian_diffuse;
pub mod specular;

use crate::math::constants::{Float, Vector3f};

/// Continuation direction picked by a material's sampling rule.
///
/// `weight` multiplies the material color and the radiance estimated along
/// `dir`; it already contains the pdf and any lobe-selection compensation.
/// `offset_normal` is the side of the surface the new ray leaves from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterSample {
    pub dir: Vector3f,
    pub offset_normal: Vector3f,
    pub weight: Float,
}

/// Normal flipped to face against the incoming direction `dir`.
pub fn oriented_normal(normal: &Vector3f, dir: &Vector3f) -> Vector3f {
    if normal.dot(dir) < 0.0 {
        *normal
    } else {
        -normal
    }
}
