// Copyright @yucwang 2023

use crate::materials::{oriented_normal, ScatterSample};
use crate::math::constants::{ Vector2f, Vector3f };
use crate::math::frame::Frame;
use crate::math::warp::sample_cosine_hemisphere;

/// Cosine-weighted bounce. With `f = color / pi` and `pdf = cos / pi` the
/// cosine and pdf cancel, leaving a unit weight on the color.
pub fn sample_diffuse(dir: &Vector3f, normal: &Vector3f, u: &Vector2f) -> ScatterSample {
    let n = oriented_normal(normal, dir);
    let frame = Frame::from_normal(n);
    let wi = frame.from_local(sample_cosine_hemisphere(u)).normalize();

    ScatterSample { dir: wi, offset_normal: n, weight: 1.0 }
}
