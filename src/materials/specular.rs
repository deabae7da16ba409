// Copyright @yucwang 2026

use crate::materials::{oriented_normal, ScatterSample};
use crate::math::constants::Vector3f;

/// Mirror of `wi` about `m`. Both vectors point away from the surface.
pub fn reflect(wi: &Vector3f, m: &Vector3f) -> Vector3f {
    2.0 * wi.dot(m) * m - wi
}

pub fn sample_specular(dir: &Vector3f, normal: &Vector3f) -> ScatterSample {
    let n = oriented_normal(normal, dir);
    ScatterSample { dir: reflect(&-dir, &n), offset_normal: n, weight: 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_direction() {
        let normal = Vector3f::new(0.0, 1.0, 0.0);
        let dir = Vector3f::new(1.0, -1.0, 0.0).normalize();
        let s = sample_specular(&dir, &normal);
        let expected = Vector3f::new(1.0, 1.0, 0.0).normalize();
        assert!((s.dir - expected).norm() < 1e-6);
        assert_eq!(s.offset_normal, normal);
    }
}
