// Copyright @yucwang 2023

use super::constants::{ INV_PI, PI, Float, Vector2f, Vector3f };

pub fn sample_uniform_disk_concentric(u: &Vector2f) -> Vector2f {
    let r1: Float = 2.0 * u.x - 1.0;
    let r2: Float = 2.0 * u.y - 1.0;

    let phi: Float;
    let r:   Float;

    if r1 == 0. && r2 == 0. {
        r = 0.0;
        phi = 0.0;
    } else if r1 * r1 > r2 * r2 {
        r = r1;
        phi = (PI / 4.0) * (r2 / r1);
    } else {
        r = r2;
        phi = (PI / 2.0) - (r1 / r2) * (PI / 4.0);
    }

    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector2f::new(r * cos_phi, r * sin_phi)
}

/// Cosine-weighted direction in the local frame (z is the normal).
pub fn sample_cosine_hemisphere(u: &Vector2f) -> Vector3f {
    let p = sample_uniform_disk_concentric(u);
    let z = (1. - p.x * p.x - p.y * p.y).max(0.0).sqrt();

    Vector3f::new(p.x, p.y, z)
}

pub fn sample_cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;

    #[test]
    fn test_cosine_hemisphere_stays_above_surface() {
        let mut rng = LcgRng::new(7);
        for _ in 0..1000 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let w = sample_cosine_hemisphere(&u);
            assert!(w.z >= 0.0);
            assert!((w.norm() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_cosine_hemisphere_mean_cosine() {
        // E[cos] under the cosine pdf is 2/3.
        let mut rng = LcgRng::new(11);
        let n = 20000;
        let mut sum = 0.0f64;
        for _ in 0..n {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            sum += sample_cosine_hemisphere(&u).z as f64;
        }
        let mean = sum / n as f64;
        assert!((mean - 2.0 / 3.0).abs() < 0.01);
        assert!((sample_cosine_hemisphere_pdf(1.0) - INV_PI).abs() < 1e-6);
    }
}
