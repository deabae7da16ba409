// Copyright @yucwang 2026

use crate::materials::specular::reflect;
use crate::materials::{oriented_normal, ScatterSample};
use crate::math::constants::{Float, Vector3f};

/// Index of refraction outside every dielectric.
pub const AIR_IOR: Float = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DielectricLobe {
    Reflection,
    Refraction,
    TotalInternalReflection,
}

#[derive(Debug, Clone, Copy)]
pub struct DielectricSample {
    pub lobe: DielectricLobe,
    pub scatter: ScatterSample,
    /// Fresnel reflectance used to pick the lobe (1 under total internal
    /// reflection).
    pub reflect_probability: Float,
}

/// Transmitted direction for `wi` (pointing away, same side as `m`) and
/// `eta = eta_i / eta_t`, or `None` under total internal reflection.
pub fn refract(wi: &Vector3f, m: &Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_i = wi.dot(m).max(-1.0).min(1.0);
    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let wt = -eta * wi + (eta * cos_i - cos_t) * m;
    Some(wt)
}

/// Unpolarized Fresnel reflectance. A negative `cos_i` means the light
/// arrives from the `eta_t` side.
pub fn fresnel_dielectric(cos_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let mut cos_i = cos_i.max(-1.0).min(1.0);
    let entering = cos_i > 0.0;
    let (eta_i, eta_t) = if entering { (eta_i, eta_t) } else { (eta_t, eta_i) };
    cos_i = cos_i.abs();

    let sin2_i = (1.0 - cos_i * cos_i).max(0.0);
    let eta = eta_i / eta_t;
    let sin2_t = eta * eta * sin2_i;
    if sin2_t >= 1.0 {
        return 1.0;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    let r_parl = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let r_perp = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    0.5 * (r_parl * r_parl + r_perp * r_perp)
}

/// Picks one lobe of a smooth dielectric with `ior` inside and air outside.
///
/// `dir` is the incoming ray direction, `normal` the outward surface normal
/// and `u` a uniform value in [0, 1). Reflection is chosen with probability
/// equal to the Fresnel reflectance, so the Fresnel term cancels against the
/// selection probability; the refracted lobe keeps the `(eta_i / eta_t)^2`
/// radiance scale.
pub fn sample_dielectric(dir: &Vector3f, normal: &Vector3f, ior: Float, u: Float) -> DielectricSample {
    let wi = -dir;
    let n = oriented_normal(normal, dir);
    let entering = normal.dot(dir) < 0.0;
    let (eta_i, eta_t) = if entering { (AIR_IOR, ior) } else { (ior, AIR_IOR) };
    let eta = eta_i / eta_t;

    let reflected = ScatterSample { dir: reflect(&wi, &n), offset_normal: n, weight: 1.0 };
    let transmitted = match refract(&wi, &n, eta) {
        Some(wt) => wt.normalize(),
        None => {
            return DielectricSample {
                lobe: DielectricLobe::TotalInternalReflection,
                scatter: reflected,
                reflect_probability: 1.0,
            };
        }
    };

    let fr = fresnel_dielectric(wi.dot(&n), eta_i, eta_t);
    if u < fr {
        DielectricSample {
            lobe: DielectricLobe::Reflection,
            scatter: reflected,
            reflect_probability: fr,
        }
    } else {
        DielectricSample {
            lobe: DielectricLobe::Refraction,
            scatter: ScatterSample { dir: transmitted, offset_normal: -n, weight: eta * eta },
            reflect_probability: fr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;

    #[test]
    fn test_fresnel_normal_incidence() {
        // ((1 - 1.5) / (1 + 1.5))^2
        let fr = fresnel_dielectric(1.0, 1.0, 1.5);
        assert!((fr - 0.04).abs() < 1e-5);
        // Same value regardless of the side the light comes from.
        assert!((fresnel_dielectric(-1.0, 1.0, 1.5) - 0.04).abs() < 1e-5);
    }

    #[test]
    fn test_refract_obeys_snell() {
        let n = Vector3f::new(0.0, 1.0, 0.0);
        let wi = Vector3f::new(-1.0, 1.0, 0.0).normalize();
        let eta = 1.0 / 1.5;
        let wt = refract(&wi, &n, eta).expect("no total internal reflection entering glass");
        let sin_i = (1.0 - wi.dot(&n).powi(2)).sqrt();
        let sin_t = (1.0 - wt.dot(&n).powi(2)).sqrt();
        assert!((sin_i * 1.0 - sin_t * 1.5).abs() < 1e-4);
        assert!(wt.y < 0.0);
        assert!((wt.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_total_internal_reflection_falls_back_to_mirror() {
        let normal = Vector3f::new(0.0, 1.0, 0.0);
        // Inside the glass, travelling outward at a grazing angle.
        let dir = Vector3f::new(1.0, 0.2, 0.0).normalize();
        let sample = sample_dielectric(&dir, &normal, 1.5, 0.99);
        assert_eq!(sample.lobe, DielectricLobe::TotalInternalReflection);
        assert_eq!(sample.reflect_probability, 1.0);
        assert!(sample.scatter.dir.y < 0.0);
        assert_eq!(sample.scatter.offset_normal, -normal);
    }

    #[test]
    fn test_refraction_weight_and_side() {
        let normal = Vector3f::new(0.0, 1.0, 0.0);
        let dir = Vector3f::new(0.0, -1.0, 0.0);
        let sample = sample_dielectric(&dir, &normal, 1.5, 0.5);
        assert_eq!(sample.lobe, DielectricLobe::Refraction);
        assert!((sample.scatter.weight - 1.0 / 2.25).abs() < 1e-5);
        assert!((sample.scatter.dir - dir).norm() < 1e-5);
        assert_eq!(sample.scatter.offset_normal, -normal);

        let leaving = sample_dielectric(&-dir, &normal, 1.5, 0.5);
        assert_eq!(leaving.lobe, DielectricLobe::Refraction);
        assert!((leaving.scatter.weight - 2.25).abs() < 1e-4);
    }

    #[test]
    fn test_split_frequency_matches_fresnel() {
        let normal = Vector3f::new(0.0, 1.0, 0.0);
        let dir = Vector3f::new(0.8, -0.35, 0.1).normalize();
        let mut rng = LcgRng::from_stream(17, 0);
        let n = 200_000;
        let mut reflections = 0usize;
        let mut expected = 0.0;
        for _ in 0..n {
            let sample = sample_dielectric(&dir, &normal, 1.5, rng.next_f32());
            expected = sample.reflect_probability;
            if sample.lobe == DielectricLobe::Reflection {
                reflections += 1;
            }
        }
        let freq = reflections as Float / n as Float;
        assert!(expected > 0.05 && expected < 0.95);
        // Several standard deviations of a binomial with n = 200k.
        assert!((freq - expected).abs() < 0.005);
    }
}
