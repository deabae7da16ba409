// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::material::{Material, Surface};
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::materials::dielectric::sample_dielectric;
use crate::materials::lambertian_diffuse::sample_diffuse;
use crate::materials::specular::sample_specular;
use crate::materials::oriented_normal;
use crate::math::constants::{EPSILON, Float, INV_PI, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Bounces below this depth always continue.
pub const ROULETTE_MIN_DEPTH: u32 = 5;
/// Paths are cut at this depth whatever the roulette says. This drops the
/// energy of longer paths (biased) and bounds the recursion on the stack.
pub const MAX_DEPTH: u32 = 128;

pub struct PathIntegrator {
    pub roulette_min_depth: u32,
    pub max_depth: u32,
    /// Sample emissive objects directly at diffuse hits. Emission reached
    /// by a diffuse bounce is then skipped so it is counted once.
    pub next_event_estimation: bool,
}

impl Default for PathIntegrator {
    fn default() -> Self {
        Self::new(ROULETTE_MIN_DEPTH, MAX_DEPTH)
    }
}

impl PathIntegrator {
    pub fn new(roulette_min_depth: u32, max_depth: u32) -> Self {
        Self { roulette_min_depth, max_depth, next_event_estimation: false }
    }

    pub fn with_next_event_estimation(mut self, enabled: bool) -> Self {
        self.next_event_estimation = enabled;
        self
    }

    /// Probability of extending the path after a hit at `depth`.
    pub fn continuation_probability(&self, material: &Material, depth: u32) -> Float {
        if depth < self.roulette_min_depth {
            1.0
        } else {
            material.reflectance_magnitude()
        }
    }

    fn trace(&self, scene: &Scene, ray: &Ray3f, rng: &mut LcgRng, depth: u32, count_emission: bool) -> RGBSpectrum {
        let intersection = match scene.ray_intersection(ray) {
            Some(h) => h,
            None => return scene.background(ray),
        };

        let material = intersection.material();
        let emitted = if count_emission { material.emission } else { RGBSpectrum::black() };
        if depth >= self.max_depth {
            return emitted;
        }

        let continue_prob = self.continuation_probability(material, depth);
        if continue_prob <= 0.0 {
            return emitted;
        }
        if continue_prob < 1.0 && rng.next_f32() >= continue_prob {
            return emitted;
        }

        let dir = ray.dir();
        let normal = usable_normal(intersection.geo_normal(), &dir);
        let (scatter, direct, next_counts_emission) = match material.surface {
            Surface::Diffuse => {
                let direct = if self.next_event_estimation {
                    direct_lighting(scene, intersection.p(), &oriented_normal(&normal, &dir), rng)
                } else {
                    RGBSpectrum::black()
                };
                let u = Vector2f::new(rng.next_f32(), rng.next_f32());
                (sample_diffuse(&dir, &normal, &u), direct, !self.next_event_estimation)
            }
            Surface::Specular => (sample_specular(&dir, &normal), RGBSpectrum::black(), true),
            Surface::Refraction { ior } => {
                (sample_dielectric(&dir, &normal, ior, rng.next_f32()).scatter, RGBSpectrum::black(), true)
            }
        };

        let next_ray = Ray3f::spawn(intersection.p(), scatter.offset_normal, scatter.dir);
        let incoming = self.trace(scene, &next_ray, rng, depth + 1, next_counts_emission);

        if self.next_event_estimation {
            emitted + material.color * (direct + incoming * scatter.weight) * (1.0 / continue_prob)
        } else {
            emitted + material.color * incoming * (scatter.weight / continue_prob)
        }
    }
}

impl Integrator for PathIntegrator {
    fn radiance(&self, scene: &Scene, ray: &Ray3f, rng: &mut LcgRng, depth: u32) -> RGBSpectrum {
        self.trace(scene, ray, rng, depth, true)
    }

    fn describe(&self) -> String {
        format!("PathIntegrator(roulette_min_depth: {}, max_depth: {}, next_event_estimation: {})",
                self.roulette_min_depth, self.max_depth, self.next_event_estimation)
    }
}

/// One-sample estimate of the radiance reflected by a white Lambertian
/// surface at `p` from a point sampled on an emitter. `n` faces the side the
/// path arrived from.
fn direct_lighting(scene: &Scene, p: Vector3f, n: &Vector3f, rng: &mut LcgRng) -> RGBSpectrum {
    let pick = rng.next_f32();
    let u = Vector2f::new(rng.next_f32(), rng.next_f32());
    let (index, pick_prob) = match scene.sample_emitter(pick) {
        Some(e) => e,
        None => return RGBSpectrum::black(),
    };

    let emitter = &scene.objects()[index];
    let (q, light_normal) = emitter.shape.sample_position(&u);
    let to_light = q - p;
    let dist2 = to_light.norm_squared();
    if !(dist2 > 1e-10) {
        return RGBSpectrum::black();
    }
    let dist = dist2.sqrt();
    let wi = to_light / dist;
    let cos_surface = n.dot(&wi);
    // Emitters radiate from both faces, like emission found by path hits.
    let cos_light = light_normal.dot(&wi).abs();
    if cos_surface <= 0.0 || cos_light <= 0.0 {
        return RGBSpectrum::black();
    }

    let mut shadow = Ray3f::spawn(p, *n, wi);
    shadow.max_t = dist - 2.0 * EPSILON;
    if shadow.max_t <= shadow.min_t || scene.occluded(&shadow) {
        return RGBSpectrum::black();
    }

    let geometry = cos_surface * cos_light / dist2;
    emitter.material.emission * (INV_PI * geometry * emitter.shape.area() / pick_prob)
}

// Zero-length or non-finite normals are replaced by the reversed ray
// direction so the offset origin still leaves the surface.
fn usable_normal(n: Vector3f, dir: &Vector3f) -> Vector3f {
    let len2 = n.norm_squared();
    if len2.is_finite() && len2 > 1e-12 {
        n / len2.sqrt()
    } else {
        -dir
    }
}
