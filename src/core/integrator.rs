// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

pub trait Integrator: Send + Sync {
    /// Estimate of the radiance arriving along `ray`. `depth` is 0 for
    /// camera rays.
    fn radiance(&self, scene: &Scene, ray: &Ray3f, rng: &mut LcgRng, depth: u32) -> RGBSpectrum;
    fn describe(&self) -> String {
        String::from("Integrator")
    }
}
