// Copyright @yucwang 2023

use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;

/// Scattering behaviour of a surface. Each variant carries only what its
/// sampling rule needs; the shared reflectance lives on `Material`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    Diffuse,
    Specular,
    Refraction { ior: Float },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: RGBSpectrum,
    pub emission: RGBSpectrum,
    pub surface: Surface,
}

impl Material {
    pub fn new(color: RGBSpectrum, emission: RGBSpectrum, surface: Surface) -> Self {
        Self { color, emission, surface }
    }

    pub fn diffuse(color: RGBSpectrum) -> Self {
        Self::new(color, RGBSpectrum::black(), Surface::Diffuse)
    }

    pub fn specular(color: RGBSpectrum) -> Self {
        Self::new(color, RGBSpectrum::black(), Surface::Specular)
    }

    pub fn refraction(color: RGBSpectrum, ior: Float) -> Self {
        Self::new(color, RGBSpectrum::black(), Surface::Refraction { ior })
    }

    pub fn with_emission(mut self, emission: RGBSpectrum) -> Self {
        self.emission = emission;
        self
    }

    pub fn is_emissive(&self) -> bool {
        !self.emission.is_black()
    }

    /// Reflectance magnitude driving Russian roulette.
    pub fn reflectance_magnitude(&self) -> Float {
        self.color.max_component().min(1.0).max(0.0)
    }

    pub fn name(&self) -> &'static str {
        match self.surface {
            Surface::Diffuse => "diffuse",
            Surface::Specular => "specular",
            Surface::Refraction { .. } => "refraction",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflectance_magnitude_is_clamped() {
        let m = Material::diffuse(RGBSpectrum::new(0.2, 1.7, 0.4));
        assert_eq!(m.reflectance_magnitude(), 1.0);
        let m = Material::specular(RGBSpectrum::new(0.2, 0.5, 0.4));
        assert_eq!(m.reflectance_magnitude(), 0.5);
    }

    #[test]
    fn test_emission_builder() {
        let m = Material::diffuse(RGBSpectrum::black()).with_emission(RGBSpectrum::splat(4.0));
        assert!(m.is_emissive());
        assert_eq!(m.name(), "diffuse");
        assert!(!Material::refraction(RGBSpectrum::splat(1.0), 1.5).is_emissive());
    }
}
