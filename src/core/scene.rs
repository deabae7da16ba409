// Copyright @yucwang 2026

use crate::core::interaction::SurfaceIntersection;
use crate::core::material::Material;
use crate::core::shape::Shape;
use crate::emitters::envmap::EnvironmentMap;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

pub struct SceneObject {
    pub shape: Arc<dyn Shape>,
    pub material: Material,
    pub name: Option<String>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, material: Material) -> Self {
        Self { shape, material, name: None }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn shape(&self) -> &Arc<dyn Shape> {
        &self.shape
    }
}

/// Radiance returned for rays that leave the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Constant(RGBSpectrum),
    /// Blend from `horizon` (direction.y <= 0) up to `zenith` (direction.y = 1).
    Gradient { horizon: RGBSpectrum, zenith: RGBSpectrum },
    /// Image based lighting.
    Environment(Arc<EnvironmentMap>),
}

impl Default for Background {
    fn default() -> Self {
        Background::Constant(RGBSpectrum::black())
    }
}

impl Background {
    pub fn eval(&self, dir: &Vector3f) -> RGBSpectrum {
        match self {
            Background::Constant(value) => *value,
            Background::Gradient { horizon, zenith } => {
                let s: Float = dir.y.max(0.0).min(1.0);
                *horizon * (1.0 - s) + *zenith * s
            }
            Background::Environment(map) => map.eval(dir),
        }
    }
}

pub struct Scene {
    objects: Vec<SceneObject>,
    /// Indices of emissive objects and their emitted power (luminance x area).
    emitters: Vec<(usize, Float)>,
    emitter_power: Float,
    background: Background,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            emitters: Vec::new(),
            emitter_power: 0.0,
            background: Background::default(),
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        if object.material.is_emissive() {
            let power = (object.material.emission.luminance() * object.shape.area()).max(0.0);
            self.emitters.push((self.objects.len(), power));
            self.emitter_power += power;
        }
        self.objects.push(object);
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    /// Picks an emissive object with probability proportional to its power,
    /// uniformly if no emitter carries measurable power. Returns the object
    /// index and the selection probability.
    pub fn sample_emitter(&self, u: Float) -> Option<(usize, Float)> {
        if self.emitters.is_empty() {
            return None;
        }
        if !(self.emitter_power > 0.0) {
            let n = self.emitters.len();
            let i = ((u * n as Float) as usize).min(n - 1);
            return Some((self.emitters[i].0, 1.0 / n as Float));
        }

        let target = u * self.emitter_power;
        let mut running = 0.0;
        for &(index, power) in &self.emitters {
            running += power;
            if target < running && power > 0.0 {
                return Some((index, power / self.emitter_power));
            }
        }
        self.emitters.iter()
            .rev()
            .find(|(_, power)| *power > 0.0)
            .map(|&(index, power)| (index, power / self.emitter_power))
    }

    pub fn objects(&self) -> &Vec<SceneObject> {
        &self.objects
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    pub fn background(&self, ray: &Ray3f) -> RGBSpectrum {
        self.background.eval(&ray.dir())
    }

    /// Nearest hit over every object. Linear in the object count.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection<'_>> {
        let mut nearest = *ray;
        let mut result = None;
        for (idx, object) in self.objects.iter().enumerate() {
            if let Some(hit) = object.shape.ray_intersection(&nearest) {
                nearest.max_t = hit.t;
                result = Some(SurfaceIntersection::new(hit, &object.material, idx));
            }
        }
        result
    }

    /// Whether anything blocks `ray` inside its segment.
    pub fn occluded(&self, ray: &Ray3f) -> bool {
        self.objects.iter().any(|object| object.shape.ray_intersection(ray).is_some())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
