// Copyright @yucwang 2026

use crate::core::material::Material;
use crate::core::scene::{Scene, SceneObject};
use crate::math::constants::Vector3f;
use crate::math::spectrum::RGBSpectrum;
use crate::shapes::sphere::Sphere;

use std::sync::Arc;

/// White diffuse unit sphere at the origin lit by a small emissive sphere.
pub fn lit_sphere() -> Scene {
    let mut scene = Scene::new();
    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::zeros(), 1.0)),
        Material::diffuse(RGBSpectrum::splat(0.99))).with_name("white"));
    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(1.2, 1.8, 1.5), 0.5)),
        Material::diffuse(RGBSpectrum::black()).with_emission(RGBSpectrum::splat(16.0))).with_name("light"));
    scene
}
