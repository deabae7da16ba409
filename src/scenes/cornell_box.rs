// Copyright @yucwang 2026

use crate::core::material::Material;
use crate::core::scene::{Scene, SceneObject};
use crate::math::constants::Vector3f;
use crate::math::spectrum::RGBSpectrum;
use crate::shapes::rectangle::Rectangle;
use crate::shapes::sphere::Sphere;

use std::sync::Arc;

/// Box spanning [-1, 1]^3 with an open front (+z), a rectangular light under
/// the ceiling, a mirror ball and a glass ball.
pub fn cornell_box() -> Scene {
    let white = Material::diffuse(RGBSpectrum::splat(0.75));
    let red = Material::diffuse(RGBSpectrum::new(0.75, 0.25, 0.25));
    let green = Material::diffuse(RGBSpectrum::new(0.25, 0.75, 0.25));
    let x = Vector3f::new(1.0, 0.0, 0.0);
    let y = Vector3f::new(0.0, 1.0, 0.0);
    let z = Vector3f::new(0.0, 0.0, 1.0);

    let mut scene = Scene::new();
    scene.add_object(SceneObject::new(Arc::new(Rectangle::new(-y, z, x)), white).with_name("floor"));
    scene.add_object(SceneObject::new(Arc::new(Rectangle::new(y, x, z)), white).with_name("ceiling"));
    scene.add_object(SceneObject::new(Arc::new(Rectangle::new(-z, x, y)), white).with_name("back"));
    scene.add_object(SceneObject::new(Arc::new(Rectangle::new(-x, y, z)), red).with_name("left"));
    scene.add_object(SceneObject::new(Arc::new(Rectangle::new(x, z, y)), green).with_name("right"));

    let light = Material::diffuse(RGBSpectrum::black()).with_emission(RGBSpectrum::splat(12.0));
    scene.add_object(SceneObject::new(
        Arc::new(Rectangle::new(Vector3f::new(0.0, 0.998, 0.0), x * 0.3, z * 0.3)),
        light).with_name("light"));

    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(-0.45, -0.65, -0.35), 0.35)),
        Material::specular(RGBSpectrum::splat(0.999))).with_name("mirror_ball"));
    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(0.45, -0.65, 0.25), 0.35)),
        Material::refraction(RGBSpectrum::splat(0.999), 1.5)).with_name("glass_ball"));
    scene
}
