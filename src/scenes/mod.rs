// Copyright @yucwang 2026

pub mod cornell_box;
pub mod test_scene;

use crate::core::scene::Scene;

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    UnknownScene(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SceneError::UnknownScene(name) =>
                write!(f, "unknown scene '{}' (available: {})", name, SCENE_NAMES.join(", ")),
        }
    }
}

impl std::error::Error for SceneError {}

pub const SCENE_NAMES: [&str; 3] = ["cornell_box", "ibl_test", "test"];

/// Builds one of the built-in scenes by name.
pub fn create_scene(name: &str) -> Result<Scene, SceneError> {
    match name {
        "cornell_box" => Ok(cornell_box::cornell_box()),
        "ibl_test" => Ok(ibl_test::ibl_spheres()),
        "test" => Ok(test_scene::lit_sphere()),
        _ => Err(SceneError::UnknownScene(name.to_string())),
    }
}
