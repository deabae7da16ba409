// Copyright @yucwang 2021

pub mod integrator;
pub mod interaction;
pub mod material;
pub mod rng;
pub mod scene;
pub mod sensor;
pub mod settings;
pub mod shape;
