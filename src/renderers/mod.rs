// Copyright @yucwang 2021

pub mod progressive;
pub mod renderer;
