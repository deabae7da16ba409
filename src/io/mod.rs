// Copyright 2020 @TwoCookingMice

pub mod exr_utils;
pub mod png_utils;
pub mod saver;
pub mod timed_saver;
