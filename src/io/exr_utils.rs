/* Copyright 2020 @TwoCookingMice */

use crate::math::constants::Float;

use exr::prelude::*;

// Write linear radiance to an OpenEXR file
pub fn write_exr_to_file(image: &[(Float, Float, Float)],
                         width: usize,
                         height: usize,
                         file_path: &str) -> std::result::Result<(), exr::error::Error> {
    log::info!("Starting writing openexr images: {}.", file_path);

    write_rgb_file(file_path, width, height, |x,y| {
        (
            image[y*width+x].0,
            image[y*width+x].1,
            image[y*width+x].2
        )
    })
}

#[cfg(test)]
mod tests {
    use super::write_exr_to_file;

    #[test]
    fn test_write_exr() {
        let path = std::env::temp_dir().join(format!("dango_exr_{}.exr", std::process::id()));
        let image = vec![(0.5, 1.0, 2.0); 6];
        let path_str = path.to_string_lossy().to_string();
        write_exr_to_file(&image, 3, 2, &path_str).expect("exr written");
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
