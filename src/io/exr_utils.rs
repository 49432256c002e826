/* Copyright 2020 @TwoCookingMice */

use crate::core::error::RenderError;
use crate::math::constants::Vector3f;

use exr::prelude::write_rgb_file;

/// Writes linear radiance, row-major, as an RGB OpenEXR file.
pub fn write_exr_to_file(image: &[Vector3f],
                         width: usize,
                         height: usize,
                         file_path: &str) -> Result<(), RenderError> {
    if image.len() != width * height {
        return Err(RenderError::Image(format!(
            "expected {} pixels for {}x{}, got {}", width * height, width, height, image.len())));
    }
    log::info!("Starting writing openexr images: {}.", file_path);

    write_rgb_file(file_path, width, height, |x, y| {
        let c = image[y * width + x];
        (c.x, c.y, c.z)
    })?;

    log::info!("EXR written to: {}.", file_path);
    Ok(())
}
