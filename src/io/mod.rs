pub mod exr_utils;
pub mod image_utils;
