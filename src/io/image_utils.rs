// Copyright @yucwang 2026

use crate::core::error::RenderError;
use crate::core::settings::PixelFormat;

use image::ColorType;

/// Where rendered pixel `(x, y)` lands in the saved frame. Rows are always
/// stacked bottom-up, so render row 0 (the top of the film) is the last line
/// of the file; columns are reversed unless `mirror_columns` is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    pub mirror_columns: bool,
}

impl Default for Orientation {
    fn default() -> Self {
        Self { mirror_columns: true }
    }
}

impl Orientation {
    pub fn column(&self, x: usize, width: usize) -> usize {
        if self.mirror_columns { width - 1 - x } else { x }
    }

    pub fn line(&self, y: usize, height: usize) -> usize {
        height - 1 - y
    }

    /// Reorders row-major render-order pixels into frame order.
    pub fn apply<T: Copy>(&self, pixels: &[T], width: usize, height: usize) -> Vec<T> {
        let mut out = pixels.to_vec();
        for y in 0..height {
            for x in 0..width {
                out[self.line(y, height) * width + self.column(x, width)] = pixels[y * width + x];
            }
        }
        out
    }
}

/// 8-bit frame assembled from finished rows.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    format: PixelFormat,
    orientation: Orientation,
    data: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, format: PixelFormat, orientation: Orientation) -> Self {
        Self { width, height, format, orientation, data: vec![0; width * height * format.channels()] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn row_bytes(&self) -> usize {
        self.width * self.format.channels()
    }

    /// Line `line` of the saved frame, counted from the top of the file.
    pub fn line(&self, line: usize) -> &[u8] {
        let stride = self.row_bytes();
        &self.data[line * stride..(line + 1) * stride]
    }

    /// Stores render row `y` at its place in the frame.
    pub fn place_row(&mut self, y: usize, row: &[u8]) -> Result<(), RenderError> {
        if y >= self.height {
            return Err(RenderError::RowOutOfRange { row: y, height: self.height });
        }
        let stride = self.row_bytes();
        if row.len() != stride {
            return Err(RenderError::Image(format!("row of {} bytes, expected {}", row.len(), stride)));
        }

        let channels = self.format.channels();
        let start = self.orientation.line(y, self.height) * stride;
        let line = &mut self.data[start..start + stride];
        for (x, pixel) in row.chunks(channels).enumerate() {
            let column = self.orientation.column(x, self.width);
            line[column * channels..(column + 1) * channels].copy_from_slice(pixel);
        }
        Ok(())
    }

    /// Saves the frame; the file format follows the path's extension.
    pub fn save(&self, path: &str) -> Result<(), RenderError> {
        let color = match self.format {
            PixelFormat::Rgb8 => ColorType::Rgb8,
            PixelFormat::Rgba8 => ColorType::Rgba8,
        };
        image::save_buffer(path, &self.data, self.width as u32, self.height as u32, color)?;
        log::info!("Image written to: {}.", path);
        Ok(())
    }
}
