// Copyright @yucwang 2026

use std::fmt;

#[derive(Debug)]
pub enum RenderError {
    Io(std::io::Error),
    InvalidSettings(String),
    RowOutOfRange { row: usize, height: usize },
    /// A worker thread stopped answering the row barrier.
    WorkerLost,
    Image(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Io(err) => write!(f, "io error: {}", err),
            RenderError::InvalidSettings(msg) => write!(f, "invalid settings: {}", msg),
            RenderError::RowOutOfRange { row, height } => {
                write!(f, "row {} is outside an image of height {}", row, height)
            }
            RenderError::WorkerLost => write!(f, "a render worker thread exited unexpectedly"),
            RenderError::Image(msg) => write!(f, "image output error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Image(err.to_string())
    }
}

impl From<exr::error::Error> for RenderError {
    fn from(err: exr::error::Error) -> Self {
        RenderError::Image(err.to_string())
    }
}
