// Copyright @yucwang 2026

use crate::core::error::RenderError;
use crate::core::rng::time_seed;

/// Upper bound on worker threads per session.
pub const MAX_THREADS: usize = 256;

/// Byte layout of one pixel in a row buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    /// RGB followed by a constant alpha of 255.
    Rgba8,
}

impl PixelFormat {
    pub fn channels(&self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Start-of-session configuration. Nothing here can change while a session
/// is running.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub width: usize,
    pub height: usize,
    pub samples_per_pass: u32,
    pub passes: u32,
    pub threads: usize,
    pub max_bounces: u32,
    /// `None` seeds from the wall clock.
    pub seed: Option<u64>,
    pub pixel_format: PixelFormat,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            samples_per_pass: 4,
            passes: 256,
            threads: 1,
            max_bounces: 3,
            seed: None,
            pixel_format: PixelFormat::Rgb8,
        }
    }
}

impl RenderSettings {
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidSettings(format!(
                "image size must be non-zero, got {}x{}", self.width, self.height)));
        }
        if self.width > isize::MAX as usize {
            return Err(RenderError::InvalidSettings(format!("width {} is too large", self.width)));
        }
        if self.samples_per_pass == 0 {
            return Err(RenderError::InvalidSettings(String::from("samples per pass must be at least 1")));
        }
        if self.passes == 0 {
            return Err(RenderError::InvalidSettings(String::from("pass count must be at least 1")));
        }
        if self.total_samples() > u32::MAX as u64 {
            return Err(RenderError::InvalidSettings(format!(
                "{} passes of {} samples overflow the per-pixel sample count",
                self.passes, self.samples_per_pass)));
        }
        if self.threads == 0 || self.threads > MAX_THREADS {
            return Err(RenderError::InvalidSettings(format!(
                "thread count must be in 1..={}, got {}", MAX_THREADS, self.threads)));
        }
        Ok(())
    }

    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(time_seed)
    }

    pub fn total_samples(&self) -> u64 {
        self.samples_per_pass as u64 * self.passes as u64
    }

    pub fn row_bytes(&self) -> usize {
        self.width * self.pixel_format.channels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = RenderSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.total_samples(), 1024);
        assert_eq!(settings.row_bytes(), 640 * 3);
    }

    #[test]
    fn test_rejects_bad_values() {
        let mut settings = RenderSettings::default();
        settings.width = 0;
        assert!(settings.validate().is_err());

        let mut settings = RenderSettings::default();
        settings.threads = MAX_THREADS + 1;
        assert!(settings.validate().is_err());

        let mut settings = RenderSettings::default();
        settings.samples_per_pass = 0;
        assert!(settings.validate().is_err());

        let mut settings = RenderSettings::default();
        settings.passes = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_sample_count_overflow() {
        let mut settings = RenderSettings::default();
        settings.samples_per_pass = 1 << 16;
        settings.passes = 1 << 16;
        assert!(matches!(settings.validate(), Err(RenderError::InvalidSettings(_))));

        settings.passes = (1 << 16) - 1;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_explicit_seed_is_kept() {
        let mut settings = RenderSettings::default();
        settings.seed = Some(99);
        assert_eq!(settings.resolved_seed(), 99);
    }

    #[test]
    fn test_rgba_row_bytes() {
        let mut settings = RenderSettings::default();
        settings.pixel_format = PixelFormat::Rgba8;
        assert_eq!(settings.row_bytes(), 640 * 4);
    }
}
