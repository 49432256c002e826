// Copyright @yucwang 2026

use crate::core::accumulator::PixelAccumulator;
use crate::core::error::RenderError;
use crate::core::integrator::Integrator;
use crate::core::progress::{ProgressReport, ProgressTracker};
use crate::core::scene::CornellScene;
use crate::core::sensor::Sensor;
use crate::core::settings::{PixelFormat, RenderSettings};
use crate::core::shape::DistanceField;
use crate::integrators::path::PathIntegrator;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::renderers::scheduler::{PixelKernel, SchedulerConfig, ThreadContext, TileScheduler};
use crate::sensors::thin_lens::ThinLensCamera;

/// Camera samples traced through the scene, averaged into the pixel's
/// accumulator and written out tone mapped.
pub struct PathTracingKernel {
    field: Box<dyn DistanceField>,
    camera: Box<dyn Sensor>,
    integrator: Box<dyn Integrator>,
    format: PixelFormat,
}

impl PathTracingKernel {
    pub fn new(field: Box<dyn DistanceField>,
               camera: Box<dyn Sensor>,
               integrator: Box<dyn Integrator>,
               format: PixelFormat) -> Self {
        Self { field, camera, integrator, format }
    }

    pub fn camera(&self) -> &dyn Sensor {
        self.camera.as_ref()
    }

    pub fn integrator(&self) -> &dyn Integrator {
        self.integrator.as_ref()
    }
}

impl PixelKernel for PathTracingKernel {
    fn render_pixel(&self,
                    ctx: &mut ThreadContext,
                    x: usize,
                    y: usize,
                    accumulator: &mut PixelAccumulator,
                    out: &mut [u8]) {
        let mut color = Vector3f::zeros();
        for _ in 0..ctx.samples_per_pixel {
            let dx = ctx.rng.next_f32() - 0.5;
            let dy = ctx.rng.next_f32() - 0.5;
            let film = Vector2f::new(x as Float + dx, y as Float + dy);
            let ray = self.camera.sample_ray(&film, &mut ctx.rng);
            color += self.integrator.trace(self.field.as_ref(), &mut ctx.rng, &ray);
        }
        accumulator.add_samples(&color, ctx.samples_per_pixel);

        out[..3].copy_from_slice(&accumulator.tone_map());
        if self.format == PixelFormat::Rgba8 {
            out[3] = 255;
        }
    }
}

/// A progressive render of the two-room scene. Every call to `render_row`
/// adds `samples_per_pass` samples to each pixel of the row.
pub struct RenderSession {
    settings: RenderSettings,
    seed: u64,
    scheduler: TileScheduler<PathTracingKernel>,
    progress: ProgressTracker,
}

impl RenderSession {
    pub fn new(settings: RenderSettings) -> Result<Self, RenderError> {
        let camera = ThinLensCamera::new(settings.width, settings.height);
        let kernel = PathTracingKernel::new(
            Box::new(CornellScene::new()),
            Box::new(camera),
            Box::new(PathIntegrator::new(settings.max_bounces)),
            settings.pixel_format,
        );
        Self::with_kernel(settings, kernel)
    }

    /// Session over a caller-built kernel; used to swap scene, camera or
    /// integrator.
    pub fn with_kernel(settings: RenderSettings, kernel: PathTracingKernel) -> Result<Self, RenderError> {
        settings.validate()?;
        let seed = settings.resolved_seed();

        log::info!("Rendering {}x{}: {} samples per pass, {} passes, {} threads, {} bounces, seed {}",
                   settings.width, settings.height, settings.samples_per_pass, settings.passes,
                   settings.threads, kernel.integrator().max_bounces(), seed);
        log::info!("{}", kernel.camera().describe());

        let config = SchedulerConfig {
            width: settings.width,
            height: settings.height,
            stride: settings.pixel_format.channels(),
            workers: settings.threads,
            samples_per_pixel: settings.samples_per_pass,
            seed,
        };
        let scheduler = TileScheduler::new(kernel, &config)?;
        let progress = ProgressTracker::new(settings.height as u64 * settings.passes as u64);

        Ok(Self { settings, seed, scheduler, progress })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Seed actually used, after resolving a clock seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn render_row(&mut self, y: usize) -> Result<&[u8], RenderError> {
        let row = self.scheduler.render_row(y)?;
        self.progress.record_row();
        Ok(row)
    }

    /// Renders every row once, top to bottom, handing each finished row to
    /// `on_row`. Returning `false` from the callback stops the pass early.
    pub fn render_pass<F>(&mut self, mut on_row: F) -> Result<bool, RenderError>
        where F: FnMut(usize, &[u8], ProgressReport) -> bool {
        for y in 0..self.settings.height {
            let row = self.scheduler.render_row(y)?;
            self.progress.record_row();
            if !on_row(y, row, self.progress.report()) {
                log::info!("Pass stopped after row {}", y);
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn progress(&self) -> ProgressReport {
        self.progress.report()
    }

    pub fn accumulators(&self) -> &[PixelAccumulator] {
        self.scheduler.accumulators()
    }

    /// Mean radiance per pixel, row-major.
    pub fn mean_radiance(&self) -> Vec<Vector3f> {
        self.accumulators().iter().map(PixelAccumulator::mean).collect()
    }

    /// Starts over: all samples are dropped and progress restarts.
    pub fn reset(&mut self) {
        self.scheduler.reset();
        self.progress.restart();
        log::debug!("Session reset");
    }
}
