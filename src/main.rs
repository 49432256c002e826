// Copyright 2020 TwoCookingMice

use marchbox::core::error::RenderError;
use marchbox::core::settings::{PixelFormat, RenderSettings};
use marchbox::io::exr_utils;
use marchbox::io::image_utils::{FrameBuffer, Orientation};
use marchbox::renderers::progressive::RenderSession;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

/// Progressive path tracer for the two-room distance-field scene.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 640)]
    width: usize,

    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Samples added to every pixel per pass
    #[arg(short, long, default_value_t = 4)]
    samples: u32,

    #[arg(short, long, default_value_t = 256)]
    passes: u32,

    /// Worker threads, the main thread included; defaults to all cores
    #[arg(short, long)]
    threads: Option<usize>,

    /// Fixed seed for reproducible output; seeded from the clock otherwise
    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, default_value_t = 3)]
    bounces: u32,

    /// Write RGBA with an opaque alpha channel
    #[arg(long, default_value_t = false)]
    rgba: bool,

    /// Keep columns in render order instead of mirroring them
    #[arg(long, default_value_t = false)]
    flip: bool,

    #[arg(short, long, default_value = "out.png")]
    out: String,

    /// Also write the mean radiance as OpenEXR
    #[arg(long)]
    exr: Option<String>,
}

fn run(args: Args) -> Result<(), RenderError> {
    let threads = args.threads.unwrap_or_else(|| {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    });
    let settings = RenderSettings {
        width: args.width,
        height: args.height,
        samples_per_pass: args.samples,
        passes: args.passes,
        threads,
        max_bounces: args.bounces,
        seed: args.seed,
        pixel_format: if args.rgba { PixelFormat::Rgba8 } else { PixelFormat::Rgb8 },
    };

    let mut session = RenderSession::new(settings.clone())?;
    let orientation = Orientation { mirror_columns: !args.flip };
    let mut frame = FrameBuffer::new(settings.width, settings.height, settings.pixel_format, orientation);

    let total_rows = settings.height as u64 * settings.passes as u64;
    let progress = ProgressBar::new(total_rows);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {msg} x{prefix}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.set_prefix(settings.threads.to_string());

    for pass in 0..settings.passes {
        let mut failed = None;
        session.render_pass(|y, row, report| {
            if let Err(err) = frame.place_row(y, row) {
                failed = Some(err);
                return false;
            }
            progress.inc(1);
            progress.set_message(report.to_string());
            true
        })?;
        if let Some(err) = failed {
            return Err(err);
        }
        log::info!("Pass {} of {} finished", pass + 1, settings.passes);
    }
    progress.finish();
    log::info!("Finished in {:?}", session.progress().elapsed);

    frame.save(&args.out)?;

    if let Some(path) = args.exr.as_deref() {
        let radiance = orientation.apply(&session.mean_radiance(), settings.width, settings.height);
        exr_utils::write_exr_to_file(&radiance, settings.width, settings.height, path)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
