use marchbox::core::accumulator::PixelAccumulator;
use marchbox::core::integrator::Integrator;
use marchbox::core::rng::LcgRng;
use marchbox::core::scene::CornellScene;
use marchbox::core::sensor::Sensor;
use marchbox::integrators::path::PathIntegrator;
use marchbox::math::constants::{Float, Vector2f, Vector3f};
use marchbox::sensors::thin_lens::ThinLensCamera;

use clap::Parser;

/// Traces a single pixel and prints its mean radiance.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    x: usize,
    y: usize,

    #[arg(long, default_value_t = 640)]
    width: usize,

    #[arg(long, default_value_t = 480)]
    height: usize,

    #[arg(short, long, default_value_t = 1024)]
    spp: u32,

    #[arg(short, long, default_value_t = 3)]
    bounces: u32,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if args.x >= args.width || args.y >= args.height {
        eprintln!("Pixel out of bounds: ({}, {}) for size {}x{}", args.x, args.y, args.width, args.height);
        std::process::exit(2);
    }

    let scene = CornellScene::new();
    let camera = ThinLensCamera::new(args.width, args.height);
    let integrator = PathIntegrator::new(args.bounces);
    let mut rng = LcgRng::new(args.seed);

    let mut sum = Vector3f::zeros();
    let mut lit = 0u32;
    for _ in 0..args.spp {
        let dx = rng.next_f32() - 0.5;
        let dy = rng.next_f32() - 0.5;
        let film = Vector2f::new(args.x as Float + dx, args.y as Float + dy);
        let ray = camera.sample_ray(&film, &mut rng);
        let radiance = integrator.trace(&scene, &mut rng, &ray);
        if radiance != Vector3f::zeros() {
            lit += 1;
        }
        sum += radiance;
    }

    let mut accumulator = PixelAccumulator::default();
    accumulator.add_samples(&sum, args.spp);
    let mean = accumulator.mean();
    let rgb = accumulator.tone_map();

    println!("pixel ({}, {}) spp={} bounces={} seed={}", args.x, args.y, args.spp, args.bounces, args.seed);
    println!("mean radiance: {:.6} {:.6} {:.6}", mean.x, mean.y, mean.z);
    println!("tone mapped:   {} {} {}", rgb[0], rgb[1], rgb[2]);
    println!("paths reaching the light: {}/{}", lit, args.spp);
}
