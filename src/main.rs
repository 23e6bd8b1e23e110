use clap::Parser;
use glam::{DVec3, Vec3A};
use log::{error, info};
use rand::Rng;

mod cli;
mod logger;

use cli::{Args, Precision};
use logger::init_logger;
use weekend_simd::camera::Camera;
use weekend_simd::output::save_image;
use weekend_simd::random::from_entropy;
use weekend_simd::render::{render, HdrImage, RenderSettings};
use weekend_simd::scene::{demo_camera, demo_scene};
use weekend_simd::vec3::Vector3;

/// Build the demo scene and camera in backend `V` and render it.
fn render_demo<V: Vector3>(args: &Args, settings: &RenderSettings) -> HdrImage {
    let world = demo_scene::<V>();
    let camera = Camera::new(&demo_camera::<V>(args.aspect_ratio, args.vfov, args.aperture));
    info!("Scene: {} objects, {} backend", world.len(), V::BACKEND);
    render(&camera, &world, settings)
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    info!("weekend_simd - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let seed = args.seed.unwrap_or_else(|| from_entropy().random());
    info!("Seed: {} (pass --seed {} to reproduce)", seed, seed);

    let mut settings = match RenderSettings::from_aspect_ratio(
        args.width,
        args.aspect_ratio,
        args.samples_per_pixel,
        seed,
    ) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid image settings: {}", e);
            std::process::exit(1);
        }
    };
    settings.show_progress = !args.quiet;
    info!(
        "Image resolution: {}x{}, samples per pixel: {}",
        settings.image_width, settings.image_height, settings.samples_per_pixel
    );

    let image = match args.precision {
        Precision::Single => render_demo::<Vec3A>(&args, &settings),
        Precision::Double => render_demo::<DVec3>(&args, &settings),
    };

    if let Err(e) = save_image(&image, &args.output) {
        error!("Failed to save {}: {}", args.output.display(), e);
        std::process::exit(1);
    }
}
