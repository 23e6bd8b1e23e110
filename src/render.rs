//! Render driver: pixel iteration, sampling and shading.
//!
//! Scanlines are traced in parallel with rayon. Each scanline draws from its
//! own ChaCha20 stream derived from [`RenderSettings::seed`], so an image is
//! reproducible for a given seed.

use std::error::Error;

use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::random::{random_scalar, stream};
use crate::ray::Ray;
use crate::vec3::{Color, Real, Vector3};

/// Largest accepted image width or height, in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 1 << 16;

/// Linear HDR image produced by [`render`].
pub type HdrImage = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Image size and sampling parameters.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Master seed for all per-scanline random streams
    pub seed: u64,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl RenderSettings {
    /// Settings for a `width` pixel wide image with the given aspect ratio.
    ///
    /// Height is truncated and never less than one pixel. Fails when the
    /// aspect ratio is not a positive finite number or the derived height
    /// exceeds [`MAX_IMAGE_DIMENSION`].
    pub fn from_aspect_ratio(
        width: u32,
        aspect_ratio: f64,
        samples_per_pixel: u32,
        seed: u64,
    ) -> Result<Self, Box<dyn Error>> {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            return Err(format!("aspect ratio must be positive and finite, got {}", aspect_ratio)
                .into());
        }
        let image_width = width.max(1);
        let height = (image_width as f64 / aspect_ratio).max(1.0);
        if image_width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION as f64 {
            return Err(format!(
                "image of {}x{:.0} exceeds the {} pixel limit per side",
                image_width, height, MAX_IMAGE_DIMENSION
            )
            .into());
        }
        Ok(Self {
            image_width,
            image_height: height as u32,
            samples_per_pixel: samples_per_pixel.max(1),
            seed,
            show_progress: false,
        })
    }
}

/// Color seen along `r`.
///
/// Surfaces are shaded by their normal, mapped from `[-1, 1]` to `[0, 1]`
/// per channel and tinted by the material albedo when one is attached.
/// Misses return a white-to-blue sky gradient over the ray's height.
pub fn ray_color<V: Vector3>(r: &Ray<V>, world: &dyn Hittable<V>) -> Color<V> {
    let half = V::Scalar::from_f64(0.5);
    let one = V::Scalar::ONE;

    if let Some(rec) = world.hit(r, Interval::from_min(V::Scalar::ZERO)) {
        let shade = (rec.normal + V::splat(one)) * half;
        return match rec.material {
            Some(material) => shade * material.albedo,
            None => shade,
        };
    }

    // No hit - render sky gradient
    let unit_direction = r.direction.normalize();
    let a = half * (unit_direction.y() + one);
    V::splat(one) * (one - a) + V::from_f64(0.5, 0.7, 1.0) * a
}

/// Render `world` as seen by `camera`.
///
/// Returns per-pixel averages of the sampled colors, linear (not yet gamma
/// corrected). Row 0 of the image is the top of the frame.
pub fn render<V: Vector3>(
    camera: &Camera<V>,
    world: &dyn Hittable<V>,
    settings: &RenderSettings,
) -> HdrImage {
    let width = settings.image_width;
    let height = settings.image_height;
    let samples = settings.samples_per_pixel.max(1);

    info!(
        "Rendering {}x{} at {} spp with {} backend on {} threads",
        width,
        height,
        samples,
        V::BACKEND,
        rayon::current_num_threads()
    );
    let generation_start = std::time::Instant::now();

    let pb = if settings.show_progress {
        ProgressBar::new(height as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} scanlines ETA: {eta}") {
        pb.set_style(style);
    }

    let u_den = V::Scalar::from_f64(width.saturating_sub(1).max(1) as f64);
    let v_den = V::Scalar::from_f64(height.saturating_sub(1).max(1) as f64);
    let scale = 1.0 / samples as f32;

    // `j` counts scanlines from the bottom, as the viewport's t does
    let rows: Vec<Vec<[f32; 3]>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let j = height - 1 - y;
            let mut rng = stream(settings.seed, j as u64);
            let row = (0..width)
                .map(|i| {
                    let mut pixel_color = V::default();
                    for _ in 0..samples {
                        let du = random_scalar::<V::Scalar, _>(&mut rng);
                        let dv = random_scalar::<V::Scalar, _>(&mut rng);
                        let u = (V::Scalar::from_f64(i as f64) + du) / u_den;
                        let v = (V::Scalar::from_f64(j as f64) + dv) / v_den;
                        let r = camera.get_ray(u, v, &mut rng);
                        pixel_color += ray_color(&r, world);
                    }
                    let [r, g, b] = pixel_color.to_f64_array();
                    [r as f32 * scale, g as f32 * scale, b as f32 * scale]
                })
                .collect();
            pb.inc(1);
            row
        })
        .collect();

    pb.finish_and_clear();

    let image = ImageBuffer::from_fn(width, height, |x, y| Rgb(rows[y as usize][x as usize]));
    info!("Image generated in {:.2?}", generation_start.elapsed());
    debug!("Pixel count: {}", width as u64 * height as u64);

    image
}
