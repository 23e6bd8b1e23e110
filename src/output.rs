//! # Output Module
//!
//! Writes rendered images to disk. The format follows the file extension:
//!
//! - `.ppm`: ASCII `P3` pixmap, one `r g b` line per pixel
//! - `.png`: 8-bit PNG
//! - `.exr`: linear f32 OpenEXR, no gamma
//!
//! The 8-bit formats apply gamma 2 (square root) and map `[0, 0.999]` onto
//! `[0, 255]`.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::info;

use crate::interval::Interval;
use crate::render::HdrImage;

/// Gamma-correct one linear channel and quantize it to 8 bits.
#[inline]
pub fn to_display_byte(linear: f32) -> u8 {
    let intensity = Interval::new(0.0_f32, 0.999);
    let gamma = if linear > 0.0 { linear.sqrt() } else { 0.0 };
    (256.0 * intensity.clamp(gamma)) as u8
}

/// Write `image` as ASCII PPM to any writer.
pub fn write_ppm<W: Write>(image: &HdrImage, out: &mut W) -> io::Result<()> {
    let (width, height) = image.dimensions();
    writeln!(out, "P3\n{} {}\n255", width, height)?;
    for pixel in image.pixels() {
        writeln!(
            out,
            "{} {} {}",
            to_display_byte(pixel[0]),
            to_display_byte(pixel[1]),
            to_display_byte(pixel[2])
        )?;
    }
    Ok(())
}

/// Save as ASCII PPM.
pub fn save_image_as_ppm(image: &HdrImage, output_path: &Path) -> Result<(), Box<dyn Error>> {
    let mut out = BufWriter::new(File::create(output_path)?);
    write_ppm(image, &mut out)?;
    out.flush()?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Save as 8-bit PNG.
pub fn save_image_as_png(image: &HdrImage, output_path: &Path) -> Result<(), Box<dyn Error>> {
    let (width, height) = image.dimensions();
    let u8_image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([
            to_display_byte(pixel[0]),
            to_display_byte(pixel[1]),
            to_display_byte(pixel[2]),
        ])
    });
    u8_image.save(output_path)?;
    info!("Image saved as {}", output_path.display());
    Ok(())
}

/// Save as linear HDR OpenEXR.
pub fn save_image_as_exr(image: &HdrImage, output_path: &Path) -> Result<(), Box<dyn Error>> {
    let (width, height) = image.dimensions();
    write_rgb_file(output_path, width as usize, height as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;
    info!("HDR image saved as EXR: {}", output_path.display());
    Ok(())
}

/// Save `image`, choosing the format from the extension of `output_path`.
pub fn save_image(image: &HdrImage, output_path: &Path) -> Result<(), Box<dyn Error>> {
    let extension = output_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "ppm" => save_image_as_ppm(image, output_path),
        "png" => save_image_as_png(image, output_path),
        "exr" => save_image_as_exr(image, output_path),
        other => Err(format!(
            "unsupported file extension '{}': expected .ppm, .png or .exr",
            other
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_byte_applies_gamma_and_clamps() {
        assert_eq!(to_display_byte(0.0), 0);
        assert_eq!(to_display_byte(-1.0), 0);
        assert_eq!(to_display_byte(0.25), 128);
        assert_eq!(to_display_byte(1.0), 255);
        assert_eq!(to_display_byte(40.0), 255);
    }

    #[test]
    fn ppm_layout() {
        let mut image = HdrImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([1.0, 0.0, 0.25]));
        image.put_pixel(1, 0, Rgb([0.0, 1.0, 0.0]));
        let mut out = Vec::new();
        write_ppm(&image, &mut out).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "P3\n2 1\n255\n255 0 128\n0 255 0\n");
    }

    #[test]
    fn unknown_extension_is_an_error() {
        let image = HdrImage::new(1, 1);
        let err = save_image(&image, Path::new("out.bmp")).expect_err("bmp unsupported");
        assert!(err.to_string().contains("bmp"));
    }
}
