//! PNG and raw half-float export of ocean fields.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{GrayImage, ImageResult, Luma, Rgb, RgbImage, Rgba, RgbaImage};

use crate::ocean::{FieldStats, OceanFields};

/// Height as 8-bit grayscale, normalised to the frame's height range
pub fn height_image(fields: &OceanFields, stats: &FieldStats) -> GrayImage {
    let n = fields.resolution() as u32;
    let range = (stats.max_height_m - stats.min_height_m).max(f32::EPSILON);

    GrayImage::from_fn(n, n, |x, y| {
        let h = fields.height[(x + y * n) as usize];
        let value = ((h - stats.min_height_m) / range * 255.0).clamp(0.0, 255.0);
        Luma([value.round() as u8])
    })
}

/// Displacement X/Z in red/green, mapped from `[-extent, extent]`
pub fn displacement_image(fields: &OceanFields) -> RgbImage {
    let n = fields.resolution() as u32;
    let extent = fields
        .displacement
        .iter()
        .flat_map(|d| d.iter())
        .fold(0.0f32, |acc, v| acc.max(v.abs()))
        .max(f32::EPSILON);

    RgbImage::from_fn(n, n, |x, y| {
        let [dx, dz] = fields.displacement[(x + y * n) as usize];
        let encode = |v: f32| ((v / extent * 0.5 + 0.5) * 255.0).round() as u8;
        Rgb([encode(dx), encode(dz), 0])
    })
}

/// Packed normal + folding as an RGBA8 image
pub fn normal_folding_image(fields: &OceanFields) -> RgbaImage {
    let n = fields.resolution() as u32;
    let packed = fields.normal_folding_rgba8();
    RgbaImage::from_fn(n, n, |x, y| Rgba(packed[(x + y * n) as usize].to_le_bytes()))
}

/// Write the three field images for one frame
pub fn save_pngs(
    fields: &OceanFields,
    stats: &FieldStats,
    height_path: &Path,
    displacement_path: &Path,
    normal_path: &Path,
) -> ImageResult<()> {
    height_image(fields, stats).save(height_path)?;
    displacement_image(fields).save(displacement_path)?;
    normal_folding_image(fields).save(normal_path)?;
    Ok(())
}

/// Write height, displacement and normal + folding as consecutive
/// little-endian f16 channels
pub fn save_raw_f16(fields: &OceanFields, path: &Path) -> std::io::Result<()> {
    let half = fields.to_half();
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(half.height_bytes())?;
    writer.write_all(half.displacement_bytes())?;
    writer.write_all(half.normal_folding_bytes())?;
    writer.flush()
}
