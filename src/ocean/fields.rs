//! Spatial-domain output fields consumed by renderers.

use half::f16;

/// Height, displacement and normal + folding maps for one frame
///
/// Row-major, `index = x + y * resolution`, X along world X and Y along
/// world Z. The patch tiles seamlessly.
#[derive(Debug, Clone, PartialEq)]
pub struct OceanFields {
    resolution: usize,
    patch_size_m: f32,

    /// Surface elevation (meters)
    pub height: Vec<f32>,

    /// Horizontal offset (meters), `[x, z]`, choppyness applied
    pub displacement: Vec<[f32; 2]>,

    /// Unit normal `[x, y, z]` and the Jacobian of the horizontal
    /// displacement clamped to `[0, 1]` (1 = undisturbed, 0 = folded)
    pub normal_folding: Vec<[f32; 4]>,
}

impl OceanFields {
    pub fn new(resolution: usize, patch_size_m: f32) -> Self {
        let cells = resolution * resolution;
        Self {
            resolution,
            patch_size_m,
            height: vec![0.0; cells],
            displacement: vec![[0.0; 2]; cells],
            normal_folding: vec![[0.0, 1.0, 0.0, 1.0]; cells],
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn patch_size_m(&self) -> f32 {
        self.patch_size_m
    }

    /// Cell index with toroidal wrapping
    #[inline]
    pub fn index(&self, x: isize, y: isize) -> usize {
        let n = self.resolution as isize;
        (x.rem_euclid(n) + y.rem_euclid(n) * n) as usize
    }

    /// Summary statistics of the current frame
    pub fn stats(&self) -> FieldStats {
        let cells = self.height.len().max(1) as f64;
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for &h in &self.height {
            min = min.min(h);
            max = max.max(h);
            sum += h as f64;
            sum_sq += (h as f64) * (h as f64);
        }
        let folded = self
            .normal_folding
            .iter()
            .filter(|sample| sample[3] <= 0.0)
            .count();

        FieldStats {
            min_height_m: min,
            max_height_m: max,
            mean_height_m: (sum / cells) as f32,
            rms_height_m: (sum_sq / cells).sqrt() as f32,
            folded_fraction: folded as f32 / cells as f32,
        }
    }

    /// Half-precision copy matching R16F / RG16F / RGBA16F textures
    pub fn to_half(&self) -> HalfFields {
        HalfFields {
            resolution: self.resolution,
            height: self.height.iter().map(|&h| f16::from_f32(h)).collect(),
            displacement: self
                .displacement
                .iter()
                .map(|d| d.map(f16::from_f32))
                .collect(),
            normal_folding: self
                .normal_folding
                .iter()
                .map(|n| n.map(f16::from_f32))
                .collect(),
        }
    }

    /// Normal remapped to `[0, 1]` plus folding, packed as RGBA8
    /// (`r | g << 8 | b << 16 | a << 24`)
    pub fn normal_folding_rgba8(&self) -> Vec<u32> {
        self.normal_folding
            .iter()
            .map(|&[x, y, z, folding]| {
                let r = unorm8(x * 0.5 + 0.5);
                let g = unorm8(y * 0.5 + 0.5);
                let b = unorm8(z * 0.5 + 0.5);
                let a = unorm8(folding);
                u32::from_le_bytes([r, g, b, a])
            })
            .collect()
    }
}

#[inline]
fn unorm8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Frame statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub min_height_m: f32,
    pub max_height_m: f32,
    pub mean_height_m: f32,
    pub rms_height_m: f32,
    /// Share of cells where the surface folds over (Jacobian <= 0)
    pub folded_fraction: f32,
}

/// Half-precision output fields
#[derive(Debug, Clone, PartialEq)]
pub struct HalfFields {
    pub resolution: usize,
    pub height: Vec<f16>,
    pub displacement: Vec<[f16; 2]>,
    pub normal_folding: Vec<[f16; 4]>,
}

impl HalfFields {
    pub fn height_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.height)
    }

    pub fn displacement_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.displacement)
    }

    pub fn normal_folding_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normal_folding)
    }
}
