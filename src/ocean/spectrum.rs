//! Stationary wave spectrum and dispersion tables.
//!
//! Built once per parameter set. Every grid cell holds the Fourier
//! amplitude `h0(k)` of its wave vector, the conjugate partner
//! `conj(h0(-k))`, and the angular frequency ω(|k|) that animates both.

use std::f32::consts::{E, FRAC_1_SQRT_2, PI};

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::ParamsError;
use crate::params::{validate_resolution, OceanParams};

/// Spectrum entry for one wave vector, packed as two complex numbers
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SpectrumSample {
    /// h0(k)
    pub plus_k: [f32; 2],
    /// conj(h0(-k))
    pub minus_k_conj: [f32; 2],
}

impl SpectrumSample {
    pub const ZERO: Self = Self {
        plus_k: [0.0; 2],
        minus_k_conj: [0.0; 2],
    };

    pub fn new(plus_k: Vec2, minus_k_conj: Vec2) -> Self {
        Self {
            plus_k: plus_k.to_array(),
            minus_k_conj: minus_k_conj.to_array(),
        }
    }
}

/// Dispersion and spectrum tables, always built and swapped together
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumTables {
    resolution: usize,
    dispersion: Vec<f32>,
    spectrum: Vec<SpectrumSample>,
}

impl SpectrumTables {
    /// Build both tables from validated parameters
    ///
    /// Each grid row draws from its own ChaCha stream, so the result is
    /// identical whatever the thread count.
    pub fn build(params: &OceanParams) -> Result<Self, ParamsError> {
        params.validate()?;

        let n = params.resolution;
        let mut dispersion = vec![0.0f32; n * n];
        let mut spectrum = vec![SpectrumSample::ZERO; n * n];

        dispersion
            .par_chunks_mut(n)
            .zip(spectrum.par_chunks_mut(n))
            .enumerate()
            .for_each(|(y, (dispersion_row, spectrum_row))| {
                let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
                rng.set_stream(y as u64);

                for x in 0..n {
                    let k = params.wave_vector(x, y);
                    dispersion_row[x] = angular_frequency(params, k.length());

                    let h0 = gaussian(&mut rng) * wave_amplitude(params, k) * FRAC_1_SQRT_2;
                    let h0_minus = gaussian(&mut rng) * wave_amplitude(params, -k) * FRAC_1_SQRT_2;

                    spectrum_row[x] = SpectrumSample::new(h0, conjugate(h0_minus));
                }
            });

        log::debug!(
            "Spectrum tables: {}x{}, seed {}, repeat {:?}",
            n,
            n,
            params.seed,
            params.repeat_time_s
        );

        Ok(Self {
            resolution: n,
            dispersion,
            spectrum,
        })
    }

    /// Assemble tables from precomputed data (custom spectra, tests)
    pub fn from_parts(
        resolution: usize,
        dispersion: Vec<f32>,
        spectrum: Vec<SpectrumSample>,
    ) -> Result<Self, ParamsError> {
        validate_resolution(resolution)?;

        let expected = resolution * resolution;
        for (table, got) in [("dispersion", dispersion.len()), ("spectrum", spectrum.len())] {
            if got != expected {
                return Err(ParamsError::InvalidTableSize {
                    table,
                    expected,
                    got,
                });
            }
        }

        Ok(Self {
            resolution,
            dispersion,
            spectrum,
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Angular frequency per cell (radians per second)
    pub fn dispersion(&self) -> &[f32] {
        &self.dispersion
    }

    pub fn spectrum(&self) -> &[SpectrumSample] {
        &self.spectrum
    }

    /// Raw spectrum bytes for GPU upload (4 x f32 per cell)
    pub fn spectrum_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.spectrum)
    }
}

/// Deep-water dispersion ω = sqrt(g·|k|), quantized to multiples of 2π/T
/// when the simulation loops
pub fn angular_frequency(params: &OceanParams, wave_number: f32) -> f32 {
    let omega = (params.gravity_m_per_s2 * wave_number).sqrt();
    match params.base_frequency() {
        Some(quantum) => (omega / quantum).floor() * quantum,
        None => omega,
    }
}

/// Signed square root of the directional Phillips spectrum at `k`,
/// including the resolution/patch normalization
///
/// Zero for k = 0 and for calm wind.
pub fn wave_amplitude(params: &OceanParams, k: Vec2) -> f32 {
    let wave_number = k.length();
    if wave_number == 0.0 || params.wind_speed_m_per_s == 0.0 {
        return 0.0;
    }

    let largest_wave = params.largest_wave_m();
    let alignment = (k / wave_number).dot(params.wind_direction());

    let mut phillips = params.amplitude
        * (-1.0 / (wave_number * largest_wave).powi(2)).exp()
        / wave_number.powi(4)
        * alignment.powi(params.wind_exponent as i32);

    // Damp small wavelengths
    phillips *= (-(wave_number * params.min_wave_length_m).powi(2)).exp();

    let direction = if alignment < 0.0 {
        -(1.0 - params.directionality).sqrt()
    } else {
        1.0
    };

    let fft_norm = (params.resolution as f32).powf(-0.25);
    let patch_norm = E / params.patch_size_m;

    phillips.sqrt() * direction * fft_norm * patch_norm
}

/// Standard normal complex sample (Box–Muller)
fn gaussian(rng: &mut impl Rng) -> Vec2 {
    let u = 2.0 * PI * rng.gen::<f32>();
    // (0, 1] keeps the logarithm finite
    let v = (-2.0 * (1.0 - rng.gen::<f32>()).ln()).sqrt();
    Vec2::new(v * u.cos(), v * u.sin())
}

#[inline]
fn conjugate(c: Vec2) -> Vec2 {
    Vec2::new(c.x, -c.y)
}
