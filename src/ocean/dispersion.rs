//! Time evolution of the spectrum.
//!
//! h(k, t) = h0(k)·e^{iωt} + conj(h0(-k))·e^{-iωt}
//! D(k, t) = -i·(k/|k|)·h(k, t)

use glam::{Vec2, Vec4};
use rayon::prelude::*;

use super::fft::{complex_mul, FieldBuffers};
use super::spectrum::SpectrumTables;
use crate::params::OceanParams;

/// Fill `buffers` with the frequency-domain height and displacement at
/// `time_s`
///
/// Looping simulations evaluate `time_s` modulo the repeat time. The
/// quantized frequencies make that exact, and it keeps the phase accurate
/// in f32 after hours of simulated time.
pub fn evaluate(
    tables: &SpectrumTables,
    params: &OceanParams,
    time_s: f32,
    buffers: &mut FieldBuffers,
) {
    let n = tables.resolution();
    assert_eq!(n, params.resolution, "tables built for another resolution");
    assert_eq!(buffers.len(), n * n, "buffers sized for another resolution");

    let time_s = match params.repeat_time_s {
        Some(period) => time_s.rem_euclid(period),
        None => time_s,
    };

    let dispersion = tables.dispersion();
    let spectrum = tables.spectrum();

    buffers
        .height
        .par_chunks_mut(n)
        .zip(buffers.displacement.par_chunks_mut(n))
        .enumerate()
        .for_each(|(y, (height_row, displacement_row))| {
            for x in 0..n {
                let index = x + y * n;
                let (sin, cos) = (dispersion[index] * time_s).sin_cos();
                let sample = &spectrum[index];

                let h = complex_mul(Vec2::from_array(sample.plus_k), Vec2::new(cos, sin))
                    + complex_mul(Vec2::from_array(sample.minus_k_conj), Vec2::new(cos, -sin));
                height_row[x] = h;

                let k = params.wave_vector(x, y);
                let wave_number = k.length();
                displacement_row[x] = if wave_number == 0.0 {
                    Vec4::ZERO
                } else {
                    let direction = k / wave_number;
                    Vec4::new(
                        h.y * direction.x,
                        -h.x * direction.x,
                        h.y * direction.y,
                        -h.x * direction.y,
                    )
                };
            }
        });
}
