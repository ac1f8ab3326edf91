//! Butterfly lookup table for the iterative radix-2 FFT.
//!
//! Each entry tells one output sample of one pass which two samples of the
//! previous pass to combine and with which twiddle factor:
//! `out[i] = in[source_a] + twiddle * in[source_b]`.
//! Pass 0 reads its inputs in bit-reversed order, so a full sweep of
//! `log2(N)` passes computes the unnormalised inverse DFT
//! `X[n] = Σ x[m] exp(+2πi·m·n/N)`.

use std::f64::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::error::ParamsError;
use crate::params::validate_resolution;

/// One butterfly: two source indices and a complex twiddle factor
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Butterfly {
    pub source_a: u32,
    pub source_b: u32,
    pub twiddle: [f32; 2],
}

impl Butterfly {
    /// Twiddle factor as a complex number (x = real, y = imaginary)
    #[inline]
    pub fn twiddle(&self) -> Vec2 {
        Vec2::from_array(self.twiddle)
    }
}

/// Butterfly entries for every pass, laid out pass-major (`pass * N + index`)
#[derive(Debug, Clone, PartialEq)]
pub struct ButterflyTable {
    resolution: usize,
    passes: usize,
    entries: Vec<Butterfly>,
}

impl ButterflyTable {
    /// Build the table for a power-of-two resolution
    pub fn build(resolution: usize) -> Result<Self, ParamsError> {
        validate_resolution(resolution)?;

        let passes = resolution.trailing_zeros() as usize;
        let mut entries = vec![Butterfly::zeroed(); resolution * passes];

        for pass in 0..passes {
            let blocks = 1usize << (passes - 1 - pass);
            let span = 1usize << pass;

            for block in 0..blocks {
                let base = block * span * 2;
                for k in 0..span {
                    let i1 = base + k;
                    let i2 = base + span + k;
                    let (j1, j2) = if pass == 0 {
                        (bit_reverse(i1, passes), bit_reverse(i2, passes))
                    } else {
                        (i1, i2)
                    };

                    // Twiddles in f64 so large tables keep full f32 precision
                    let angle = 2.0 * PI * (k * blocks) as f64 / resolution as f64;
                    let (wr, wi) = (angle.cos() as f32, angle.sin() as f32);

                    let row = pass * resolution;
                    entries[row + i1] = Butterfly {
                        source_a: j1 as u32,
                        source_b: j2 as u32,
                        twiddle: [wr, wi],
                    };
                    entries[row + i2] = Butterfly {
                        source_a: j1 as u32,
                        source_b: j2 as u32,
                        twiddle: [-wr, -wi],
                    };
                }
            }
        }

        log::debug!(
            "Butterfly table: {} passes x {} entries",
            passes,
            resolution
        );

        Ok(Self {
            resolution,
            passes,
            entries,
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Passes per 1D sweep, log2(resolution)
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Butterfly for output `index` of `pass`
    #[inline]
    pub fn entry(&self, pass: usize, index: usize) -> &Butterfly {
        &self.entries[pass * self.resolution + index]
    }

    /// All butterflies of one pass
    pub fn pass(&self, pass: usize) -> &[Butterfly] {
        let start = pass * self.resolution;
        &self.entries[start..start + self.resolution]
    }

    pub fn entries(&self) -> &[Butterfly] {
        &self.entries
    }

    /// Raw bytes, ready for upload as a GPU storage buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.entries)
    }
}

/// Reverse the lowest `bits` bits of `index`
fn bit_reverse(index: usize, bits: usize) -> usize {
    index.reverse_bits() >> (usize::BITS as usize - bits)
}
