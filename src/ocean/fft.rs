//! Separable 2D inverse FFT driven by the butterfly table.
//!
//! Every pass is a parallel map over grid rows that reads only the
//! `source` buffers and writes only the `target` buffers; the buffers swap
//! afterwards. The end of each parallel iterator is the barrier between
//! passes.

use glam::{Vec2, Vec4};
use rayon::prelude::*;

use super::butterfly::ButterflyTable;

/// Complex height (x = re, y = im) and displacement
/// (x/y = X component re/im, z/w = Z component re/im) per cell
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBuffers {
    pub height: Vec<Vec2>,
    pub displacement: Vec<Vec4>,
}

impl FieldBuffers {
    pub fn new(resolution: usize) -> Self {
        Self {
            height: vec![Vec2::ZERO; resolution * resolution],
            displacement: vec![Vec4::ZERO; resolution * resolution],
        }
    }

    pub fn len(&self) -> usize {
        self.height.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height.is_empty()
    }
}

/// Double-buffered FFT state
#[derive(Debug, Clone)]
pub struct PingPong {
    resolution: usize,
    source: FieldBuffers,
    target: FieldBuffers,
}

impl PingPong {
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            source: FieldBuffers::new(resolution),
            target: FieldBuffers::new(resolution),
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Buffers holding the latest completed pass
    pub fn source(&self) -> &FieldBuffers {
        &self.source
    }

    /// Writable view of the latest buffers (used to seed the first pass)
    pub fn source_mut(&mut self) -> &mut FieldBuffers {
        &mut self.source
    }

    /// Read the previous pass, write the next one
    fn split(&mut self) -> (&FieldBuffers, &mut FieldBuffers) {
        (&self.source, &mut self.target)
    }

    fn swap(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
    }
}

/// Complex product a·b
#[inline]
pub(crate) fn complex_mul(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x * b.x - a.y * b.y, a.y * b.x + a.x * b.y)
}

/// in1 + w·in2
#[inline]
pub(crate) fn combine_height(w: Vec2, in1: Vec2, in2: Vec2) -> Vec2 {
    in1 + complex_mul(w, in2)
}

/// in1 + w·in2 for both complex components of a displacement sample
#[inline]
pub(crate) fn combine_displacement(w: Vec2, in1: Vec4, in2: Vec4) -> Vec4 {
    let x = complex_mul(w, Vec2::new(in2.x, in2.y));
    let z = complex_mul(w, Vec2::new(in2.z, in2.w));
    in1 + Vec4::new(x.x, x.y, z.x, z.y)
}

/// One butterfly pass along X (within each row)
pub fn row_pass(table: &ButterflyTable, pass: usize, buffers: &mut PingPong) {
    let n = buffers.resolution;
    debug_assert_eq!(table.resolution(), n);
    let butterflies = table.pass(pass);

    let (source, target) = buffers.split();
    target
        .height
        .par_chunks_mut(n)
        .zip(target.displacement.par_chunks_mut(n))
        .enumerate()
        .for_each(|(y, (height_row, displacement_row))| {
            let row = y * n..(y + 1) * n;
            let source_height = &source.height[row.clone()];
            let source_displacement = &source.displacement[row];

            for (x, butterfly) in butterflies.iter().enumerate() {
                let a = butterfly.source_a as usize;
                let b = butterfly.source_b as usize;
                let w = butterfly.twiddle();
                height_row[x] = combine_height(w, source_height[a], source_height[b]);
                displacement_row[x] =
                    combine_displacement(w, source_displacement[a], source_displacement[b]);
            }
        });

    buffers.swap();
}

/// One butterfly pass along Y (across rows)
pub fn column_pass(table: &ButterflyTable, pass: usize, buffers: &mut PingPong) {
    let n = buffers.resolution;
    debug_assert_eq!(table.resolution(), n);
    let butterflies = table.pass(pass);

    let (source, target) = buffers.split();
    target
        .height
        .par_chunks_mut(n)
        .zip(target.displacement.par_chunks_mut(n))
        .zip(butterflies.par_iter())
        .for_each(|((height_row, displacement_row), butterfly)| {
            let a = butterfly.source_a as usize * n;
            let b = butterfly.source_b as usize * n;
            let w = butterfly.twiddle();

            for x in 0..n {
                height_row[x] = combine_height(w, source.height[a + x], source.height[b + x]);
                displacement_row[x] = combine_displacement(
                    w,
                    source.displacement[a + x],
                    source.displacement[b + x],
                );
            }
        });

    buffers.swap();
}

/// All log2(N) row passes
pub fn inverse_rows(table: &ButterflyTable, buffers: &mut PingPong) {
    for pass in 0..table.passes() {
        row_pass(table, pass, buffers);
    }
}

/// The first `count` column passes
///
/// # Panics
/// If `count` exceeds the table's pass count.
pub fn inverse_columns(table: &ButterflyTable, buffers: &mut PingPong, count: usize) {
    assert!(
        count <= table.passes(),
        "{} column passes requested, table has {}",
        count,
        table.passes()
    );
    for pass in 0..count {
        column_pass(table, pass, buffers);
    }
}

/// Complete unnormalised 2D inverse DFT of the source buffers
pub fn inverse_2d(table: &ButterflyTable, buffers: &mut PingPong) {
    inverse_rows(table, buffers);
    inverse_columns(table, buffers, table.passes());
}
