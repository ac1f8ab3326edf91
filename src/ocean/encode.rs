//! Final FFT pass and conversion into renderable fields.
//!
//! The spectrum is centered on k = 0 (cell N/2), which shifts every output
//! sample by a factor of (-1)^(x+y); the encoder undoes it.

use glam::{Vec2, Vec3};
use rayon::prelude::*;

use super::butterfly::ButterflyTable;
use super::fft::{combine_displacement, combine_height, PingPong};
use super::fields::OceanFields;

/// Run the last column pass and write height and displacement
///
/// Expects `buffers` to hold the result of all row passes and all but the
/// last column pass.
pub fn encode_fields(
    table: &ButterflyTable,
    buffers: &PingPong,
    choppyness: f32,
    fields: &mut OceanFields,
) {
    let n = buffers.resolution();
    debug_assert_eq!(table.resolution(), n);
    debug_assert_eq!(fields.resolution(), n);

    let source = buffers.source();
    let butterflies = table.pass(table.passes() - 1);

    fields
        .height
        .par_chunks_mut(n)
        .zip(fields.displacement.par_chunks_mut(n))
        .zip(butterflies.par_iter())
        .enumerate()
        .for_each(|(y, ((height_row, displacement_row), butterfly))| {
            let a = butterfly.source_a as usize * n;
            let b = butterfly.source_b as usize * n;
            let w = butterfly.twiddle();

            for x in 0..n {
                let h = combine_height(w, source.height[a + x], source.height[b + x]);
                let d = combine_displacement(
                    w,
                    source.displacement[a + x],
                    source.displacement[b + x],
                );

                let sign = if (x + y) % 2 == 0 { 1.0 } else { -1.0 };
                height_row[x] = sign * h.x;
                displacement_row[x] = [-sign * choppyness * d.x, -sign * choppyness * d.z];
            }
        });
}

/// Derive normals and folding from the encoded fields
///
/// Central differences with wrap-around neighbours, so the whole grid must
/// be encoded first.
pub fn derive_normals(fields: &mut OceanFields) {
    let n = fields.resolution();
    let cell_size = fields.patch_size_m() / n as f32;
    let inv_span = 1.0 / (2.0 * cell_size);

    let OceanFields {
        height,
        displacement,
        normal_folding,
        ..
    } = fields;
    let height = &*height;
    let displacement = &*displacement;

    normal_folding
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(y, row)| {
            let down = ((y + n - 1) % n) * n;
            let up = ((y + 1) % n) * n;
            let here = y * n;

            for (x, out) in row.iter_mut().enumerate() {
                let left = here + (x + n - 1) % n;
                let right = here + (x + 1) % n;

                let dh_dx = (height[right] - height[left]) * inv_span;
                let dh_dz = (height[up + x] - height[down + x]) * inv_span;
                let normal = Vec3::new(-dh_dx, 1.0, -dh_dz).normalize();

                let dd_dx = (Vec2::from_array(displacement[right])
                    - Vec2::from_array(displacement[left]))
                    * inv_span;
                let dd_dz = (Vec2::from_array(displacement[up + x])
                    - Vec2::from_array(displacement[down + x]))
                    * inv_span;

                let jacobian = (1.0 + dd_dx.x) * (1.0 + dd_dz.y) - dd_dz.x * dd_dx.y;
                let folding = if jacobian.is_nan() {
                    0.0
                } else {
                    jacobian.clamp(0.0, 1.0)
                };

                *out = [normal.x, normal.y, normal.z, folding];
            }
        });
}
