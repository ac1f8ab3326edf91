//! End-to-end checks of the ocean pipeline against reference transforms.

use std::f64::consts::PI;

use glam::Vec2;
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustfft::{num_complex::Complex, FftPlanner};

use ocean_fft::ocean::encode::{derive_normals, encode_fields};
use ocean_fft::ocean::fft::{inverse_2d, inverse_columns, inverse_rows};
use ocean_fft::ocean::{dispersion, ButterflyTable, OceanFields, PingPong};
use ocean_fft::ocean::{OceanSimulation, SpectrumSample, SpectrumTables};
use ocean_fft::OceanParams;

/// Unnormalised 2D inverse DFT in f64, rows then columns
fn reference_inverse_2d(input: &[Vec2], n: usize) -> Vec<Complex<f64>> {
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_inverse(n);

    let mut data: Vec<Complex<f64>> = input
        .iter()
        .map(|c| Complex::new(c.x as f64, c.y as f64))
        .collect();
    fft.process(&mut data);

    let mut transposed = vec![Complex::new(0.0, 0.0); n * n];
    for y in 0..n {
        for x in 0..n {
            transposed[y + x * n] = data[x + y * n];
        }
    }
    fft.process(&mut transposed);

    for y in 0..n {
        for x in 0..n {
            data[x + y * n] = transposed[y + x * n];
        }
    }
    data
}

/// Heights from a spectrum at t = 0 by direct summation
fn direct_heights(tables: &SpectrumTables) -> Vec<f64> {
    let n = tables.resolution();
    let half = (n / 2) as i64;
    let mut heights = vec![0.0; n * n];
    for ny in 0..n {
        for nx in 0..n {
            let mut sum = 0.0;
            for y in 0..n {
                for x in 0..n {
                    let sample = &tables.spectrum()[x + y * n];
                    let re = (sample.plus_k[0] + sample.minus_k_conj[0]) as f64;
                    let im = (sample.plus_k[1] + sample.minus_k_conj[1]) as f64;
                    let (mx, my) = (x as i64 - half, y as i64 - half);
                    let phase = 2.0 * PI * (mx * nx as i64 + my * ny as i64) as f64 / n as f64;
                    sum += re * phase.cos() - im * phase.sin();
                }
            }
            heights[nx + ny * n] = sum;
        }
    }
    heights
}

/// Heights of the N=8 reference scenario at t = 0, row-major
const REFERENCE_HEIGHTS: [f32; 64] = [
    -9.917472e-2, -7.020205e-2, -1.719918e-2, 3.644075e-2,
    1.007300e-1, 9.015082e-2, 7.839652e-3, -4.858533e-2,

    -9.843736e-2, -9.755402e-2, -5.186951e-2, 6.026988e-2,
    9.923631e-2, 5.613081e-2, 4.075517e-2, -8.531280e-3,

    -4.177608e-2, -8.698012e-2, -4.736867e-2, 4.523788e-2,
    6.277537e-2, 3.111430e-2, 1.516947e-2, 2.182784e-2,

    -1.063816e-2, -1.366920e-2, -2.589848e-2, 1.063247e-2,
    5.182174e-2, 1.675319e-2, -2.442989e-2, -4.571676e-3,

    -2.464285e-2, 8.421461e-3, 9.814765e-3, 2.773832e-2,
    3.953675e-2, -9.857653e-4, -1.881064e-2, -4.107204e-2,

    -3.961012e-2, -4.117547e-5, 9.646589e-3, 5.728615e-2,
    7.037157e-2, -1.277538e-3, -4.668473e-2, -4.969075e-2,

    -4.482172e-2, -2.006293e-2, 6.903754e-3, 6.341645e-2,
    1.050114e-1, 1.846028e-2, -7.051757e-2, -5.838969e-2,

    -6.688311e-2, -4.450713e-2, 2.438152e-3, 2.708604e-2,
    1.083758e-1, 6.243058e-2, -4.357171e-2, -4.536863e-2,
];

fn reference_scenario() -> OceanParams {
    OceanParams {
        resolution: 8,
        patch_size_m: 64.0,
        wind_speed_m_per_s: 10.0,
        wind_angle_rad: 0.0,
        directionality: 0.5,
        gravity_m_per_s2: 9.81,
        seed: 0,
        ..Default::default()
    }
}

fn random_signal(n: usize, seed: u64) -> Vec<Vec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n * n)
        .map(|_| Vec2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
        .collect()
}

#[test]
fn butterfly_fft_matches_reference_for_all_sizes() {
    let mut n = 4;
    while n <= 1024 {
        let table = ButterflyTable::build(n).unwrap();
        let input = random_signal(n, n as u64);

        let mut buffers = PingPong::new(n);
        buffers.source_mut().height.copy_from_slice(&input);
        inverse_2d(&table, &mut buffers);

        let expected = reference_inverse_2d(&input, n);
        let scale = expected.iter().map(|c| c.norm()).fold(1.0, f64::max);

        for (got, want) in buffers.source().height.iter().zip(&expected) {
            let error = ((got.x as f64 - want.re).powi(2) + (got.y as f64 - want.im).powi(2)).sqrt();
            assert!(
                error / scale < 1e-4,
                "N={}: got {:?}, expected {}, relative error {}",
                n,
                got,
                want,
                error / scale
            );
        }
        n *= 2;
    }
}

#[test]
fn single_wave_pair_reproduces_sinusoid() {
    let n = 16;
    let params = OceanParams {
        resolution: n,
        patch_size_m: 32.0,
        choppyness: 1.0,
        ..Default::default()
    };
    let (mx, my) = (2i32, 1i32);
    let plus = (mx + 8) as usize + (my + 8) as usize * n;
    let minus = (8 - mx) as usize + (8 - my) as usize * n;

    let mut spectrum = vec![SpectrumSample::ZERO; n * n];
    spectrum[plus].plus_k = [0.5, 0.0];
    spectrum[minus].minus_k_conj = [0.5, 0.0];
    let tables = SpectrumTables::from_parts(n, vec![0.0; n * n], spectrum).unwrap();

    let table = ButterflyTable::build(n).unwrap();
    let mut buffers = PingPong::new(n);
    dispersion::evaluate(&tables, &params, 0.0, buffers.source_mut());
    inverse_rows(&table, &mut buffers);
    inverse_columns(&table, &mut buffers, table.passes() - 1);

    let mut fields = OceanFields::new(n, params.patch_size_m);
    encode_fields(&table, &buffers, params.choppyness, &mut fields);
    derive_normals(&mut fields);

    let direction = Vec2::new(mx as f32, my as f32).normalize();
    for y in 0..n {
        for x in 0..n {
            let phase =
                2.0 * std::f32::consts::PI * (mx * x as i32 + my * y as i32) as f32 / n as f32;
            let index = fields.index(x as isize, y as isize);

            assert!((fields.height[index] - phase.cos()).abs() < 1e-4);

            let [dx, dz] = fields.displacement[index];
            assert!((dx + direction.x * phase.sin()).abs() < 1e-4);
            assert!((dz + direction.y * phase.sin()).abs() < 1e-4);
        }
    }
}

#[test]
fn rebuild_with_same_seed_is_bit_identical() {
    let params = OceanParams {
        resolution: 32,
        wind_speed_m_per_s: 20.0,
        seed: 1234,
        ..Default::default()
    };
    let mut a = OceanSimulation::build(params.clone()).unwrap();
    let mut b = OceanSimulation::build(params).unwrap();

    assert_eq!(a.spectrum(), b.spectrum());
    assert_eq!(a.butterfly(), b.butterfly());

    let fields_a = a.update(12.5).clone();
    let fields_b = b.update(12.5);
    assert_eq!(&fields_a, fields_b);
}

#[test]
fn folding_stays_in_unit_range() {
    for (amplitude, choppyness) in [(0.0002, 1.0), (0.05, 3.0), (10.0, 10.0)] {
        let params = OceanParams {
            resolution: 64,
            amplitude,
            choppyness,
            ..Default::default()
        };
        let mut ocean = OceanSimulation::build(params).unwrap();
        for time in [0.0, 4.0, 33.3] {
            let fields = ocean.update(time);
            for sample in &fields.normal_folding {
                assert!(
                    (0.0..=1.0).contains(&sample[3]),
                    "folding {} out of range",
                    sample[3]
                );
            }
        }
    }
}

#[test]
fn height_has_no_dc_bias() {
    for resolution in [16, 64, 256] {
        let params = OceanParams {
            resolution,
            wind_speed_m_per_s: 15.0,
            ..Default::default()
        };
        let mut ocean = OceanSimulation::build(params).unwrap();
        let stats = ocean.update(5.0).stats();

        assert!(stats.rms_height_m > 0.0);
        assert!(
            stats.mean_height_m.abs() <= 1e-3 * stats.rms_height_m,
            "N={}: mean {} vs rms {}",
            resolution,
            stats.mean_height_m,
            stats.rms_height_m
        );
    }
}

#[test]
fn reference_scenario_matches_recorded_heights() {
    let mut ocean = OceanSimulation::build(reference_scenario()).unwrap();
    let fields = ocean.update(0.0);

    let scale = REFERENCE_HEIGHTS.iter().fold(0.0f32, |acc, h| acc.max(h.abs()));
    for (i, (got, want)) in fields.height.iter().zip(&REFERENCE_HEIGHTS).enumerate() {
        assert!(
            (got - want).abs() <= 1e-5 * scale,
            "cell ({}, {}): got {}, expected {}",
            i % 8,
            i / 8,
            got,
            want
        );
    }
}

#[test]
fn reference_scenario_matches_direct_summation() {
    let params = reference_scenario();

    let mut ocean = OceanSimulation::build(params.clone()).unwrap();
    let heights = ocean.update(0.0).height.clone();
    let expected = direct_heights(ocean.spectrum());

    let scale = expected.iter().fold(0.0f64, |acc, h| acc.max(h.abs()));
    assert!(scale > 0.0);
    for (got, want) in heights.iter().zip(&expected) {
        assert!(
            (*got as f64 - want).abs() <= 1e-4 * scale,
            "got {}, expected {}",
            got,
            want
        );
    }

    let mut again = OceanSimulation::build(params).unwrap();
    assert_eq!(again.update(0.0).height, heights);
}
