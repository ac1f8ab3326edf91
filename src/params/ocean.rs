//! Ocean spectrum and simulation parameters.

use std::f32::consts::PI;

use glam::Vec2;

use crate::error::ParamsError;

/// Ocean simulation parameters
///
/// Any change invalidates the dispersion and spectrum tables. A change of
/// `resolution` also invalidates the butterfly table and every buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct OceanParams {
    /// Grid cells per side (power of two, e.g. 64 = 4,096 cells)
    pub resolution: usize,

    /// World-space extent of one tiling patch (meters)
    pub patch_size_m: f32,

    /// Wind speed (meters per second), sets the largest wave L = V²/g
    pub wind_speed_m_per_s: f32,

    /// Wind direction (radians, 0 = +X, counter-clockwise toward +Z)
    pub wind_angle_rad: f32,

    /// Blend toward unidirectional waves (0 = waves against the wind keep
    /// full amplitude, 1 = waves against the wind are removed)
    pub directionality: f32,

    /// Gravitational acceleration (meters per second squared)
    pub gravity_m_per_s2: f32,

    /// Loop period (seconds). Frequencies are quantized so the surface
    /// repeats exactly after this time; `None` keeps the continuous
    /// dispersion relation.
    pub repeat_time_s: Option<f32>,

    /// Horizontal displacement exaggeration (dimensionless)
    pub choppyness: f32,

    /// Phillips spectrum amplitude (dimensionless height factor)
    pub amplitude: f32,

    /// Waves shorter than this are damped (meters)
    pub min_wave_length_m: f32,

    /// Exponent applied to the wave/wind alignment (even, >= 2)
    pub wind_exponent: u32,

    /// Seed for the spectrum's Gaussian draws
    pub seed: u64,
}

impl Default for OceanParams {
    fn default() -> Self {
        Self {
            resolution: 64,
            patch_size_m: 64.0,
            wind_speed_m_per_s: 32.0,
            wind_angle_rad: 0.0,
            directionality: 0.5,
            gravity_m_per_s2: 9.81,
            repeat_time_s: Some(200.0),
            choppyness: 1.0,
            amplitude: 0.0002,
            min_wave_length_m: 0.001,
            wind_exponent: 2,
            seed: 0,
        }
    }
}

impl OceanParams {
    /// FFT passes per 1D sweep (log2 of the resolution)
    pub fn passes(&self) -> usize {
        self.resolution.trailing_zeros() as usize
    }

    /// Total number of grid cells
    pub fn cell_count(&self) -> usize {
        self.resolution * self.resolution
    }

    /// Unit wind direction in the XZ plane
    pub fn wind_direction(&self) -> Vec2 {
        Vec2::from_angle(self.wind_angle_rad)
    }

    /// Largest wave sustained by the wind, L = V²/g (meters)
    pub fn largest_wave_m(&self) -> f32 {
        self.wind_speed_m_per_s * self.wind_speed_m_per_s / self.gravity_m_per_s2
    }

    /// Frequency quantum 2π/T, if the simulation loops
    pub fn base_frequency(&self) -> Option<f32> {
        self.repeat_time_s.map(|period| 2.0 * PI / period)
    }

    /// Wave vector of grid cell `(x, y)`, centered so cell N/2 is k = 0
    pub fn wave_vector(&self, x: usize, y: usize) -> Vec2 {
        let n = self.resolution as f32;
        PI * Vec2::new(2.0 * x as f32 - n, 2.0 * y as f32 - n) / self.patch_size_m
    }

    /// Validate parameters (resolution must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), ParamsError> {
        validate_resolution(self.resolution)?;

        let finite = [
            ("patch_size_m", self.patch_size_m),
            ("wind_speed_m_per_s", self.wind_speed_m_per_s),
            ("wind_angle_rad", self.wind_angle_rad),
            ("directionality", self.directionality),
            ("gravity_m_per_s2", self.gravity_m_per_s2),
            ("choppyness", self.choppyness),
            ("amplitude", self.amplitude),
            ("min_wave_length_m", self.min_wave_length_m),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ParamsError::NonFinite { name, value });
            }
        }

        let positive = [
            ("patch_size_m", self.patch_size_m),
            ("gravity_m_per_s2", self.gravity_m_per_s2),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ParamsError::NonPositive { name, value });
            }
        }

        if let Some(period) = self.repeat_time_s {
            if !period.is_finite() || period <= 0.0 {
                return Err(ParamsError::NonPositive {
                    name: "repeat_time_s",
                    value: period,
                });
            }
        }

        let non_negative = [
            ("wind_speed_m_per_s", self.wind_speed_m_per_s),
            ("amplitude", self.amplitude),
            ("min_wave_length_m", self.min_wave_length_m),
            ("choppyness", self.choppyness),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ParamsError::OutOfRange {
                    name,
                    value,
                    min: 0.0,
                    max: f32::INFINITY,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.directionality) {
            return Err(ParamsError::OutOfRange {
                name: "directionality",
                value: self.directionality,
                min: 0.0,
                max: 1.0,
            });
        }

        if self.wind_exponent < 2 || self.wind_exponent % 2 != 0 {
            return Err(ParamsError::InvalidWindExponent(self.wind_exponent));
        }

        Ok(())
    }

    /// True when switching to `other` needs new butterfly tables and buffers
    pub fn resolution_changed(&self, other: &OceanParams) -> bool {
        self.resolution != other.resolution
    }
}

/// Largest supported grid side. Keeps `resolution²` and every butterfly
/// index well inside `u32`.
pub const MAX_RESOLUTION: usize = 1024;

/// Resolution must be a power of two with at least one FFT pass, no larger
/// than [`MAX_RESOLUTION`]
pub fn validate_resolution(resolution: usize) -> Result<(), ParamsError> {
    if !(2..=MAX_RESOLUTION).contains(&resolution) || !resolution.is_power_of_two() {
        return Err(ParamsError::InvalidResolution(resolution));
    }
    Ok(())
}
