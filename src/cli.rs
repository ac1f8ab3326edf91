//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{ExportConfig, OceanParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ocean-fft")]
#[command(about = "Simulate an FFT ocean patch and export its fields", long_about = None)]
pub struct Args {
    /// Grid cells per side (power of two)
    #[arg(long, default_value_t = 64)]
    pub resolution: usize,

    /// Patch extent (meters)
    #[arg(long, value_name = "METERS", default_value_t = 64.0)]
    pub patch_size: f32,

    /// Wind speed (meters per second)
    #[arg(long, value_name = "M/S", default_value_t = 32.0)]
    pub wind_speed: f32,

    /// Wind direction (degrees, 0 = +X)
    #[arg(long, value_name = "DEGREES", default_value_t = 0.0)]
    pub wind_angle: f32,

    /// Suppression of waves running against the wind (0..1)
    #[arg(long, default_value_t = 0.5)]
    pub directionality: f32,

    /// Gravity (meters per second squared)
    #[arg(long, default_value_t = 9.81)]
    pub gravity: f32,

    /// Loop period (seconds), 0 disables looping
    #[arg(long, value_name = "SECONDS", default_value_t = 200.0)]
    pub repeat_time: f32,

    /// Horizontal displacement scale
    #[arg(long, default_value_t = 1.0)]
    pub choppyness: f32,

    /// Phillips spectrum amplitude
    #[arg(long, default_value_t = 0.0002)]
    pub amplitude: f32,

    /// Waves shorter than this are damped (meters)
    #[arg(long, value_name = "METERS", default_value_t = 0.001)]
    pub min_wave_length: f32,

    /// Exponent on the wave/wind alignment (even, >= 2)
    #[arg(long, default_value_t = 2)]
    pub wind_exponent: u32,

    /// Spectrum RNG seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of frames to export
    #[arg(long, default_value_t = 1)]
    pub frames: usize,

    /// Frames per simulated second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Simulation time of the first frame (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 0.0)]
    pub time: f32,

    /// Output directory
    #[arg(long, default_value = "ocean")]
    pub output: PathBuf,

    /// Also write raw f16 field dumps
    #[arg(long)]
    pub raw: bool,
}

impl Args {
    /// Simulation parameters from the command line
    pub fn ocean_params(&self) -> OceanParams {
        OceanParams {
            resolution: self.resolution,
            patch_size_m: self.patch_size,
            wind_speed_m_per_s: self.wind_speed,
            wind_angle_rad: self.wind_angle.to_radians(),
            directionality: self.directionality,
            gravity_m_per_s2: self.gravity,
            repeat_time_s: (self.repeat_time != 0.0).then_some(self.repeat_time),
            choppyness: self.choppyness,
            amplitude: self.amplitude,
            min_wave_length_m: self.min_wave_length,
            wind_exponent: self.wind_exponent,
            seed: self.seed,
        }
    }

    /// Export configuration from the command line
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            output_dir: self.output.clone(),
            frames: self.frames,
            fps: self.fps,
            start_time_s: self.time,
            write_raw: self.raw,
        }
    }
}
