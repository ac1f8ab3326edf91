//! ocean-fft library - Tessendorf-style FFT ocean simulation
//!
//! Spectrum generation, a butterfly-table 2D FFT and field encoding for a
//! tiling ocean patch. Outputs are plain arrays for any renderer to upload.

pub mod cli;
pub mod error;
pub mod export;
pub mod ocean;
pub mod params;

pub use error::ParamsError;
pub use ocean::{OceanFields, OceanSimulation};
pub use params::{ExportConfig, OceanParams};
