//! FFT ocean surface simulation.
//!
//! Stages, leaf first:
//! - `spectrum`: stationary Phillips spectrum and dispersion tables
//! - `butterfly`: FFT reindexing and twiddle table
//! - `dispersion`: per-frame spectrum evolution
//! - `fft`: ping-pong row and column butterfly passes
//! - `encode`: height, displacement, normals and folding

pub mod butterfly;
pub mod dispersion;
pub mod encode;
pub mod fft;
pub mod fields;
pub mod simulation;
pub mod spectrum;

// Re-export public types
pub use butterfly::{Butterfly, ButterflyTable};
pub use fft::{FieldBuffers, PingPong};
pub use fields::{FieldStats, HalfFields, OceanFields};
pub use simulation::OceanSimulation;
pub use spectrum::{SpectrumSample, SpectrumTables};
