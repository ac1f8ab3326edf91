//! Frame export configuration.

use std::path::PathBuf;

/// Frame export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output directory for field images
    pub output_dir: PathBuf,

    /// Number of frames to simulate and write
    pub frames: usize,

    /// Frame rate (FPS), sets the time step between frames
    pub fps: u32,

    /// Simulation time of the first frame (seconds)
    pub start_time_s: f32,

    /// Also write raw little-endian f16 channels next to the PNGs
    pub write_raw: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("ocean"),
            frames: 1,
            fps: 30,
            start_time_s: 0.0,
            write_raw: false,
        }
    }
}

impl ExportConfig {
    /// Simulation time of frame `index` (seconds)
    pub fn frame_time_s(&self, index: usize) -> f32 {
        self.start_time_s + index as f32 / self.fps.max(1) as f32
    }

    /// Path of a frame file, e.g. `height_0003.png`
    pub fn frame_path(&self, field: &str, index: usize, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{:04}.{}", field, index, extension))
    }
}
