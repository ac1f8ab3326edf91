//! Parameter definitions with physical units and documented semantics.
//!
//! All tunables live here with:
//! - Physical units (meters, seconds, radians)
//! - Documented ranges and meanings
//! - Validation before any table is built

mod export;
mod ocean;

// Re-export all types
pub use export::ExportConfig;
pub use ocean::{validate_resolution, OceanParams, MAX_RESOLUTION};
