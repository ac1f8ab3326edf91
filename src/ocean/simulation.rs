//! Simulation context owning every table and buffer of the pipeline.

use std::time::Instant;

use super::butterfly::ButterflyTable;
use super::dispersion;
use super::encode::{derive_normals, encode_fields};
use super::fft::{inverse_columns, inverse_rows, PingPong};
use super::fields::OceanFields;
use super::spectrum::SpectrumTables;
use crate::error::ParamsError;
use crate::params::OceanParams;

/// FFT ocean simulation
///
/// Frame pipeline: dispersion → log2(N) row passes → log2(N) - 1 column
/// passes → encode (last column pass fused) → normals and folding.
pub struct OceanSimulation {
    params: OceanParams,
    butterfly: ButterflyTable,
    spectrum: SpectrumTables,
    buffers: PingPong,
    fields: OceanFields,
}

impl OceanSimulation {
    /// Validate parameters and build every table and buffer
    pub fn build(params: OceanParams) -> Result<Self, ParamsError> {
        let start = Instant::now();
        params.validate()?;

        let butterfly = ButterflyTable::build(params.resolution)?;
        let spectrum = SpectrumTables::build(&params)?;
        let buffers = PingPong::new(params.resolution);
        let fields = OceanFields::new(params.resolution, params.patch_size_m);

        log::info!(
            "Ocean built: {}x{} grid, {} m patch, wind {} m/s ({:.1} ms)",
            params.resolution,
            params.resolution,
            params.patch_size_m,
            params.wind_speed_m_per_s,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self {
            params,
            butterfly,
            spectrum,
            buffers,
            fields,
        })
    }

    /// Switch to new parameters
    ///
    /// New tables are built completely before any is swapped in; on error
    /// the simulation keeps running with its previous parameters. The
    /// butterfly table and buffers are only rebuilt on a resolution change.
    pub fn rebuild(&mut self, params: OceanParams) -> Result<(), ParamsError> {
        let start = Instant::now();
        let spectrum = SpectrumTables::build(&params)?;

        if self.params.resolution_changed(&params) {
            let butterfly = ButterflyTable::build(params.resolution)?;
            log::debug!(
                "Resolution {} -> {}, reallocating buffers",
                self.params.resolution,
                params.resolution
            );
            self.butterfly = butterfly;
            self.buffers = PingPong::new(params.resolution);
        }

        self.spectrum = spectrum;
        self.fields = OceanFields::new(params.resolution, params.patch_size_m);
        self.params = params;

        log::info!(
            "Ocean rebuilt ({:.1} ms)",
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(())
    }

    /// Advance to simulation time `time_s` and return the new fields
    pub fn update(&mut self, time_s: f32) -> &OceanFields {
        dispersion::evaluate(
            &self.spectrum,
            &self.params,
            time_s,
            self.buffers.source_mut(),
        );

        inverse_rows(&self.butterfly, &mut self.buffers);
        inverse_columns(
            &self.butterfly,
            &mut self.buffers,
            self.butterfly.passes() - 1,
        );

        encode_fields(
            &self.butterfly,
            &self.buffers,
            self.params.choppyness,
            &mut self.fields,
        );
        derive_normals(&mut self.fields);

        log::trace!("Ocean updated at t = {:.3} s", time_s);
        &self.fields
    }

    /// Release all tables and buffers
    pub fn teardown(self) {
        log::info!(
            "Ocean torn down ({}x{} grid)",
            self.params.resolution,
            self.params.resolution
        );
    }

    pub fn params(&self) -> &OceanParams {
        &self.params
    }

    /// Fields of the latest `update`
    pub fn fields(&self) -> &OceanFields {
        &self.fields
    }

    pub fn butterfly(&self) -> &ButterflyTable {
        &self.butterfly
    }

    pub fn spectrum(&self) -> &SpectrumTables {
        &self.spectrum
    }
}
