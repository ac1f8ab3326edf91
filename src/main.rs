//! ocean-fft - FFT ocean patch simulator
//!
//! Builds the spectrum for the given wind, steps the simulation and writes
//! height, displacement and normal + folding maps for every frame.

use std::time::Instant;

use clap::Parser;

use ocean_fft::cli::Args;
use ocean_fft::export;
use ocean_fft::ocean::OceanSimulation;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let params = args.ocean_params();
    let config = args.export_config();

    std::fs::create_dir_all(&config.output_dir)?;

    let mut ocean = OceanSimulation::build(params)?;
    let start = Instant::now();

    for frame in 0..config.frames {
        let time_s = config.frame_time_s(frame);
        let fields = ocean.update(time_s);
        let stats = fields.stats();

        log::info!(
            "Frame {:4} t={:7.3}s height [{:+.3}, {:+.3}] m, rms {:.3} m, folded {:.1}%",
            frame,
            time_s,
            stats.min_height_m,
            stats.max_height_m,
            stats.rms_height_m,
            stats.folded_fraction * 100.0
        );

        export::save_pngs(
            fields,
            &stats,
            &config.frame_path("height", frame, "png"),
            &config.frame_path("displacement", frame, "png"),
            &config.frame_path("normal", frame, "png"),
        )?;

        if config.write_raw {
            export::save_raw_f16(fields, &config.frame_path("fields", frame, "f16"))?;
        }
    }

    log::info!(
        "Wrote {} frame(s) to {} in {:.2} ms",
        config.frames,
        config.output_dir.display(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    ocean.teardown();
    Ok(())
}
