/// bandpass_steps: run each stage of the seed-index pipeline on a field and
/// write every intermediate array to a safetensors file for comparison
/// against an external reference.
///
/// Output keys:
///   input          [T, ...]        f64  field as read
///   averaged       [T/b, ...]      f64  after block mean
///   weights_short  [2N+1]          f64  low-pass at period_short
///   weights_long   [2N+1]          f64  low-pass at period_long
///   low_short      [T/b − 2N, ...] f64
///   low_long       [T/b − 2N, ...] f64
///   bandpass       [T/b − 2N, ...] f64  low_long − low_short
///   variance       [...]           f64  variance of bandpass over time
///   time_offset    [1]             i32  N
use anyhow::Result;
use clap::Parser;
use ndarray::{ArrayView1, Axis};
use std::path::PathBuf;

use tcseed::{
    apply_filter_axis, block_mean, io::FieldData, variance_axis, Bandpass, BandpassConfig,
    StWriter,
};

#[derive(Parser, Debug)]
#[command(name = "bandpass_steps")]
struct Args {
    /// Input safetensors file.
    #[arg(long)]
    input: PathBuf,

    /// Output safetensors path.
    #[arg(long)]
    output: PathBuf,

    /// Input time step.
    #[arg(long, default_value_t = 1.0_f64)]
    sampling_interval: f64,

    /// Averaging block size.
    #[arg(long, default_value_t = 24)]
    block_size: usize,

    /// Short band edge.
    #[arg(long, default_value_t = 72.0_f64)]
    period_short: f64,

    /// Long band edge.
    #[arg(long, default_value_t = 240.0_f64)]
    period_long: f64,

    /// Filter half-width.
    #[arg(long, default_value_t = 25)]
    half_width: usize,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let cfg = BandpassConfig {
        sampling_interval: args.sampling_interval,
        block_size: args.block_size,
        period_short: args.period_short,
        period_long: args.period_long,
        half_width: args.half_width,
    };
    let time = Axis(0);

    // ── 1. Read ────────────────────────────────────────────────────────────
    let t_read = now();
    let field = FieldData::load(&args.input)?;
    let ms_read = t_read.elapsed().as_secs_f64() * 1000.0;

    // ── 2. Design ──────────────────────────────────────────────────────────
    let t_design = now();
    let filter = Bandpass::from_config(&cfg)?;
    let ms_design = t_design.elapsed().as_secs_f64() * 1000.0;

    // ── 3. Block mean ──────────────────────────────────────────────────────
    let t_avg = now();
    let averaged = block_mean(&field.data, time, cfg.block_size)?;
    let ms_avg = t_avg.elapsed().as_secs_f64() * 1000.0;

    // ── 4. Low-pass filters ────────────────────────────────────────────────
    let t_lp = now();
    let low_short = apply_filter_axis(&averaged, filter.weights_short(), time)?;
    let low_long = apply_filter_axis(&averaged, filter.weights_long(), time)?;
    let ms_lp = t_lp.elapsed().as_secs_f64() * 1000.0;

    // ── 5. Band-pass + variance ────────────────────────────────────────────
    let t_var = now();
    let band = &low_long - &low_short;
    let variance = variance_axis(&band, time, 0)?;
    let ms_var = t_var.elapsed().as_secs_f64() * 1000.0;

    log::info!(
        "TIMING read={ms_read:.4}ms design={ms_design:.4}ms average={ms_avg:.4}ms \
         lowpass={ms_lp:.4}ms variance={ms_var:.4}ms"
    );
    log::info!(
        "{:?} → averaged {:?} → band {:?}",
        field.data.shape(),
        averaged.shape(),
        band.shape()
    );

    // ── 6. Write output ────────────────────────────────────────────────────
    let mut w = StWriter::new();
    w.add_f64_arr("input", &field.data);
    w.add_f64_arr("averaged", &averaged);
    w.add_f64_arr("weights_short", &ArrayView1::from(filter.weights_short()));
    w.add_f64_arr("weights_long", &ArrayView1::from(filter.weights_long()));
    w.add_f64_arr("low_short", &low_short);
    w.add_f64_arr("low_long", &low_long);
    w.add_f64_arr("bandpass", &band);
    w.add_f64_arr("variance", &variance);
    w.add_i32("time_offset", &[i32::try_from(filter.half_width())?], &[1]);
    w.write(&args.output)?;

    log::info!("written → {}", args.output.display());
    Ok(())
}

/// Return `std::time::Instant::now()` (used for internal timing).
#[inline(always)]
fn now() -> std::time::Instant { std::time::Instant::now() }
