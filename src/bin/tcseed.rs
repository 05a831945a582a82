use anyhow::{Context, Result};
use clap::Parser;
use ndarray::Axis;
use std::path::PathBuf;
use tcseed::{io::FieldData, seed_index, BandpassConfig, StWriter};

#[derive(Debug, Parser)]
#[command(name = "tcseed", about = "3–10 day Lanczos band-pass and TC seed index")]
struct Args {
    /// Input safetensors file with a `data` tensor ([time, ...])
    #[arg(long)]
    input: PathBuf,

    /// Output safetensors path
    #[arg(long)]
    output: PathBuf,

    /// JSON configuration file (missing fields keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Index of the time axis in `data`
    #[arg(long, default_value_t = 0)]
    time_axis: usize,

    /// Time step of the input (same unit as the periods)
    #[arg(long)]
    sampling_interval: Option<f64>,

    /// Samples averaged into one before filtering (24: hourly → daily)
    #[arg(long)]
    block_size: Option<usize>,

    /// Short band edge (period)
    #[arg(long)]
    period_short: Option<f64>,

    /// Long band edge (period)
    #[arg(long)]
    period_long: Option<f64>,

    /// Filter half-width N in averaged samples
    #[arg(long)]
    half_width: Option<usize>,
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
    log::debug!("{args:#?}");

    let mut cfg = match &args.config {
        Some(path) => BandpassConfig::from_json_file(path)?,
        None => BandpassConfig::default(),
    };

    let field = FieldData::load(&args.input)?;
    log::info!(
        "loaded {:?} from {}",
        field.data.shape(),
        args.input.display()
    );

    // Command line beats the file, the file beats the config.
    if let Some(dt) = args.sampling_interval.or(field.sampling_interval) {
        cfg.sampling_interval = dt;
    }
    if let Some(b) = args.block_size {
        cfg.block_size = b;
    }
    if let Some(p) = args.period_short {
        cfg.period_short = p;
    }
    if let Some(p) = args.period_long {
        cfg.period_long = p;
    }
    if let Some(n) = args.half_width {
        cfg.half_width = n;
    }
    log::info!("{cfg:?}");

    let index = seed_index(&field.data, Axis(args.time_axis), &cfg)
        .context("seed index computation failed")?;

    let mut w = StWriter::new();
    w.add_f64_arr("bandpass", &index.bandpass);
    w.add_f64_arr("seed_index", &index.variance);
    w.add_f64_arr("weights_short", &ndarray::ArrayView1::from(&index.weights_short));
    w.add_f64_arr("weights_long", &ndarray::ArrayView1::from(&index.weights_long));
    w.add_i32("time_offset", &[i32::try_from(index.time_offset)?], &[1]);
    w.add_i32("input_time_offset", &[i32::try_from(index.input_time_offset())?], &[1]);
    w.add_f64("sampling_interval", &[cfg.filtered_interval()], &[1]);
    w.write(&args.output)?;
    log::info!("written → {}", args.output.display());

    Ok(())
}
