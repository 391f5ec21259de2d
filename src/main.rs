use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rungen::{generate, ImageDims, Platform, ReadSpec, RunConfig};

/// Generate a mock sequencing run directory for pipeline test fixtures.
#[derive(Parser)]
#[command(name = "rungen", version, about)]
struct Args {
    /// Platform to imitate
    #[arg(short, long, value_enum)]
    machine: Platform,

    /// Directory the run folder is created under
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    #[arg(long, default_value_t = 4)]
    lanes: u32,

    #[arg(long, default_value_t = 2)]
    surfaces: u32,

    #[arg(long, default_value_t = 3)]
    swaths: u32,

    /// Tiles per surface
    #[arg(long, default_value_t = 12)]
    tiles: u32,

    /// Camera sections per lane (sectioned platforms only)
    #[arg(long, default_value_t = 3)]
    sections: u32,

    /// Clusters per tile
    #[arg(long, default_value_t = 2000)]
    clusters: u32,

    /// Flowcell name recorded in the run metadata
    #[arg(long, default_value = "TESTFLOWCELL")]
    flowcell: String,

    /// Run date (YYMMDD) used in the run identifier
    #[arg(long, default_value = "250101")]
    date: String,

    /// Read layout, one spec per read: a cycle count with an `i` suffix
    /// for indexed reads (e.g. --reads 151 --reads 8i)
    #[arg(long = "reads", value_name = "SPEC", default_values = ["1", "1"])]
    reads: Vec<ReadSpec>,

    /// Tile image width in pixels
    #[arg(long, default_value_t = 2048)]
    width: u32,

    /// Tile image height in pixels
    #[arg(long, default_value_t = 7241)]
    height: u32,

    /// Clamp out-of-capability counts to the platform maximum instead of
    /// failing
    #[arg(long)]
    clamp: bool,

    /// RNG seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = RunConfig {
        platform: args.machine,
        lanes: args.lanes,
        surfaces: args.surfaces,
        swaths: args.swaths,
        tiles: args.tiles,
        sections: args.sections,
        clusters: args.clusters,
        flowcell: args.flowcell,
        date: args.date,
        reads: args.reads,
        dims: ImageDims {
            width: args.width,
            height: args.height,
        },
    }
    .validated(args.clamp)?;

    let root = generate(config, args.seed, &args.out).context("generating run directory")?;
    println!("{}", root.display());
    Ok(())
}
