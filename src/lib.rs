//! # rungen - Mock Sequencing-Run Output Synthesis
//!
//! `rungen` builds byte-exact mock output trees imitating the on-disk
//! artifacts of several sequencing-instrument families, for use as
//! fixtures by pipeline tests when no real run is available. A run is a
//! nested counting hierarchy (lane → section → swath → surface → tile →
//! cluster) populated with uniform random values and serialized through
//! one of four platform encoder families.
//!
//! Cluster values are uniformly random, not physically derived; callers
//! needing realistic distributions must post-process.
//!
//! ## File Formats
//!
//! All fields little-endian:
//!
//! | Format | Scope | Header | Body |
//! |--------|-------|--------|------|
//! | BCL (lane-flattened) | per lane, per cycle | u32 count | count × base-call byte |
//! | BCL (per-tile) | per tile, per cycle | u32 count | count × base-call byte |
//! | BCI | per lane | — | per tile: u32 tile code + u32 cluster count |
//! | FILTER | per lane or tile | u32 zero, u32 version=3, u32 count | count × pass byte |
//! | LOCS | per lane or tile | u32 version=1, f32 1.0, u32 count | count × (f32 x, f32 y) |
//! | LOCS (well grid) | whole run | same | sorted x-pool × y-pool cross product |
//! | CLOCS | per tile | u8 version=1, u32 bin count | per bin: u8 count + (u8, u8) offsets |
//!
//! ## Basic Usage
//!
//! ```rust
//! use rungen::{encoder_for, MemorySink, Platform, Run, RunConfig, Sampler};
//!
//! # fn main() -> rungen::Result<()> {
//! // Clamp the default geometry down to one miseq lane.
//! let config = RunConfig {
//!     platform: Platform::Miseq,
//!     ..RunConfig::default()
//! }
//! .validated(true)?;
//!
//! let mut sampler = Sampler::new(Some(42));
//! let run = Run::build(config, &mut sampler);
//!
//! // Collect the encoded artifacts in memory.
//! let encoder = encoder_for(run.config.platform);
//! let mut sink = MemorySink::default();
//! encoder.base_calls(&run, &mut sink)?;
//! encoder.base_call_index(&run, &mut sink)?;
//! encoder.filters(&run, &mut sink)?;
//! encoder.locations(&run, &mut sampler, &mut sink)?;
//!
//! for artifact in &sink.artifacts {
//!     println!("{}/{}", artifact.dest.relative_path().display(), artifact.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Writing a complete run directory (tree creation, metadata XML, and
//! compression included) goes through [`generate`] instead, which is what
//! the `rungen` binary drives.

pub mod addressing;
pub mod config;
pub mod encode;
mod error;
pub mod metadata;
mod model;
mod rundir;

pub use config::{Capabilities, ImageDims, Platform, ReadSpec, RunConfig, TileNaming};
pub use encode::{
    encoder_for, Artifact, ArtifactSink, Compression, Dest, MemorySink, PlatformEncoder,
};
pub use error::{Result, RunGenError};
pub use model::{Cluster, Lane, Run, Sampler, Section, Surface, Swath, Tile, TileRef};
pub use rundir::{generate, RunDirectory};
