//! Platform encoder families.
//!
//! Each platform family implements the same four operations — base calls,
//! base-call index, filters, locations — with its own binary layouts. The
//! orchestrator selects one [`PlatformEncoder`] per run and drives it in
//! the fixed order base-calls → index → filters → locations. Encoders
//! assemble each file fully in memory and hand it to an [`ArtifactSink`];
//! a sink error aborts the remaining steps for the run.

pub mod bcl;
pub mod bci;
pub mod clocs;
pub mod filter;
pub mod locs;

use std::path::{Path, PathBuf};

use crate::{addressing, config::Platform, Result, Run, Sampler};

/// Where an artifact belongs inside the run directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dest {
    /// `Data/Intensities`
    Intensities,
    /// `Data/Intensities/L00N`
    LaneIntensities { lane: u32 },
    /// `Data/Intensities/BaseCalls/L00N`
    BaseCalls { lane: u32 },
    /// `Data/Intensities/BaseCalls/L00N/C<cycle>.1`
    Cycle { lane: u32, cycle: u32 },
}

fn lane_dir(lane: u32) -> String {
    format!("L{:03}", lane + 1)
}

impl Dest {
    /// Path of the destination directory relative to the run root.
    pub fn relative_path(&self) -> PathBuf {
        let base = Path::new("Data").join("Intensities");
        match *self {
            Dest::Intensities => base,
            Dest::LaneIntensities { lane } => base.join(lane_dir(lane)),
            Dest::BaseCalls { lane } => base.join("BaseCalls").join(lane_dir(lane)),
            Dest::Cycle { lane, cycle } => base
                .join("BaseCalls")
                .join(lane_dir(lane))
                .join(format!("C{}.1", cycle)),
        }
    }
}

/// How the orchestrator must compress an artifact on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    /// Block gzip via the external `bgzip` tool; final extension `.bgzf`.
    Bgzf,
    /// In-process gzip; final extension `.gz`.
    Gzip,
}

/// One fully assembled output file: destination directory, uncompressed
/// file name, compression directive, and the complete byte content.
#[derive(Debug)]
pub struct Artifact {
    pub dest: Dest,
    pub name: String,
    pub compression: Compression,
    pub bytes: Vec<u8>,
}

/// Consumer of encoded artifacts, in emission order.
pub trait ArtifactSink {
    fn accept(&mut self, artifact: Artifact) -> Result<()>;
}

/// Sink that collects artifacts in memory, for tests and in-process
/// consumers.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub artifacts: Vec<Artifact>,
}

impl ArtifactSink for MemorySink {
    fn accept(&mut self, artifact: Artifact) -> Result<()> {
        self.artifacts.push(artifact);
        Ok(())
    }
}

/// The four encoding operations of one platform family.
///
/// Implementations are complete specializations: no behavior is shared
/// through a default path, and the selection happens exactly once per run
/// via [`encoder_for`].
pub trait PlatformEncoder {
    /// Base-call files for every cycle of every read.
    fn base_calls(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()>;

    /// Per-lane base-call index files, on the platforms that produce them.
    fn base_call_index(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()>;

    /// Quality-filter files.
    fn filters(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()>;

    /// Cluster-location files.
    fn locations(&self, run: &Run, sampler: &mut Sampler, sink: &mut dyn ArtifactSink)
        -> Result<()>;
}

/// Selects the encoder family for a platform tag.
pub fn encoder_for(platform: Platform) -> &'static dyn PlatformEncoder {
    match platform {
        Platform::Nextseq => &NextSeqEncoder,
        Platform::Hiseqx | Platform::Hiseq4000 => &HiSeqXEncoder,
        Platform::Miseq => &MiSeqEncoder,
        Platform::Hiseq2500 => &HiSeq2500Encoder,
    }
}

/// Per-tile base calls shared by every family without lane flattening:
/// one gzip artifact per cycle per tile, inside the cycle directory.
fn per_tile_base_calls(run: &Run, sink: &mut dyn ArtifactSink) -> Result<()> {
    for lane in &run.lanes {
        for cycle in run.cycles() {
            for t in lane.tiles() {
                sink.accept(Artifact {
                    dest: Dest::Cycle {
                        lane: lane.idx,
                        cycle,
                    },
                    name: format!("{}.bcl", addressing::tile_file_stem(lane.idx, &t)),
                    compression: Compression::Gzip,
                    bytes: bcl::tile_cycle(t.tile),
                })?;
            }
        }
    }
    Ok(())
}

/// Per-tile filters shared by every family without lane flattening.
fn per_tile_filters(run: &Run, sink: &mut dyn ArtifactSink) -> Result<()> {
    for lane in &run.lanes {
        for t in lane.tiles() {
            sink.accept(Artifact {
                dest: Dest::BaseCalls { lane: lane.idx },
                name: format!("{}.filter", addressing::tile_file_stem(lane.idx, &t)),
                compression: Compression::None,
                bytes: filter::tile_filter(t.tile),
            })?;
        }
    }
    Ok(())
}

/// Lane-aggregate family: lane-flattened base calls (block gzip), a
/// per-lane base-call index, per-lane filters, per-lane float locations.
pub struct NextSeqEncoder;

impl PlatformEncoder for NextSeqEncoder {
    fn base_calls(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()> {
        for lane in &run.lanes {
            // Cluster bytes are fixed at construction, so every cycle of a
            // lane carries the same payload.
            let payload = bcl::lane_cycle(lane);
            for cycle in run.cycles() {
                sink.accept(Artifact {
                    dest: Dest::BaseCalls { lane: lane.idx },
                    name: format!("{:04}.bcl", cycle),
                    compression: Compression::Bgzf,
                    bytes: payload.clone(),
                })?;
            }
        }
        Ok(())
    }

    fn base_call_index(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()> {
        for lane in &run.lanes {
            sink.accept(Artifact {
                dest: Dest::BaseCalls { lane: lane.idx },
                name: format!("s_{}.bci", lane.idx + 1),
                compression: Compression::None,
                bytes: bci::lane_index(lane, run.config.clusters),
            })?;
        }
        Ok(())
    }

    fn filters(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()> {
        for lane in &run.lanes {
            sink.accept(Artifact {
                dest: Dest::BaseCalls { lane: lane.idx },
                name: format!("s_{}.filter", lane.idx + 1),
                compression: Compression::None,
                bytes: filter::lane_filter(lane),
            })?;
        }
        Ok(())
    }

    fn locations(
        &self,
        run: &Run,
        sampler: &mut Sampler,
        sink: &mut dyn ArtifactSink,
    ) -> Result<()> {
        for lane in &run.lanes {
            sink.accept(Artifact {
                dest: Dest::LaneIntensities { lane: lane.idx },
                name: format!("s_{}.locs", lane.idx + 1),
                compression: Compression::None,
                bytes: locs::lane_locs(lane, run.config.dims, sampler),
            })?;
        }
        Ok(())
    }
}

/// Shared-well-grid family: per-tile base calls and filters, no index,
/// and a single run-wide location grid repeated on every tile.
pub struct HiSeqXEncoder;

impl PlatformEncoder for HiSeqXEncoder {
    fn base_calls(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()> {
        per_tile_base_calls(run, sink)
    }

    fn base_call_index(&self, _run: &Run, _sink: &mut dyn ArtifactSink) -> Result<()> {
        Ok(())
    }

    fn filters(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()> {
        per_tile_filters(run, sink)
    }

    fn locations(
        &self,
        run: &Run,
        sampler: &mut Sampler,
        sink: &mut dyn ArtifactSink,
    ) -> Result<()> {
        sink.accept(Artifact {
            dest: Dest::Intensities,
            name: "s.locs".to_string(),
            compression: Compression::None,
            bytes: locs::well_grid(run.config.clusters, run.config.dims, sampler),
        })
    }
}

/// Per-tile-location family: per-tile base calls, filters, and float
/// locations (both axes drawn from the image-width range).
pub struct MiSeqEncoder;

impl PlatformEncoder for MiSeqEncoder {
    fn base_calls(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()> {
        per_tile_base_calls(run, sink)
    }

    fn base_call_index(&self, _run: &Run, _sink: &mut dyn ArtifactSink) -> Result<()> {
        Ok(())
    }

    fn filters(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()> {
        per_tile_filters(run, sink)
    }

    fn locations(
        &self,
        run: &Run,
        sampler: &mut Sampler,
        sink: &mut dyn ArtifactSink,
    ) -> Result<()> {
        for lane in &run.lanes {
            for t in lane.tiles() {
                sink.accept(Artifact {
                    dest: Dest::LaneIntensities { lane: lane.idx },
                    name: format!("{}.locs", addressing::tile_file_stem(lane.idx, &t)),
                    compression: Compression::None,
                    bytes: locs::tile_locs(run.config.clusters, run.config.dims, sampler),
                })?;
            }
        }
        Ok(())
    }
}

/// Binned-location family: per-tile base calls and filters, compact
/// binned per-tile locations.
pub struct HiSeq2500Encoder;

impl PlatformEncoder for HiSeq2500Encoder {
    fn base_calls(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()> {
        per_tile_base_calls(run, sink)
    }

    fn base_call_index(&self, _run: &Run, _sink: &mut dyn ArtifactSink) -> Result<()> {
        Ok(())
    }

    fn filters(&self, run: &Run, sink: &mut dyn ArtifactSink) -> Result<()> {
        per_tile_filters(run, sink)
    }

    fn locations(
        &self,
        run: &Run,
        sampler: &mut Sampler,
        sink: &mut dyn ArtifactSink,
    ) -> Result<()> {
        for lane in &run.lanes {
            for t in lane.tiles() {
                sink.accept(Artifact {
                    dest: Dest::LaneIntensities { lane: lane.idx },
                    name: format!("{}.clocs", addressing::tile_file_stem(lane.idx, &t)),
                    compression: Compression::None,
                    bytes: clocs::tile_clocs(run.config.clusters, run.config.dims, sampler),
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ImageDims, RunConfig};

    fn tiny_config(platform: Platform) -> RunConfig {
        RunConfig {
            platform,
            lanes: 2,
            surfaces: 1,
            swaths: 1,
            tiles: 2,
            sections: 1,
            clusters: 6,
            dims: ImageDims {
                width: 100,
                height: 100,
            },
            ..RunConfig::default()
        }
    }

    fn encode_all(platform: Platform) -> MemorySink {
        let mut sampler = Sampler::new(Some(40));
        let run = Run::build(tiny_config(platform), &mut sampler);
        let encoder = encoder_for(platform);
        let mut sink = MemorySink::default();
        encoder.base_calls(&run, &mut sink).unwrap();
        encoder.base_call_index(&run, &mut sink).unwrap();
        encoder.filters(&run, &mut sink).unwrap();
        encoder.locations(&run, &mut sampler, &mut sink).unwrap();
        sink
    }

    #[test]
    fn test_dest_paths() {
        assert_eq!(
            Dest::Cycle { lane: 0, cycle: 3 }.relative_path(),
            Path::new("Data/Intensities/BaseCalls/L001/C3.1")
        );
        assert_eq!(
            Dest::LaneIntensities { lane: 7 }.relative_path(),
            Path::new("Data/Intensities/L008")
        );
        assert_eq!(
            Dest::Intensities.relative_path(),
            Path::new("Data/Intensities")
        );
    }

    #[test]
    fn test_lane_aggregate_family_artifact_set() {
        let sink = encode_all(Platform::Nextseq);

        let bcls: Vec<_> = sink
            .artifacts
            .iter()
            .filter(|a| a.name.ends_with(".bcl"))
            .collect();
        // One file per cycle per lane, cycle numbering 1-based contiguous.
        assert_eq!(bcls.len(), 2 * 2);
        assert!(bcls.iter().all(|a| a.compression == Compression::Bgzf));
        assert_eq!(bcls[0].name, "0001.bcl");
        assert_eq!(bcls[1].name, "0002.bcl");
        // Same lane, same payload on every cycle.
        assert_eq!(bcls[0].bytes, bcls[1].bytes);

        let bcis: Vec<_> = sink
            .artifacts
            .iter()
            .filter(|a| a.name.ends_with(".bci"))
            .collect();
        assert_eq!(bcis.len(), 2);
        assert_eq!(bcis[0].name, "s_1.bci");
        assert_eq!(bcis[0].dest, Dest::BaseCalls { lane: 0 });
        // Two tiles per lane, eight bytes per entry.
        assert_eq!(bcis[0].bytes.len(), 2 * 8);

        let filters: Vec<_> = sink
            .artifacts
            .iter()
            .filter(|a| a.name.ends_with(".filter"))
            .collect();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[1].name, "s_2.filter");
        assert_eq!(filters[1].bytes.len(), 12 + 12);

        let locs: Vec<_> = sink
            .artifacts
            .iter()
            .filter(|a| a.name.ends_with(".locs"))
            .collect();
        assert_eq!(locs.len(), 2);
        assert_eq!(locs[0].dest, Dest::LaneIntensities { lane: 0 });
        assert_eq!(locs[0].bytes.len(), 12 + 12 * 8);
    }

    #[test]
    fn test_shared_grid_family_artifact_set() {
        let sink = encode_all(Platform::Hiseqx);

        let bcls: Vec<_> = sink
            .artifacts
            .iter()
            .filter(|a| a.name.ends_with(".bcl"))
            .collect();
        // One file per cycle per tile: 2 lanes x 2 cycles x 2 tiles.
        assert_eq!(bcls.len(), 2 * 2 * 2);
        assert!(bcls.iter().all(|a| a.compression == Compression::Gzip));
        assert_eq!(bcls[0].name, "s_1_1101.bcl");
        assert_eq!(bcls[0].dest, Dest::Cycle { lane: 0, cycle: 1 });
        assert_eq!(
            u32::from_le_bytes(bcls[0].bytes[0..4].try_into().unwrap()),
            6
        );

        assert!(!sink.artifacts.iter().any(|a| a.name.ends_with(".bci")));

        let locs: Vec<_> = sink
            .artifacts
            .iter()
            .filter(|a| a.name.ends_with(".locs"))
            .collect();
        assert_eq!(locs.len(), 1);
        assert_eq!(locs[0].name, "s.locs");
        assert_eq!(locs[0].dest, Dest::Intensities);
        // Cross product of 6/3 x-wells and 2*6/3 y-wells.
        assert_eq!(locs[0].bytes.len(), 12 + (2 * 4) * 8);
    }

    #[test]
    fn test_per_tile_locations_families() {
        let miseq = encode_all(Platform::Miseq);
        let locs: Vec<_> = miseq
            .artifacts
            .iter()
            .filter(|a| a.name.ends_with(".locs"))
            .collect();
        assert_eq!(locs.len(), 2 * 2);
        assert_eq!(locs[0].name, "s_1_1101.locs");
        assert_eq!(locs[0].bytes.len(), 12 + 6 * 8);

        let hiseq2500 = encode_all(Platform::Hiseq2500);
        let clocs: Vec<_> = hiseq2500
            .artifacts
            .iter()
            .filter(|a| a.name.ends_with(".clocs"))
            .collect();
        assert_eq!(clocs.len(), 2 * 2);
        assert_eq!(clocs[0].name, "s_1_1101.clocs");
        assert_eq!(clocs[0].dest, Dest::LaneIntensities { lane: 0 });
        assert_eq!(clocs[0].bytes[0], 1);
    }

    #[test]
    fn test_filter_scope_split_between_families() {
        let nextseq = encode_all(Platform::Nextseq);
        let hiseqx = encode_all(Platform::Hiseqx);

        let per_lane = nextseq
            .artifacts
            .iter()
            .filter(|a| a.name.ends_with(".filter"))
            .count();
        let per_tile = hiseqx
            .artifacts
            .iter()
            .filter(|a| a.name.ends_with(".filter"))
            .count();
        assert_eq!(per_lane, 2);
        assert_eq!(per_tile, 2 * 2);
    }
}
