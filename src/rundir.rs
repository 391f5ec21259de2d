//! Run directory orchestration: tree creation, artifact writes, and
//! compression dispatch.
//!
//! The directory layout mirrors the instruments' own output: lane
//! directories under `Data/Intensities` (location files) and
//! `Data/Intensities/BaseCalls` (base calls, index, filters), with
//! per-cycle `C<n>.1` directories on the platforms that write one
//! base-call file per tile. All writes go through [`RunDirectory`] as the
//! run's [`ArtifactSink`]; any failure aborts the remaining encoding
//! steps.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{debug, info};

use crate::encode::{encoder_for, Artifact, ArtifactSink, Compression, Dest};
use crate::metadata;
use crate::{config::RunConfig, Result, Run, RunGenError, Sampler};

/// A created run output directory that artifacts can be written into.
pub struct RunDirectory {
    root: PathBuf,
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(suffix);
    PathBuf::from(os)
}

/// Compresses `path` in place with the external `bgzip` tool.
///
/// A missing binary is fatal for the whole run; block-gzip framing cannot
/// be produced any other way here.
fn bgzip(path: &Path) -> Result<()> {
    let status = Command::new("bgzip").arg(path).status().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RunGenError::CompressorMissing { tool: "bgzip" }
        } else {
            RunGenError::Io(e)
        }
    })?;
    if !status.success() {
        return Err(RunGenError::CompressorFailed {
            tool: "bgzip",
            status: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}

impl RunDirectory {
    /// Creates the full directory tree for a run under `parent`.
    pub fn create(parent: &Path, run: &Run) -> Result<Self> {
        let root = parent.join(run.folder_name());
        let cycle_dirs = !run.config.platform.flattens_lane_base_calls();
        for lane in &run.lanes {
            fs::create_dir_all(
                root.join(Dest::LaneIntensities { lane: lane.idx }.relative_path()),
            )?;
            fs::create_dir_all(root.join(Dest::BaseCalls { lane: lane.idx }.relative_path()))?;
            if cycle_dirs {
                for cycle in run.cycles() {
                    fs::create_dir_all(
                        root.join(
                            Dest::Cycle {
                                lane: lane.idx,
                                cycle,
                            }
                            .relative_path(),
                        ),
                    )?;
                }
            }
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn into_root(self) -> PathBuf {
        self.root
    }

    /// Writes `RunInfo.xml` and `runParameters.xml` at the run root.
    pub fn write_metadata(&self, run: &Run) -> Result<()> {
        fs::write(self.root.join("RunInfo.xml"), metadata::run_info_xml(run)?)?;
        fs::write(
            self.root.join("runParameters.xml"),
            metadata::run_parameters_xml(run)?,
        )?;
        Ok(())
    }
}

impl ArtifactSink for RunDirectory {
    fn accept(&mut self, artifact: Artifact) -> Result<()> {
        let dir = self.root.join(artifact.dest.relative_path());
        let path = dir.join(&artifact.name);
        debug!("writing {}", path.display());
        match artifact.compression {
            Compression::None => fs::write(&path, &artifact.bytes)?,
            Compression::Gzip => {
                let mut writer = niffler::to_path(
                    with_suffix(&path, ".gz"),
                    niffler::compression::Format::Gzip,
                    niffler::Level::Six,
                )?;
                writer.write_all(&artifact.bytes)?;
                // Dropping the writer finalizes the gzip stream.
            }
            Compression::Bgzf => {
                fs::write(&path, &artifact.bytes)?;
                bgzip(&path)?;
                fs::rename(with_suffix(&path, ".gz"), with_suffix(&path, ".bgzf"))?;
            }
        }
        Ok(())
    }
}

/// Builds one complete mock run under `parent` and returns the run root.
///
/// Drives the platform encoder in the fixed sequence base-calls → index →
/// filters → locations; the first failure aborts the remaining steps.
pub fn generate(config: RunConfig, seed: Option<u64>, parent: &Path) -> Result<PathBuf> {
    let mut sampler = Sampler::new(seed);
    let run = Run::build(config, &mut sampler);
    info!("run {} ({})", run.id, run.config.platform.tag());

    let mut dir = RunDirectory::create(parent, &run)?;
    dir.write_metadata(&run)?;

    let encoder = encoder_for(run.config.platform);
    info!("encoding base calls");
    encoder.base_calls(&run, &mut dir)?;
    encoder.base_call_index(&run, &mut dir)?;
    info!("encoding filters");
    encoder.filters(&run, &mut dir)?;
    info!("encoding locations");
    encoder.locations(&run, &mut sampler, &mut dir)?;

    Ok(dir.into_root())
}
