//! Run configuration: platform tags, capability tables, and the validated
//! parameter set handed to the topology builder.
//!
//! A [`RunConfig`] is constructed once, validated once, and never mutated
//! mid-run. Validation either rejects out-of-capability counts or clamps
//! them to the platform maximum when the caller asks for clamping.

use std::str::FromStr;

use clap::ValueEnum;
use log::warn;

use crate::{Result, RunGenError};

/// Instrument platform families that can be imitated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Platform {
    Nextseq,
    Hiseqx,
    Hiseq4000,
    Miseq,
    Hiseq2500,
}

/// Physical maxima for one platform's flow cell geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub lanes: u32,
    pub surfaces: u32,
    pub swaths: u32,
    pub tiles: u32,
    pub sections: u32,
}

/// Tile naming convention advertised in the run metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileNaming {
    FiveDigit,
    FourDigit,
}

impl TileNaming {
    pub fn label(self) -> &'static str {
        match self {
            Self::FiveDigit => "FiveDigit",
            Self::FourDigit => "FourDigit",
        }
    }
}

impl Platform {
    /// Lowercase tag used in logs and error messages.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Nextseq => "nextseq",
            Self::Hiseqx => "hiseqx",
            Self::Hiseq4000 => "hiseq4000",
            Self::Miseq => "miseq",
            Self::Hiseq2500 => "hiseq2500",
        }
    }

    /// Instrument name embedded in the run identifier and metadata.
    pub fn machine_name(self) -> &'static str {
        match self {
            Self::Nextseq => "NSTESTMACHINE",
            Self::Hiseqx => "HXTESTMACHINE",
            Self::Hiseq4000 => "HFTESTMACHINE",
            Self::Miseq => "MSTESTMACHINE",
            Self::Hiseq2500 => "HSTESTMACHINE",
        }
    }

    pub fn application_name(self) -> &'static str {
        match self {
            Self::Nextseq => "NextSeq Control Software",
            Self::Hiseqx | Self::Hiseq4000 | Self::Hiseq2500 => "HiSeq Control Software",
            Self::Miseq => "MiSeq Control Software",
        }
    }

    pub fn application_version(self) -> &'static str {
        match self {
            Self::Nextseq => "2.0.0.24",
            Self::Hiseqx | Self::Hiseq4000 => "3.3.39",
            Self::Miseq => "2.5.0.5",
            Self::Hiseq2500 => "2.0.12.0",
        }
    }

    pub fn capabilities(self) -> Capabilities {
        match self {
            Self::Nextseq => Capabilities {
                lanes: 4,
                surfaces: 2,
                swaths: 3,
                tiles: 12,
                sections: 3,
            },
            Self::Hiseqx => Capabilities {
                lanes: 8,
                surfaces: 2,
                swaths: 2,
                tiles: 24,
                sections: 1,
            },
            Self::Hiseq4000 => Capabilities {
                lanes: 8,
                surfaces: 2,
                swaths: 2,
                tiles: 28,
                sections: 1,
            },
            Self::Miseq => Capabilities {
                lanes: 1,
                surfaces: 2,
                swaths: 1,
                tiles: 19,
                sections: 1,
            },
            Self::Hiseq2500 => Capabilities {
                lanes: 8,
                surfaces: 2,
                swaths: 3,
                tiles: 16,
                sections: 1,
            },
        }
    }

    /// Whether the platform subdivides lanes into camera sections.
    ///
    /// Sectionless platforms carry exactly one section and omit the section
    /// digit from every external identifier.
    pub fn has_sections(self) -> bool {
        matches!(self, Self::Nextseq)
    }

    /// Whether base calls are flattened into one file per lane per cycle.
    ///
    /// Flattening platforms skip the per-cycle directories and block-gzip
    /// their base-call files; the rest write one file per tile per cycle
    /// under `C<n>.1`.
    pub fn flattens_lane_base_calls(self) -> bool {
        matches!(self, Self::Nextseq)
    }

    /// Tile naming convention advertised in `RunInfo.xml`, if any.
    pub fn tile_naming(self) -> Option<TileNaming> {
        match self {
            Self::Nextseq => Some(TileNaming::FiveDigit),
            Self::Hiseqx | Self::Hiseq4000 => Some(TileNaming::FourDigit),
            Self::Miseq | Self::Hiseq2500 => None,
        }
    }
}

/// One sequencing read definition: cycle count plus indexed flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadSpec {
    pub num_cycles: u32,
    pub is_indexed: bool,
}

impl FromStr for ReadSpec {
    type Err = RunGenError;

    /// Parses `"151"` (template read) or `"8i"` (indexed read).
    fn from_str(s: &str) -> Result<Self> {
        let (digits, is_indexed) = match s.strip_suffix(['i', 'I']) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let num_cycles = digits
            .parse::<u32>()
            .map_err(|_| RunGenError::InvalidReadSpec(s.to_string()))?;
        if num_cycles == 0 {
            return Err(RunGenError::InvalidReadSpec(s.to_string()));
        }
        Ok(Self {
            num_cycles,
            is_indexed,
        })
    }
}

/// Image dimensions of one tile, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDims {
    pub width: u32,
    pub height: u32,
}

/// The full parameter set for one simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub platform: Platform,
    pub lanes: u32,
    pub surfaces: u32,
    pub swaths: u32,
    pub tiles: u32,
    pub sections: u32,
    /// Clusters per tile; constant across every tile in the run.
    pub clusters: u32,
    pub flowcell: String,
    /// Run date as six decimal digits (YYMMDD).
    pub date: String,
    pub reads: Vec<ReadSpec>,
    pub dims: ImageDims,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            platform: Platform::Nextseq,
            lanes: 4,
            surfaces: 2,
            swaths: 3,
            tiles: 12,
            sections: 3,
            clusters: 2000,
            flowcell: "TESTFLOWCELL".to_string(),
            date: "250101".to_string(),
            reads: vec![
                ReadSpec {
                    num_cycles: 1,
                    is_indexed: false,
                },
                ReadSpec {
                    num_cycles: 1,
                    is_indexed: false,
                },
            ],
            dims: ImageDims {
                width: 2048,
                height: 7241,
            },
        }
    }
}

fn require_nonzero(value: u32, param: &'static str) -> Result<()> {
    if value == 0 {
        return Err(RunGenError::InvalidParam {
            param,
            reason: "must be nonzero".to_string(),
        });
    }
    Ok(())
}

fn fit_capability(
    value: &mut u32,
    max: u32,
    param: &'static str,
    platform: Platform,
    clamp: bool,
) -> Result<()> {
    if *value > max {
        if !clamp {
            return Err(RunGenError::ParamOutOfRange {
                param,
                platform: platform.tag(),
                requested: *value,
                max,
            });
        }
        warn!(
            "{param} = {} exceeds {} capability, clamping to {max}",
            *value,
            platform.tag()
        );
        *value = max;
    }
    Ok(())
}

impl RunConfig {
    /// Validates the configuration against the platform capability table.
    ///
    /// With `clamp` set, out-of-capability counts are reduced to the
    /// platform maximum (logged at warn level); otherwise the first
    /// offending parameter is reported as [`RunGenError::ParamOutOfRange`].
    pub fn validated(mut self, clamp: bool) -> Result<Self> {
        require_nonzero(self.lanes, "lanes")?;
        require_nonzero(self.surfaces, "surfaces")?;
        require_nonzero(self.swaths, "swaths")?;
        require_nonzero(self.tiles, "tiles")?;
        require_nonzero(self.sections, "sections")?;
        require_nonzero(self.clusters, "clusters")?;
        require_nonzero(self.dims.width, "width")?;
        require_nonzero(self.dims.height, "height")?;

        if self.reads.is_empty() {
            return Err(RunGenError::InvalidParam {
                param: "reads",
                reason: "at least one read is required".to_string(),
            });
        }
        if self.date.len() != 6 || !self.date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RunGenError::InvalidParam {
                param: "date",
                reason: format!("{:?} is not a six-digit YYMMDD date", self.date),
            });
        }

        let caps = self.platform.capabilities();
        let platform = self.platform;
        fit_capability(&mut self.lanes, caps.lanes, "lanes", platform, clamp)?;
        fit_capability(&mut self.surfaces, caps.surfaces, "surfaces", platform, clamp)?;
        fit_capability(&mut self.swaths, caps.swaths, "swaths", platform, clamp)?;
        fit_capability(&mut self.tiles, caps.tiles, "tiles", platform, clamp)?;
        fit_capability(&mut self.sections, caps.sections, "sections", platform, clamp)?;

        Ok(self)
    }

    /// Tiles per lane across every section, swath, and surface.
    pub fn tiles_per_lane(&self) -> u32 {
        self.sections * self.swaths * self.surfaces * self.tiles
    }

    /// Clusters per lane; every tile carries the same cluster count.
    pub fn clusters_per_lane(&self) -> u32 {
        self.tiles_per_lane() * self.clusters
    }

    /// Total cycle count across the concatenation of all reads.
    pub fn total_cycles(&self) -> u32 {
        self.reads.iter().map(|r| r.num_cycles).sum()
    }
}
