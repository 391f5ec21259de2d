//! The nested counting hierarchy of one flow cell:
//! lane → section → swath → surface → tile → cluster.
//!
//! The tree is built once, depth-first, from a validated configuration and
//! never mutated afterwards. Every encoder walks it through the same lazy
//! traversal so the nesting order (section, swath, surface, tile, cluster)
//! is fixed in exactly one place.

use crate::{config::RunConfig, Sampler};

/// One simulated sequencing cluster.
///
/// `call` packs base call and quality into a single byte (lower bits =
/// call, upper bits = quality, per platform convention); `passed` is the
/// quality-filter flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    pub call: u8,
    pub passed: bool,
}

impl Cluster {
    /// Filter flag encoded as a single body byte (1 = pass, 0 = fail).
    pub fn pass_byte(&self) -> u8 {
        u8::from(self.passed)
    }
}

/// One imaged field holding a fixed number of clusters.
#[derive(Debug)]
pub struct Tile {
    pub idx: u32,
    pub clusters: Vec<Cluster>,
}

/// Top or bottom imaging surface.
#[derive(Debug)]
pub struct Surface {
    pub idx: u32,
    pub tiles: Vec<Tile>,
}

/// Sub-division of a camera section.
#[derive(Debug)]
pub struct Swath {
    pub idx: u32,
    pub surfaces: Vec<Surface>,
}

/// Camera/stage section within a lane. Sectionless platforms carry
/// exactly one.
#[derive(Debug)]
pub struct Section {
    pub idx: u32,
    pub swaths: Vec<Swath>,
}

/// One physical flow-cell lane.
#[derive(Debug)]
pub struct Lane {
    pub idx: u32,
    pub sections: Vec<Section>,
}

/// One tile plus the indices of every level above it, as yielded by the
/// shared traversal.
#[derive(Debug, Clone, Copy)]
pub struct TileRef<'a> {
    pub section: &'a Section,
    pub swath: &'a Swath,
    pub surface: &'a Surface,
    pub tile: &'a Tile,
}

impl Tile {
    fn build(idx: u32, config: &RunConfig, sampler: &mut Sampler) -> Self {
        let clusters = (0..config.clusters)
            .map(|_| Cluster {
                call: sampler.call_byte(),
                passed: sampler.pass_flag(),
            })
            .collect();
        Self { idx, clusters }
    }
}

impl Surface {
    fn build(idx: u32, config: &RunConfig, sampler: &mut Sampler) -> Self {
        let tiles = (0..config.tiles)
            .map(|t| Tile::build(t, config, sampler))
            .collect();
        Self { idx, tiles }
    }
}

impl Swath {
    fn build(idx: u32, config: &RunConfig, sampler: &mut Sampler) -> Self {
        let surfaces = (0..config.surfaces)
            .map(|s| Surface::build(s, config, sampler))
            .collect();
        Self { idx, surfaces }
    }
}

impl Section {
    fn build(idx: u32, config: &RunConfig, sampler: &mut Sampler) -> Self {
        let swaths = (0..config.swaths)
            .map(|s| Swath::build(s, config, sampler))
            .collect();
        Self { idx, swaths }
    }
}

impl Lane {
    pub(crate) fn build(idx: u32, config: &RunConfig, sampler: &mut Sampler) -> Self {
        let sections = (0..config.sections)
            .map(|s| Section::build(s, config, sampler))
            .collect();
        Self { idx, sections }
    }

    /// Walks every tile in the fixed nested order
    /// section → swath → surface → tile.
    pub fn tiles(&self) -> impl Iterator<Item = TileRef<'_>> {
        self.sections.iter().flat_map(|section| {
            section.swaths.iter().flat_map(move |swath| {
                swath.surfaces.iter().flat_map(move |surface| {
                    surface.tiles.iter().map(move |tile| TileRef {
                        section,
                        swath,
                        surface,
                        tile,
                    })
                })
            })
        })
    }

    /// Walks every cluster in the lane, tiles in traversal order.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.tiles().flat_map(|t| t.tile.clusters.iter())
    }

    /// Number of clusters the traversal will yield.
    pub fn cluster_count(&self) -> usize {
        self.tiles().map(|t| t.tile.clusters.len()).sum()
    }
}
