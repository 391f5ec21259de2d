//! Quality-filter buffers.
//!
//! Header: 4-byte reserved zero, 4-byte format version (3), 4-byte cluster
//! count, all little-endian; body: one byte per cluster, 1 = pass. The
//! lane-aggregate variant spans every cluster of a lane in traversal
//! order; the per-tile variant spans a single tile.

use bytemuck::{Pod, Zeroable};

use crate::{Lane, Tile};

pub const FILTER_VERSION: u32 = 3;
pub const FILTER_HEADER_SIZE: usize = std::mem::size_of::<FilterHeader>();

/// 12-byte filter file header.
#[derive(Copy, Clone, Pod, Zeroable, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct FilterHeader {
    pub reserved: u32,
    pub version: u32,
    pub count: u32,
}

impl FilterHeader {
    pub fn new(count: u32) -> Self {
        Self {
            reserved: 0,
            version: FILTER_VERSION,
            count,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

fn encode<'a>(count: u32, flags: impl Iterator<Item = &'a crate::Cluster>) -> Vec<u8> {
    let mut buf = Vec::with_capacity(FILTER_HEADER_SIZE + count as usize);
    buf.extend_from_slice(FilterHeader::new(count).as_bytes());
    buf.extend(flags.map(|c| c.pass_byte()));
    buf
}

/// Lane-aggregate filter: one buffer per lane.
pub fn lane_filter(lane: &Lane) -> Vec<u8> {
    encode(lane.cluster_count() as u32, lane.clusters())
}

/// Per-tile filter: one buffer per tile.
pub fn tile_filter(tile: &Tile) -> Vec<u8> {
    encode(tile.clusters.len() as u32, tile.clusters.iter())
}
