//! Base-call index (BCI) buffers.
//!
//! Produced only by the lane-flattened platform family: one buffer per
//! lane holding, per tile in traversal order, the numeric tile code and
//! the constant per-tile cluster count, both 4-byte little-endian. The
//! index carries no base-call data; it maps tiles into the separately
//! stored lane-flattened base-call files.

use crate::addressing;
use crate::Lane;

pub fn lane_index(lane: &Lane, clusters_per_tile: u32) -> Vec<u8> {
    let tiles = lane.tiles().count();
    let mut buf = Vec::with_capacity(tiles * 8);
    for t in lane.tiles() {
        buf.extend_from_slice(&addressing::tile_code(lane.idx, &t).to_le_bytes());
        buf.extend_from_slice(&clusters_per_tile.to_le_bytes());
    }
    buf
}
