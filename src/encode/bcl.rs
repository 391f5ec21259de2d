//! Base-call (BCL) buffers.
//!
//! Both layout families share the same shape: a 4-byte little-endian
//! cluster count followed by one packed base-call byte per cluster. The
//! lane-flattened variant covers every cluster in a lane in the fixed
//! nested traversal order; the per-tile variant covers one tile only.
//! Cluster bytes are drawn once at tree construction, so every cycle of a
//! run emits identical payloads.

use crate::{Lane, Tile};

/// Lane-flattened BCL: one buffer per sequencing cycle per lane.
pub fn lane_cycle(lane: &Lane) -> Vec<u8> {
    let count = lane.cluster_count() as u32;
    let mut buf = Vec::with_capacity(4 + count as usize);
    buf.extend_from_slice(&count.to_le_bytes());
    buf.extend(lane.clusters().map(|c| c.call));
    buf
}

/// Per-tile BCL: one buffer per cycle per tile.
pub fn tile_cycle(tile: &Tile) -> Vec<u8> {
    let count = tile.clusters.len() as u32;
    let mut buf = Vec::with_capacity(4 + tile.clusters.len());
    buf.extend_from_slice(&count.to_le_bytes());
    buf.extend(tile.clusters.iter().map(|c| c.call));
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::Sampler;

    fn build_lane(clusters: u32) -> Lane {
        let config = RunConfig {
            sections: 2,
            swaths: 1,
            surfaces: 2,
            tiles: 3,
            clusters,
            ..RunConfig::default()
        };
        Lane::build(0, &config, &mut Sampler::new(Some(5)))
    }

    #[test]
    fn test_lane_cycle_count_prefix() {
        let lane = build_lane(10);
        let buf = lane_cycle(&lane);

        let expected = 2 * 1 * 2 * 3 * 10u32;
        assert_eq!(u32::from_le_bytes(buf[0..4].try_into().unwrap()), expected);
        assert_eq!(buf.len(), 4 + expected as usize);
    }

    #[test]
    fn test_lane_cycle_bytes_follow_traversal_order() {
        let lane = build_lane(4);
        let buf = lane_cycle(&lane);

        let expected: Vec<u8> = lane.clusters().map(|c| c.call).collect();
        assert_eq!(&buf[4..], &expected[..]);
    }

    #[test]
    fn test_tile_cycle_scoped_to_one_tile() {
        let lane = build_lane(7);
        let tile = lane.tiles().next().unwrap().tile;
        let buf = tile_cycle(tile);

        assert_eq!(u32::from_le_bytes(buf[0..4].try_into().unwrap()), 7);
        assert_eq!(buf.len(), 4 + 7);
        let expected: Vec<u8> = tile.clusters.iter().map(|c| c.call).collect();
        assert_eq!(&buf[4..], &expected[..]);
    }
}
