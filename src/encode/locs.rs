//! Floating-point cluster location (LOCS) buffers.
//!
//! Shared header: 4-byte version (1), 4-byte float constant (1.0), 4-byte
//! cluster count, little-endian; body: one (x, y) pair of little-endian
//! 32-bit floats per cluster. Three variants share it:
//!
//! - lane-aggregate: every cluster of a lane, x in [0, width), y in
//!   [0, height);
//! - run-wide well grid: a single buffer for the whole run, the cross
//!   product of a sorted x-pool and a sorted y-pool;
//! - per-tile: one tile's clusters, both axes drawn from [0, width).

use bytemuck::{Pod, Zeroable};

use crate::{config::ImageDims, Lane, Sampler};

pub const LOCS_VERSION: u32 = 1;
pub const LOCS_SCALE: f32 = 1.0;
pub const LOCS_HEADER_SIZE: usize = std::mem::size_of::<LocsHeader>();

/// 12-byte locs file header.
#[derive(Copy, Clone, Pod, Zeroable, Debug, PartialEq)]
#[repr(C)]
pub struct LocsHeader {
    pub version: u32,
    pub scale: f32,
    pub count: u32,
}

impl LocsHeader {
    pub fn new(count: u32) -> Self {
        Self {
            version: LOCS_VERSION,
            scale: LOCS_SCALE,
            count,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

fn push_pair(buf: &mut Vec<u8>, x: f32, y: f32) {
    buf.extend_from_slice(&x.to_le_bytes());
    buf.extend_from_slice(&y.to_le_bytes());
}

/// Lane-aggregate locs: one buffer per lane, clusters in traversal order.
pub fn lane_locs(lane: &Lane, dims: ImageDims, sampler: &mut Sampler) -> Vec<u8> {
    let count = lane.cluster_count() as u32;
    let mut buf = Vec::with_capacity(LOCS_HEADER_SIZE + count as usize * 8);
    buf.extend_from_slice(LocsHeader::new(count).as_bytes());
    for _ in 0..count {
        let x = sampler.coord(dims.width as f32);
        let y = sampler.coord(dims.height as f32);
        push_pair(&mut buf, x, y);
    }
    buf
}

/// Run-wide shared-well grid: a single buffer for the entire run.
///
/// Clusters sit on a fixed grid of wells repeated on every tile, so the
/// body is the cross product of ⌊n/3⌋ sorted x coordinates and ⌊2n/3⌋
/// sorted y coordinates. The count field still reports the configured
/// per-tile cluster total, which differs from the emitted pair count by
/// construction; both are preserved as-is.
pub fn well_grid(clusters: u32, dims: ImageDims, sampler: &mut Sampler) -> Vec<u8> {
    let mut x_pool: Vec<f32> = (0..clusters / 3)
        .map(|_| sampler.coord(dims.width as f32))
        .collect();
    x_pool.sort_by(f32::total_cmp);
    let mut y_pool: Vec<f32> = (0..2 * clusters / 3)
        .map(|_| sampler.coord(dims.height as f32))
        .collect();
    y_pool.sort_by(f32::total_cmp);

    let pairs = x_pool.len() * y_pool.len();
    let mut buf = Vec::with_capacity(LOCS_HEADER_SIZE + pairs * 8);
    buf.extend_from_slice(LocsHeader::new(clusters).as_bytes());
    for &x in &x_pool {
        for &y in &y_pool {
            push_pair(&mut buf, x, y);
        }
    }
    buf
}

/// Per-tile locs: one buffer per tile.
///
/// Both axes are drawn from the image-width range; the source behavior is
/// preserved rather than corrected to use the height for y.
pub fn tile_locs(clusters: u32, dims: ImageDims, sampler: &mut Sampler) -> Vec<u8> {
    let mut buf = Vec::with_capacity(LOCS_HEADER_SIZE + clusters as usize * 8);
    buf.extend_from_slice(LocsHeader::new(clusters).as_bytes());
    for _ in 0..clusters {
        let x = sampler.coord(dims.width as f32);
        let y = sampler.coord(dims.width as f32);
        push_pair(&mut buf, x, y);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;

    const DIMS: ImageDims = ImageDims {
        width: 100,
        height: 200,
    };

    fn read_f32(buf: &[u8], at: usize) -> f32 {
        f32::from_le_bytes(buf[at..at + 4].try_into().unwrap())
    }

    fn pairs(buf: &[u8]) -> impl Iterator<Item = (f32, f32)> + '_ {
        buf[LOCS_HEADER_SIZE..]
            .chunks_exact(8)
            .map(|p| (read_f32(p, 0), read_f32(p, 4)))
    }

    #[test]
    fn test_header_layout() {
        let bytes = LocsHeader::new(10).as_bytes().to_vec();

        assert_eq!(bytes.len(), 12);
        assert_eq!(u32::from_le_bytes(bytes[0..4].try_into().unwrap()), 1);
        assert_eq!(read_f32(&bytes, 4), 1.0);
        assert_eq!(u32::from_le_bytes(bytes[8..12].try_into().unwrap()), 10);
    }

    #[test]
    fn test_lane_locs_ranges_and_size() {
        let config = RunConfig {
            sections: 1,
            swaths: 1,
            surfaces: 2,
            tiles: 2,
            clusters: 30,
            dims: DIMS,
            ..RunConfig::default()
        };
        let lane = Lane::build(0, &config, &mut Sampler::new(Some(21)));
        let buf = lane_locs(&lane, DIMS, &mut Sampler::new(Some(22)));

        let count = u32::from_le_bytes(buf[8..12].try_into().unwrap());
        assert_eq!(count, 120);
        assert_eq!(buf.len(), LOCS_HEADER_SIZE + count as usize * 8);
        for (x, y) in pairs(&buf) {
            assert!((0.0..100.0).contains(&x));
            assert!((0.0..200.0).contains(&y));
        }
    }

    #[test]
    fn test_well_grid_cross_product() {
        let buf = well_grid(20, DIMS, &mut Sampler::new(Some(23)));

        // Count field reports the configured total, not the pair count.
        let count = u32::from_le_bytes(buf[8..12].try_into().unwrap());
        assert_eq!(count, 20);
        let expected_pairs = (20 / 3) * (2 * 20 / 3);
        assert_eq!(buf.len(), LOCS_HEADER_SIZE + expected_pairs * 8);

        // x-major emission over two sorted pools: x values ascend in
        // blocks, and every block repeats the same ascending y sequence.
        let all: Vec<_> = pairs(&buf).collect();
        let y_len = 2 * 20 / 3;
        let first_ys: Vec<f32> = all[..y_len].iter().map(|&(_, y)| y).collect();
        assert!(first_ys.windows(2).all(|w| w[0] <= w[1]));
        for block in all.chunks_exact(y_len) {
            assert!(block.windows(2).all(|w| w[0].0 == w[1].0));
            let ys: Vec<f32> = block.iter().map(|&(_, y)| y).collect();
            assert_eq!(ys, first_ys);
        }
        let xs: Vec<f32> = all.chunks_exact(y_len).map(|b| b[0].0).collect();
        assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_tile_locs_draws_both_axes_from_width() {
        let dims = ImageDims {
            width: 50,
            height: 100_000,
        };
        let buf = tile_locs(500, dims, &mut Sampler::new(Some(24)));

        assert_eq!(buf.len(), LOCS_HEADER_SIZE + 500 * 8);
        for (x, y) in pairs(&buf) {
            assert!((0.0..50.0).contains(&x));
            assert!((0.0..50.0).contains(&y));
        }
    }
}
