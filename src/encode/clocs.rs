//! Binned compact location (CLOCS) buffers.
//!
//! Layout: 1-byte version (1), 4-byte little-endian bin count, then per
//! bin a 1-byte cluster count followed by that many (x-offset, y-offset)
//! byte pairs. Bins tile the image in 25-pixel x strips across five y
//! bands; clusters are spread as evenly as possible, each bin capped by
//! the remaining total (and by the one-byte count field).

use crate::{config::ImageDims, Sampler};

pub const CLOCS_VERSION: u8 = 1;
/// Width of one x bin, in pixels.
pub const BIN_SIZE: u32 = 25;
const Y_BINS: u32 = 5;

/// Number of bins for a given image width.
pub fn bin_count(dims: ImageDims) -> u32 {
    dims.width.div_ceil(BIN_SIZE) * Y_BINS
}

/// Per-tile CLOCS: one buffer per tile.
pub fn tile_clocs(clusters: u32, dims: ImageDims, sampler: &mut Sampler) -> Vec<u8> {
    let num_bins = bin_count(dims);
    let per_bin = clusters.div_ceil(num_bins).min(u32::from(u8::MAX));
    let mut remaining = clusters;

    let mut buf = Vec::with_capacity(5 + num_bins as usize + 2 * clusters as usize);
    buf.push(CLOCS_VERSION);
    buf.extend_from_slice(&num_bins.to_le_bytes());
    for _ in 0..num_bins {
        let cl = per_bin.min(remaining);
        buf.push(cl as u8);
        remaining -= cl;
        for _ in 0..cl {
            buf.push(sampler.bin_offset());
            buf.push(sampler.bin_offset());
        }
    }
    buf
}
