//! Canonical tile identifiers for each platform.
//!
//! Indices are 0-based internally and rendered 1-based here. Platforms with
//! camera sections fold a section digit into the identifier; the digit is
//! offset by the camera bank imaging the lane (lanes 0–1 sit under the
//! first bank, lanes 2–3 under the second), so section digits start at 1
//! on the left half of the flow cell and at 4 on the right.

use crate::{config::Platform, TileRef};

/// First section digit for a lane, per the camera bank assignment.
pub fn section_offset(lane_idx: u32) -> u32 {
    if lane_idx < 2 {
        1
    } else {
        4
    }
}

fn section_digit(lane_idx: u32, section_idx: u32) -> u32 {
    section_idx + section_offset(lane_idx)
}

/// Tile identifier as rendered in run metadata.
///
/// Five-digit form (sectioned platforms): `lane_SsWdTT`; four-digit form:
/// `lane_SsTT`. The tile number is always zero-padded to two digits.
pub fn tile_name(platform: Platform, lane_idx: u32, t: &TileRef<'_>) -> String {
    if platform.has_sections() {
        format!(
            "{}_{}{}{}{:02}",
            lane_idx + 1,
            t.surface.idx + 1,
            t.swath.idx + 1,
            section_digit(lane_idx, t.section.idx),
            t.tile.idx + 1
        )
    } else {
        format!(
            "{}_{}{}{:02}",
            lane_idx + 1,
            t.surface.idx + 1,
            t.swath.idx + 1,
            t.tile.idx + 1
        )
    }
}

/// Stem for per-tile output files: `s_<lane>_<surface><swath><tile>`.
///
/// Per-tile files exist only on sectionless platforms, so the section digit
/// never appears here.
pub fn tile_file_stem(lane_idx: u32, t: &TileRef<'_>) -> String {
    format!(
        "s_{}_{}{}{:02}",
        lane_idx + 1,
        t.surface.idx + 1,
        t.swath.idx + 1,
        t.tile.idx + 1
    )
}

/// Numeric tile code for the base-call index: the decimal digits
/// surface ‖ swath ‖ section-digit ‖ tile (two digits) read as one integer.
pub fn tile_code(lane_idx: u32, t: &TileRef<'_>) -> u32 {
    let surface = t.surface.idx + 1;
    let swath = t.swath.idx + 1;
    let section = section_digit(lane_idx, t.section.idx);
    ((surface * 10 + swath) * 10 + section) * 100 + t.tile.idx + 1
}
