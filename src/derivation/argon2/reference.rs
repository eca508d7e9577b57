//! Reference block selection (RFC 9106 §3.4.1.2).
//!
//! The reference lane comes from J2. Within that lane the candidate area
//! covers every block already finished and visible from the current
//! position, and J1 picks one with the phi mapping, which biases the
//! choice toward recently written blocks.

use super::fill::Layout;

/// Maps `(j1, j2)` to `(reference_lane, reference_index_in_lane)` for the
/// block at `index_in_segment` of the given segment.
pub(crate) fn reference_position(
    layout: &Layout,
    pass: u32,
    slice: u32,
    lane: u32,
    index_in_segment: u32,
    j1: u32,
    j2: u32,
) -> (u32, u32) {
    let segment_len = layout.segment_len;
    let lane_len = layout.lane_len;

    // No cross-lane references before the first slice is finished.
    let ref_lane = if pass == 0 && slice == 0 {
        lane
    } else {
        j2 % layout.lanes
    };
    let same_lane = ref_lane == lane;

    // Blocks of finished segments, plus the blocks of this segment before
    // the current one when staying in the same lane. A block in another
    // lane may not reference that lane's last finished block at index 0.
    let finished = if pass == 0 {
        slice * segment_len
    } else {
        lane_len - segment_len
    };
    let area = if same_lane {
        finished + index_in_segment - 1
    } else if index_in_segment == 0 {
        finished - 1
    } else {
        finished
    };

    let j1 = j1 as u64;
    let x = (j1 * j1) >> 32;
    let y = (area as u64 * x) >> 32;
    let relative = area as u64 - 1 - y;

    let start = if pass == 0 || slice == 3 {
        0
    } else {
        (slice + 1) * segment_len
    };

    (ref_lane, ((start as u64 + relative) % lane_len as u64) as u32)
}
