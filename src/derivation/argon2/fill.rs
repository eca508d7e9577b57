//! Memory organization and the filling loop.
//!
//! Memory is a `lanes × lane_len` matrix of blocks, each lane cut into four
//! slices. Within one slice every lane fills its own segment and only reads
//! blocks of earlier slices (any lane) or earlier blocks of its own
//! segment, so the segments of a slice are independent and are filled in
//! place through disjoint mutable views. Slices are strictly ordered: all
//! segments of slice `k` are finished before any segment of slice `k + 1`
//! starts reading.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::block::{AddressGenerator, Block};
use super::params::{Argon2Params, Argon2Variant};
use super::reference::reference_position;

/// Number of slices per lane.
pub(crate) const SYNC_POINTS: u32 = 4;

/// Order in which segments are computed and made visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Slice by slice, with every lane of a slice finished before the next
    /// slice starts. Lanes of a slice run on the rayon pool when the
    /// `parallel` feature is on.
    #[default]
    SliceBarrier,
    /// Lane by lane with no barrier between slices: a lane sees blocks other
    /// lanes wrote later in the same pass. Does not produce Argon2 output.
    #[doc(hidden)]
    LaneMajor,
}

#[derive(Debug, Clone)]
pub(crate) struct Layout {
    pub lanes: u32,
    pub lane_len: u32,
    pub segment_len: u32,
    pub total_blocks: u32,
    pub passes: u32,
    pub variant: Argon2Variant,
}

impl Layout {
    pub(crate) fn new(params: &Argon2Params) -> Self {
        let total_blocks = params.memory_blocks();
        let lane_len = total_blocks / params.lanes;

        Self {
            lanes: params.lanes,
            lane_len,
            segment_len: lane_len / SYNC_POINTS,
            total_blocks,
            passes: params.time,
            variant: params.variant,
        }
    }

    #[inline]
    pub(crate) fn index(&self, lane: u32, index_in_lane: u32) -> usize {
        lane as usize * self.lane_len as usize + index_in_lane as usize
    }

    /// Runs every pass over `memory`, whose first two blocks per lane are
    /// already initialized. Segments are filled in place.
    pub(crate) fn fill(&self, memory: &mut [Block], schedule: Schedule) {
        for pass in 0..self.passes {
            match schedule {
                Schedule::SliceBarrier => {
                    // Barrier: every lane finishes slice `k` before any
                    // lane starts slice `k + 1`.
                    for slice in 0..SYNC_POINTS {
                        self.fill_slice(memory, pass, slice);
                    }
                }
                Schedule::LaneMajor => {
                    for lane in 0..self.lanes {
                        for slice in 0..SYNC_POINTS {
                            let (view, mut segments) = self.split_slice(memory, slice);
                            let segment = &mut *segments[lane as usize];
                            self.fill_segment(&view, segment, pass, slice, lane);
                        }
                    }
                }
            }
            log::trace!("argon2 pass {} of {} done", pass + 1, self.passes);
        }
    }

    /// Splits `memory` into the segments of `slice` (one per lane, writable)
    /// and a read-only view of every other block.
    fn split_slice<'a>(
        &self,
        memory: &'a mut [Block],
        slice: u32,
    ) -> (SliceView<'a>, Vec<&'a mut [Block]>) {
        let first = (slice * self.segment_len) as usize;
        let lanes = self.lanes as usize;

        let mut view = SliceView {
            before: Vec::with_capacity(lanes),
            after: Vec::with_capacity(lanes),
            first: slice * self.segment_len,
            segment_len: self.segment_len,
        };
        let mut segments = Vec::with_capacity(lanes);

        for lane in memory.chunks_exact_mut(self.lane_len as usize) {
            let (head, rest) = lane.split_at_mut(first);
            let (segment, tail) = rest.split_at_mut(self.segment_len as usize);
            let head: &'a [Block] = head;
            let tail: &'a [Block] = tail;
            view.before.push(head);
            view.after.push(tail);
            segments.push(segment);
        }

        (view, segments)
    }

    #[cfg(feature = "parallel")]
    fn fill_slice(&self, memory: &mut [Block], pass: u32, slice: u32) {
        let (view, segments) = self.split_slice(memory, slice);
        segments
            .into_par_iter()
            .enumerate()
            .for_each(|(lane, segment)| {
                self.fill_segment(&view, segment, pass, slice, lane as u32);
            });
    }

    #[cfg(not(feature = "parallel"))]
    fn fill_slice(&self, memory: &mut [Block], pass: u32, slice: u32) {
        let (view, segments) = self.split_slice(memory, slice);
        for (lane, segment) in segments.into_iter().enumerate() {
            self.fill_segment(&view, segment, pass, slice, lane as u32);
        }
    }

    /// Computes one segment of `lane` in place.
    fn fill_segment(
        &self,
        view: &SliceView<'_>,
        segment: &mut [Block],
        pass: u32,
        slice: u32,
        lane: u32,
    ) {
        let mut addresses = self
            .variant
            .data_independent(pass, slice)
            .then(|| {
                AddressGenerator::new(
                    pass,
                    lane,
                    slice,
                    self.total_blocks,
                    self.passes,
                    self.variant,
                )
            });

        // The first two blocks of each lane come from H0.
        let first = if pass == 0 && slice == 0 { 2 } else { 0 };

        for i in first..self.segment_len {
            let index_in_lane = slice * self.segment_len + i;
            let prev_index = if index_in_lane == 0 {
                self.lane_len - 1
            } else {
                index_in_lane - 1
            };

            let mixed = {
                let own: &[Block] = &*segment;
                let prev = view.resolve(own, lane, lane, prev_index);
                let pseudo = match addresses.as_mut() {
                    Some(generator) => generator.word(i),
                    None => prev.0[0],
                };

                let (ref_lane, ref_index) = reference_position(
                    self,
                    pass,
                    slice,
                    lane,
                    i,
                    pseudo as u32,
                    (pseudo >> 32) as u32,
                );
                Block::compress(prev, view.resolve(own, lane, ref_lane, ref_index))
            };

            let current = &mut segment[i as usize];
            if pass == 0 {
                *current = mixed;
            } else {
                current.in_place_xor(&mixed);
            }
        }
    }
}

/// Every block outside the segments of the slice being filled.
///
/// References never land in another lane's current segment, so these
/// blocks are all a segment can read besides its own.
struct SliceView<'a> {
    before: Vec<&'a [Block]>,
    after: Vec<&'a [Block]>,
    first: u32,
    segment_len: u32,
}

impl<'a> SliceView<'a> {
    fn in_segment(&self, index_in_lane: u32) -> bool {
        (self.first..self.first + self.segment_len).contains(&index_in_lane)
    }

    /// Block `index_in_lane` of `lane` as seen from `own_lane`, whose
    /// segment in progress is `segment`.
    fn resolve<'r>(
        &'r self,
        segment: &'r [Block],
        own_lane: u32,
        lane: u32,
        index_in_lane: u32,
    ) -> &'r Block {
        if lane == own_lane && self.in_segment(index_in_lane) {
            &segment[(index_in_lane - self.first) as usize]
        } else {
            self.block(lane, index_in_lane)
        }
    }

    fn block(&self, lane: u32, index_in_lane: u32) -> &'a Block {
        debug_assert!(!self.in_segment(index_in_lane));
        let lane = lane as usize;
        if index_in_lane < self.first {
            &self.before[lane][index_in_lane as usize]
        } else {
            &self.after[lane][(index_in_lane - self.first - self.segment_len) as usize]
        }
    }
}
