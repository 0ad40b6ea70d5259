use std::collections::VecDeque;

use bitvec::prelude::*;
use log::trace;
use loom_tiles::{AdjacencyMatrix, Direction, TileKind, TILE_KIND_COUNT};

use crate::grid::{TileGrid, WaveGrid};

/// Worklist constraint propagator.
///
/// Runs the arc-consistency sweep after a collapse: every candidate removed
/// from a neighbor re-queues that neighbor, until no cell changes. A queue is
/// used instead of recursion so stack depth stays flat on large grids.
///
/// Propagation never fails. A neighbor whose candidate set empties is left
/// empty; the selection loop picks it up at entropy zero and resolves it
/// through the solver's contradiction fallback.
#[derive(Debug, Clone)]
pub struct Propagator {
    adjacency: AdjacencyMatrix,
}

impl Propagator {
    #[must_use]
    pub fn new(adjacency: AdjacencyMatrix) -> Self {
        Self { adjacency }
    }

    /// Propagates constraints outward from `seeds` until fixpoint.
    ///
    /// Returns the total number of candidates removed, which is zero when
    /// the seeds were already consistent with their surroundings.
    pub fn propagate(
        &self,
        wave: &mut WaveGrid,
        tiles: &TileGrid,
        seeds: impl IntoIterator<Item = (usize, usize)>,
    ) -> usize {
        let mut queue: VecDeque<(usize, usize)> = seeds.into_iter().collect();
        let mut removed_total = 0;

        while let Some((x, y)) = queue.pop_front() {
            // Candidates surviving in the cell we propagate FROM. Cloned so
            // the neighbor cells can be borrowed mutably below.
            let Some(source) = wave.get(x, y).cloned() else {
                continue;
            };

            for dir in Direction::ALL {
                let (dx, dy) = dir.offset();
                let Some(nx) = x.checked_add_signed(dx) else {
                    continue;
                };
                let Some(ny) = y.checked_add_signed(dy) else {
                    continue;
                };
                if !matches!(tiles.get(nx, ny), Some(None)) {
                    continue; // Out of bounds, or already collapsed.
                }

                // Union of neighbor kinds supported by any surviving source
                // candidate.
                let mut supported: BitArr!(for TILE_KIND_COUNT) = BitArray::ZERO;
                for s in source.iter_ones().filter_map(|i| TileKind::ALL.get(i)) {
                    for t in self.adjacency.allowed_neighbors(*s, dir) {
                        supported.set(t.index(), true);
                    }
                }

                let Some(neighbor) = wave.get_mut(nx, ny) else {
                    continue;
                };
                let mut removed_here = 0;
                for i in 0..TILE_KIND_COUNT {
                    if neighbor[i] && !supported[i] {
                        neighbor.set(i, false);
                        removed_here += 1;
                    }
                }
                if removed_here > 0 {
                    removed_total += removed_here;
                    if neighbor.not_any() {
                        trace!("cell ({nx}, {ny}) emptied during propagation");
                    }
                    queue.push_back((nx, ny));
                }
            }
        }

        removed_total
    }
}
