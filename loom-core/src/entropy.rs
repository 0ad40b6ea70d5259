use rand::seq::SliceRandom;
use rand::RngCore;

use crate::grid::{TileGrid, WaveGrid};

/// How to break ties between cells sharing the minimum entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionStrategy {
    /// Pick uniformly at random among the tied cells. Deterministic
    /// left-to-right tie-breaking produces visibly axis-biased layouts, so
    /// this is the default.
    #[default]
    RandomLowest,
    /// Pick the first tied cell in scan order. Useful for deterministic unit
    /// tests; not suitable for real generation.
    FirstMinimum,
}

/// A cell chosen for collapse, with the entropy it was selected at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub x: usize,
    pub y: usize,
    /// Candidate count at selection time. Zero marks a contradiction.
    pub entropy: usize,
}

/// Scans the wave for the next cell to collapse.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropySelector {
    strategy: SelectionStrategy,
}

impl EntropySelector {
    #[must_use]
    pub const fn new(strategy: SelectionStrategy) -> Self {
        Self { strategy }
    }

    /// Selects the uncollapsed cell with the globally minimum entropy.
    ///
    /// Cells with an emptied candidate set count as entropy zero and
    /// therefore sort first; the solver resolves them through its
    /// contradiction fallback. Returns `None` once every cell has collapsed.
    pub fn select(
        &self,
        wave: &WaveGrid,
        tiles: &TileGrid,
        rng: &mut dyn RngCore,
    ) -> Option<Selection> {
        let mut min_entropy = usize::MAX;
        let mut tied: Vec<(usize, usize)> = Vec::new();

        for (x, y) in tiles.coords() {
            if tiles.get(x, y).is_some_and(Option::is_some) {
                continue; // Already collapsed.
            }
            let entropy = wave.entropy(x, y).unwrap_or(usize::MAX);
            if entropy < min_entropy {
                min_entropy = entropy;
                tied.clear();
                tied.push((x, y));
            } else if entropy == min_entropy {
                tied.push((x, y));
            }
        }

        let &(x, y) = match self.strategy {
            SelectionStrategy::RandomLowest => tied.choose(rng)?,
            SelectionStrategy::FirstMinimum => tied.first()?,
        };
        Some(Selection {
            x,
            y,
            entropy: min_entropy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loom_tiles::TileKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(width: usize, height: usize) -> (WaveGrid, TileGrid) {
        (
            WaveGrid::full_superposition(width, height),
            TileGrid::new(width, height),
        )
    }

    #[test]
    fn first_minimum_picks_scan_order() {
        let (mut wave, tiles) = setup(3, 3);
        wave.collapse_cell(2, 0, TileKind::Floor); // entropy 1, but not collapsed in tiles
        wave.collapse_cell(0, 2, TileKind::Grass);
        let selector = EntropySelector::new(SelectionStrategy::FirstMinimum);
        let mut rng = StdRng::seed_from_u64(0);
        let sel = selector.select(&wave, &tiles, &mut rng).unwrap();
        assert_eq!((sel.x, sel.y, sel.entropy), (2, 0, 1));
    }

    #[test]
    fn random_lowest_reaches_every_tied_cell() {
        let (mut wave, tiles) = setup(3, 1);
        wave.collapse_cell(0, 0, TileKind::Floor);
        wave.collapse_cell(2, 0, TileKind::Grass);
        let selector = EntropySelector::new(SelectionStrategy::RandomLowest);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 2];
        for _ in 0..200 {
            let sel = selector.select(&wave, &tiles, &mut rng).unwrap();
            assert_eq!(sel.entropy, 1);
            match (sel.x, sel.y) {
                (0, 0) => seen[0] = true,
                (2, 0) => seen[1] = true,
                other => panic!("selected non-minimum cell {other:?}"),
            }
        }
        assert!(seen[0] && seen[1], "tie-break never reached one of the cells");
    }

    #[test]
    fn collapsed_cells_are_skipped() {
        let (wave, mut tiles) = setup(2, 1);
        *tiles.get_mut(0, 0).unwrap() = Some(TileKind::Grass);
        let selector = EntropySelector::default();
        let mut rng = StdRng::seed_from_u64(1);
        let sel = selector.select(&wave, &tiles, &mut rng).unwrap();
        assert_eq!((sel.x, sel.y), (1, 0));
        *tiles.get_mut(1, 0).unwrap() = Some(TileKind::Grass);
        assert!(selector.select(&wave, &tiles, &mut rng).is_none());
    }

    #[test]
    fn contradictions_sort_first() {
        let (mut wave, tiles) = setup(2, 2);
        wave.get_mut(1, 1).unwrap().fill(false); // emptied by propagation
        let selector = EntropySelector::default();
        let mut rng = StdRng::seed_from_u64(5);
        let sel = selector.select(&wave, &tiles, &mut rng).unwrap();
        assert_eq!((sel.x, sel.y, sel.entropy), (1, 1, 0));
    }
}
