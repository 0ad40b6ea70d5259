use std::collections::BTreeMap;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use loom_tiles::{AdjacencyMatrix, TileKind};

use crate::entropy::{EntropySelector, SelectionStrategy};
use crate::grid::{TileGrid, WaveGrid};
use crate::propagator::Propagator;

/// Default grid width of the reference layout.
pub const DEFAULT_WIDTH: usize = 50;
/// Default grid height of the reference layout.
pub const DEFAULT_HEIGHT: usize = 50;

/// Errors raised while constructing a solver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Both dimensions must be at least one cell.
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    EmptyGrid {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
}

/// Snapshot handed to the progress callback once per collapse.
#[derive(Debug, Clone, Copy)]
pub struct ProgressInfo {
    /// Main-loop iterations completed, counting this one.
    pub iteration: u64,
    /// The cell that was collapsed.
    pub coords: (usize, usize),
    /// Its entropy at selection time; zero marks a contradiction fallback.
    pub entropy: usize,
    /// Cells resolved so far, including pre-constraint seeds.
    pub collapsed_cells: usize,
    /// Total cells in the grid.
    pub total_cells: usize,
}

/// Callback invoked after every collapse during `generate`.
pub type ProgressCallback = Box<dyn Fn(&ProgressInfo) + Send + Sync>;

/// Configuration for one generation pass.
///
/// Built via [`GenerationConfig::builder`]; the defaults reproduce the
/// reference behavior (random tie-break, entropy-seeded RNG, iteration
/// safeguard at ten times the cell count).
pub struct GenerationConfig {
    pub seed: Option<u64>,
    pub strategy: SelectionStrategy,
    pub max_iterations: Option<u64>,
    pub progress_callback: Option<ProgressCallback>,
}

impl GenerationConfig {
    /// Creates a new builder for `GenerationConfig`.
    #[must_use]
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            strategy: SelectionStrategy::default(),
            max_iterations: None,
            progress_callback: None,
        }
    }
}

/// Builder for `GenerationConfig`.
#[derive(Default)]
pub struct GenerationConfigBuilder {
    seed: Option<u64>,
    strategy: SelectionStrategy,
    max_iterations: Option<u64>,
    progress_callback: Option<ProgressCallback>,
}

impl GenerationConfigBuilder {
    /// Seeds the random number generator for reproducible output.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the tie-breaking strategy for cell selection.
    #[must_use]
    pub fn strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Caps main-loop iterations. Exceeding the cap degrades to the gap-fill
    /// pass instead of erroring.
    #[must_use]
    pub fn max_iterations(mut self, max: u64) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Sets the per-collapse progress callback.
    #[must_use]
    pub fn progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Builds the `GenerationConfig`.
    #[must_use]
    pub fn build(self) -> GenerationConfig {
        GenerationConfig {
            seed: self.seed,
            strategy: self.strategy,
            max_iterations: self.max_iterations,
            progress_callback: self.progress_callback,
        }
    }
}

/// The layout solver: owns the grid, the wave, and the pre-constraint
/// overlay.
///
/// One instance supports one generation at a time; `generate` takes
/// `&mut self` and runs to completion, so interleaved generations against a
/// shared instance are ruled out at compile time. Sharing an instance across
/// threads requires an external mutex; there is no internal
/// synchronization.
#[derive(Debug)]
pub struct LayoutSolver {
    width: usize,
    height: usize,
    tiles: TileGrid,
    wave: WaveGrid,
    /// Sparse forced-tile overlay. A `BTreeMap` keeps application order
    /// deterministic so a fixed seed reproduces the exact same grid.
    pre_constraints: BTreeMap<(usize, usize), TileKind>,
    propagator: Propagator,
    resolved: bool,
}

impl LayoutSolver {
    /// Creates a solver with every cell at full superposition.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::EmptyGrid`] when either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, SolverError> {
        if width == 0 || height == 0 {
            return Err(SolverError::EmptyGrid { width, height });
        }
        Ok(Self {
            width,
            height,
            tiles: TileGrid::new(width, height),
            wave: WaveGrid::full_superposition(width, height),
            pre_constraints: BTreeMap::new(),
            propagator: Propagator::new(AdjacencyMatrix::from_edges()),
            resolved: false,
        })
    }

    /// Creates a solver at the reference 50x50 size.
    ///
    /// # Errors
    ///
    /// Never fails in practice; shares `new`'s signature for uniformity.
    pub fn with_default_size() -> Result<Self, SolverError> {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether the last `generate` call has run (and therefore every cell
    /// holds a tile).
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Resets the grid to all-unresolved and the wave to full superposition.
    ///
    /// The pre-constraint overlay is left untouched; it has its own clear.
    pub fn clear_layout(&mut self) {
        self.tiles = TileGrid::new(self.width, self.height);
        self.wave = WaveGrid::full_superposition(self.width, self.height);
        self.resolved = false;
    }

    /// Records a forced tile at `(x, y)`, applied at the start of the next
    /// `generate` call. Overlapping writes to one cell: last write wins.
    ///
    /// Returns `false` (and records nothing) when the position is out of
    /// bounds.
    pub fn set_pre_constraint(&mut self, x: usize, y: usize, kind: TileKind) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pre_constraints.insert((x, y), kind);
        true
    }

    /// Integer-surface variant of [`set_pre_constraint`]; also rejects
    /// encodings outside `0..=10`.
    ///
    /// [`set_pre_constraint`]: Self::set_pre_constraint
    pub fn set_pre_constraint_index(&mut self, x: usize, y: usize, kind: i32) -> bool {
        TileKind::from_index(kind)
            .is_some_and(|kind| self.set_pre_constraint(x, y, kind))
    }

    /// Drops the whole overlay. Grid and wave state are untouched.
    pub fn clear_pre_constraints(&mut self) {
        self.pre_constraints.clear();
    }

    /// The resolved tile at `(x, y)`; `None` out of bounds or before the
    /// cell has collapsed.
    #[must_use]
    pub fn tile_at(&self, x: usize, y: usize) -> Option<TileKind> {
        self.tiles.get(x, y).copied().flatten()
    }

    /// Integer surface: the encoded tile at `(x, y)`, or `-1` for
    /// out-of-bounds or unresolved cells.
    #[must_use]
    pub fn tile_index_at(&self, x: usize, y: usize) -> i32 {
        self.tile_at(x, y)
            .map_or(-1, |kind| kind.index() as i32)
    }

    /// Candidate count for a cell; `None` out of bounds. Before generation
    /// every cell reports the full 11.
    #[must_use]
    pub fn entropy_at(&self, x: usize, y: usize) -> Option<usize> {
        self.wave.entropy(x, y)
    }

    /// Runs the full collapse: re-initialize, seed pre-constraints, iterate
    /// entropy-ordered collapse + propagation, gap-fill.
    ///
    /// Total: always terminates and leaves every cell resolved. Internal
    /// contradictions are absorbed by forcing the cell to `Floor`; nothing
    /// is reported to the caller.
    pub fn generate(&mut self, config: &GenerationConfig) {
        let mut rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        self.clear_layout();
        let seeded = self.apply_pre_constraints();

        let selector = EntropySelector::new(config.strategy);
        let total_cells = self.width * self.height;
        let mut collapsed_cells = seeded;
        let mut iterations: u64 = 0;
        let iteration_limit = config
            .max_iterations
            .unwrap_or_else(|| (total_cells as u64).saturating_mul(10));

        info!(
            "generating {}x{} layout: {} pre-constraint seeds, {:?} tie-break",
            self.width, self.height, seeded, config.strategy
        );

        while let Some(sel) = selector.select(&self.wave, &self.tiles, &mut rng) {
            iterations += 1;

            #[cfg(debug_assertions)]
            self.assert_minimum_entropy_selection(&sel);

            if sel.entropy == 0 {
                // Contradiction: force Floor and move on. The forced tile
                // is deliberately not re-propagated; later collapses
                // re-filter their own neighborhoods.
                debug!(
                    "contradiction at ({}, {}), forcing floor",
                    sel.x, sel.y
                );
                if let Some(cell) = self.tiles.get_mut(sel.x, sel.y) {
                    *cell = Some(TileKind::Floor);
                }
                self.wave.collapse_cell(sel.x, sel.y, TileKind::Floor);
            } else {
                let candidates: Vec<TileKind> = self.wave.candidates(sel.x, sel.y).collect();
                let Some(&kind) = candidates.choose(&mut rng) else {
                    continue; // Entropy > 0 guarantees candidates.
                };
                if let Some(cell) = self.tiles.get_mut(sel.x, sel.y) {
                    *cell = Some(kind);
                }
                self.wave.collapse_cell(sel.x, sel.y, kind);
                self.propagator
                    .propagate(&mut self.wave, &self.tiles, [(sel.x, sel.y)]);
            }

            collapsed_cells += 1;
            if let Some(callback) = &config.progress_callback {
                callback(&ProgressInfo {
                    iteration: iterations,
                    coords: (sel.x, sel.y),
                    entropy: sel.entropy,
                    collapsed_cells,
                    total_cells,
                });
            }

            if iterations >= iteration_limit {
                // Safeguard against selection bugs. Generation must stay
                // total, so the remainder is handed to the gap-fill pass.
                warn!(
                    "iteration safeguard hit after {iterations} iterations; gap-filling the rest"
                );
                break;
            }
        }

        let filled = self.fill_gaps();
        if filled > 0 {
            warn!("gap-fill pass forced {filled} unresolved cells to floor");
        }
        self.resolved = true;
        info!("layout resolved after {iterations} iterations");
    }

    /// Applies the overlay: collapses each forced cell and propagates it as
    /// a seed the rest of the grid must respect. Returns the seed count.
    fn apply_pre_constraints(&mut self) -> usize {
        // BTreeMap iteration is ordered, so a fixed seed sees the seeds in a
        // fixed sequence regardless of insertion history.
        let seeds: Vec<((usize, usize), TileKind)> = self
            .pre_constraints
            .iter()
            .map(|(&pos, &kind)| (pos, kind))
            .collect();
        for &((x, y), kind) in &seeds {
            if let Some(cell) = self.tiles.get_mut(x, y) {
                *cell = Some(kind);
            }
            self.wave.collapse_cell(x, y, kind);
            self.propagator.propagate(&mut self.wave, &self.tiles, [(x, y)]);
        }
        seeds.len()
    }

    /// Forces any still-unresolved cell to `Floor`. Normally a no-op; guards
    /// the totality postcondition against selection or boundary bugs.
    fn fill_gaps(&mut self) -> usize {
        let mut filled = 0;
        for (x, y) in self.tiles.coords().collect::<Vec<_>>() {
            if self.tile_at(x, y).is_none() {
                if let Some(cell) = self.tiles.get_mut(x, y) {
                    *cell = Some(TileKind::Floor);
                }
                self.wave.collapse_cell(x, y, TileKind::Floor);
                filled += 1;
            }
        }
        filled
    }

    /// Test instrumentation: the selected cell's entropy must equal the
    /// global minimum over uncollapsed cells.
    #[cfg(debug_assertions)]
    fn assert_minimum_entropy_selection(&self, sel: &crate::entropy::Selection) {
        let brute_min = self
            .tiles
            .coords()
            .filter(|&(x, y)| self.tile_at(x, y).is_none())
            .filter_map(|(x, y)| self.wave.entropy(x, y))
            .min();
        debug_assert_eq!(
            Some(sel.entropy),
            brute_min,
            "selected ({}, {}) at entropy {} but the global minimum differs",
            sel.x,
            sel.y,
            sel.entropy
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            LayoutSolver::new(0, 5),
            Err(SolverError::EmptyGrid {
                width: 0,
                height: 5
            })
        ));
        assert!(matches!(
            LayoutSolver::new(5, 0),
            Err(SolverError::EmptyGrid { .. })
        ));
        assert!(LayoutSolver::new(1, 1).is_ok());
    }

    #[test]
    fn overlay_is_last_write_wins() {
        let mut solver = LayoutSolver::new(4, 4).unwrap();
        assert!(solver.set_pre_constraint(1, 1, TileKind::Grass));
        assert!(solver.set_pre_constraint(1, 1, TileKind::Door));
        solver.generate(&GenerationConfig::builder().seed(1).build());
        assert_eq!(solver.tile_at(1, 1), Some(TileKind::Door));

        // And the reverse order.
        solver.clear_pre_constraints();
        assert!(solver.set_pre_constraint(1, 1, TileKind::Door));
        assert!(solver.set_pre_constraint(1, 1, TileKind::Grass));
        solver.generate(&GenerationConfig::builder().seed(1).build());
        assert_eq!(solver.tile_at(1, 1), Some(TileKind::Grass));
    }

    #[test]
    fn bounds_violations_are_reported_not_thrown() {
        let mut solver = LayoutSolver::new(3, 3).unwrap();
        assert!(!solver.set_pre_constraint(3, 0, TileKind::Floor));
        assert!(!solver.set_pre_constraint(0, 3, TileKind::Floor));
        assert!(!solver.set_pre_constraint_index(0, 0, 11));
        assert!(!solver.set_pre_constraint_index(0, 0, -1));
        assert!(solver.set_pre_constraint_index(0, 0, 10));
        assert_eq!(solver.tile_index_at(5, 5), -1);
        assert_eq!(solver.tile_at(5, 5), None);
    }

    #[test]
    fn clear_layout_restores_full_superposition() {
        let mut solver = LayoutSolver::new(6, 6).unwrap();
        solver.generate(&GenerationConfig::builder().seed(3).build());
        assert!(solver.is_resolved());
        solver.clear_layout();
        assert!(!solver.is_resolved());
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(solver.tile_at(x, y), None);
                assert_eq!(solver.entropy_at(x, y), Some(loom_tiles::TILE_KIND_COUNT));
            }
        }
    }

    #[test]
    fn unresolved_cells_read_as_sentinel() {
        let solver = LayoutSolver::new(2, 2).unwrap();
        assert_eq!(solver.tile_index_at(0, 0), -1);
        assert_eq!(solver.tile_at(0, 0), None);
    }
}
