//! Core library for the constraint-propagation layout generator.
//!
//! Owns the grid, the per-cell candidate sets ("the wave"), and the
//! pre-constraint overlay, and runs the greedy entropy-ordered collapse loop
//! with worklist propagation. Generation is total: it always terminates with
//! every cell resolved, absorbing contradictions through a Floor fallback
//! instead of surfacing them.

/// Entropy computation and minimum-entropy cell selection.
pub mod entropy;
/// Generic 2D grid plus the tile and wave grids.
pub mod grid;
/// Worklist constraint propagation.
pub mod propagator;
/// The solver: state, configuration, and the generation loop.
pub mod solver;

pub use crate::entropy::{EntropySelector, Selection, SelectionStrategy};
pub use crate::grid::{Grid, TileGrid, WaveGrid};
pub use crate::propagator::Propagator;
pub use crate::solver::{
    GenerationConfig, GenerationConfigBuilder, LayoutSolver, ProgressCallback, ProgressInfo,
    SolverError, DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
