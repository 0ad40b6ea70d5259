//! Tile and edge model for the layout generator.
//!
//! Defines the closed set of tile kinds, the compile-time edge table and its
//! compatibility predicate, the precomputed adjacency matrix the solver
//! propagates against, and the staging pass that turns high-level layout
//! hints into concrete pre-constraints.

/// Precomputed tile adjacency relation.
pub mod adjacency;
/// Layout-hint record supplied by external producers.
pub mod hints;
/// Voronoi grass and floor-seed staging.
pub mod staging;
/// Tile kinds, edge kinds and the compatibility table.
pub mod tile;

pub use crate::adjacency::AdjacencyMatrix;
pub use crate::hints::{HintsError, LayoutHints};
pub use crate::staging::{scatter_grass, stage_layout};
pub use crate::tile::{Direction, EdgeKind, TileKind, TILE_KIND_COUNT};
