use crate::tile::{Direction, TileKind, TILE_KIND_COUNT};

/// Precomputed adjacency relation between tile kinds for the four axes.
///
/// The edge table is queried far more than it changes (it never changes), so
/// the full 4 x 11 x 11 relation is flattened into a boolean vector at
/// construction for O(1), branch-free lookups in the propagation loop.
/// Indexing scheme: `axis * N * N + a.index() * N + b.index()`.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    allowed: Vec<bool>,
}

impl AdjacencyMatrix {
    /// Builds the relation from the compile-time edge table.
    #[must_use]
    pub fn from_edges() -> Self {
        let n = TILE_KIND_COUNT;
        let mut allowed = vec![false; Direction::ALL.len() * n * n];
        for dir in Direction::ALL {
            for a in TileKind::ALL {
                for b in TileKind::ALL {
                    if a.accepts(b, dir) {
                        allowed[Self::flat_index(a, b, dir)] = true;
                    }
                }
            }
        }
        Self { allowed }
    }

    #[inline]
    const fn flat_index(a: TileKind, b: TileKind, dir: Direction) -> usize {
        dir.axis() * TILE_KIND_COUNT * TILE_KIND_COUNT + a.index() * TILE_KIND_COUNT + b.index()
    }

    /// Whether `b` may sit on the `dir` side of `a`.
    #[inline]
    #[must_use]
    pub fn allows(&self, a: TileKind, b: TileKind, dir: Direction) -> bool {
        self.allowed[Self::flat_index(a, b, dir)]
    }

    /// Iterates the kinds allowed on the `dir` side of `a`.
    pub fn allowed_neighbors(
        &self,
        a: TileKind,
        dir: Direction,
    ) -> impl Iterator<Item = TileKind> + '_ {
        TileKind::ALL
            .into_iter()
            .filter(move |&b| self.allows(a, b, dir))
    }
}

impl Default for AdjacencyMatrix {
    fn default() -> Self {
        Self::from_edges()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_edge_table_exhaustively() {
        let matrix = AdjacencyMatrix::from_edges();
        for dir in Direction::ALL {
            for a in TileKind::ALL {
                for b in TileKind::ALL {
                    assert_eq!(
                        matrix.allows(a, b, dir),
                        a.accepts(b, dir),
                        "matrix disagrees with edge table for {a} -> {b} ({dir:?})"
                    );
                }
            }
        }
    }

    #[test]
    fn every_kind_has_a_neighbor_on_every_side() {
        // No kind is a dead end; the solver relies on this to stay total.
        let matrix = AdjacencyMatrix::from_edges();
        for a in TileKind::ALL {
            for dir in Direction::ALL {
                assert!(
                    matrix.allowed_neighbors(a, dir).next().is_some(),
                    "{a} has no legal {dir:?} neighbor"
                );
            }
        }
    }

    #[test]
    fn forbidden_wall_stacking_is_encoded() {
        let matrix = AdjacencyMatrix::from_edges();
        assert!(!matrix.allows(TileKind::WallNorth, TileKind::WallSouth, Direction::South));
        assert!(!matrix.allows(TileKind::WallSouth, TileKind::WallNorth, Direction::North));
    }
}
