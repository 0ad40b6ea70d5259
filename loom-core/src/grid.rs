use bitvec::prelude::*;
use loom_tiles::{TileKind, TILE_KIND_COUNT};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generic W x H grid stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid<T> {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    pub(crate) data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    /// Creates a new grid with the given dimensions, initialized with default
    /// values.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let data = vec![T::default(); width * height];
        Self {
            width,
            height,
            data,
        }
    }
}

impl<T> Grid<T> {
    /// Returns a reference to the element at the given coordinates, or `None`
    /// if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.index(x, y).and_then(|idx| self.data.get(idx))
    }

    /// Returns a mutable reference to the element at the given coordinates,
    /// or `None` if the coordinates are out of bounds.
    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.index(x, y)
            .and_then(move |idx| self.data.get_mut(idx))
    }

    /// Calculates the 1D index for the given coordinates.
    /// Returns `None` if the coordinates are out of bounds.
    #[inline]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Iterates all coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }
}

/// Grid of resolved tiles; `None` until the cell has collapsed.
pub type TileGrid = Grid<Option<TileKind>>;

/// Grid of per-cell candidate bitsets ("the wave"). Bit `i` set means
/// `TileKind::ALL[i]` is still possible for that cell.
pub type WaveGrid = Grid<BitVec>;

impl WaveGrid {
    /// Creates a wave with every cell at full superposition (all 11 kinds).
    #[must_use]
    pub fn full_superposition(width: usize, height: usize) -> Self {
        let data = vec![BitVec::repeat(true, TILE_KIND_COUNT); width * height];
        Self {
            width,
            height,
            data,
        }
    }

    /// Candidate count for a cell; `None` out of bounds.
    #[inline]
    pub fn entropy(&self, x: usize, y: usize) -> Option<usize> {
        self.get(x, y).map(|cell| cell.count_ones())
    }

    /// Restricts a cell to exactly one kind.
    pub fn collapse_cell(&mut self, x: usize, y: usize, kind: TileKind) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.fill(false);
            cell.set(kind.index(), true);
        }
    }

    /// Iterates the kinds still possible for a cell.
    pub fn candidates(&self, x: usize, y: usize) -> impl Iterator<Item = TileKind> + '_ {
        self.get(x, y)
            .into_iter()
            .flat_map(|cell| cell.iter_ones().filter_map(|i| TileKind::ALL.get(i).copied()))
    }
}
