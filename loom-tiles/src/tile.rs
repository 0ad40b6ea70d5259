use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of distinct tile kinds. Wave bitsets and the adjacency matrix are
/// sized by this constant.
pub const TILE_KIND_COUNT: usize = 11;

/// A compass direction on the 2D grid.
///
/// The grid is stored row-major with `y` growing southwards, so `North` is
/// `(0, -1)` in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All four directions, in the order used for axis indexing.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// The direction pointing back at the caller.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Unit offset `(dx, dy)` of this direction in grid coordinates.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// Stable axis index (0..4), used to flatten the adjacency matrix.
    #[must_use]
    pub const fn axis(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }
}

/// The kind of boundary a tile exposes on one of its four sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeKind {
    /// Building exterior; faces open ground.
    Empty,
    /// The running side of a wall segment; continues into more wall.
    Wall,
    /// Walkable interior.
    Floor,
    /// Open ground.
    Grass,
    /// A doorway; only satisfied by `Floor` on the far side.
    Door,
}

impl EdgeKind {
    /// Whether two facing edges may share a boundary.
    ///
    /// Symmetric. `Empty` pairs with `Empty` or `Grass`, `Wall` with `Wall`
    /// only, `Floor` with `Floor` or `Door`, `Door` with `Floor` only, and
    /// `Grass` with `Grass` or `Empty`.
    #[inline]
    #[must_use]
    pub const fn compatible(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Empty | Self::Grass, Self::Empty | Self::Grass)
                | (Self::Wall, Self::Wall)
                | (Self::Floor, Self::Floor | Self::Door)
                | (Self::Door, Self::Floor)
        )
    }
}

/// One of the eleven tile kinds a cell can resolve to.
///
/// The discriminants are the wire encoding used by embedders (0 = `Grass`
/// through 10 = `Door`) and double as indices into wave bitsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum TileKind {
    Grass = 0,
    Floor = 1,
    WallNorth = 2,
    WallSouth = 3,
    WallEast = 4,
    WallWest = 5,
    CornerNe = 6,
    CornerNw = 7,
    CornerSe = 8,
    CornerSw = 9,
    Door = 10,
}

impl TileKind {
    /// Every tile kind, ordered by encoding.
    pub const ALL: [Self; TILE_KIND_COUNT] = [
        Self::Grass,
        Self::Floor,
        Self::WallNorth,
        Self::WallSouth,
        Self::WallEast,
        Self::WallWest,
        Self::CornerNe,
        Self::CornerNw,
        Self::CornerSe,
        Self::CornerSw,
        Self::Door,
    ];

    /// The integer encoding of this kind.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decodes an integer encoding. Returns `None` outside `0..=10`.
    #[must_use]
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// The edge this tile exposes towards `side`.
    ///
    /// Total over all 11 x 4 combinations; a fixed compile-time table.
    /// Wall segments expose `Empty` on their outward side and `Wall` along
    /// their run; one member of each opposing pair (`WallNorth`, `WallEast`)
    /// carries a `Floor` interior edge while its mirror carries `Wall`, which
    /// is what keeps opposite-facing segments from stacking back to back.
    #[inline]
    #[must_use]
    pub const fn edge(self, side: Direction) -> EdgeKind {
        use Direction::{East, North, South, West};
        match (self, side) {
            (Self::Grass, _) => EdgeKind::Grass,
            (Self::Floor, _) => EdgeKind::Floor,
            (Self::Door, _) => EdgeKind::Door,

            (Self::WallNorth, North) => EdgeKind::Empty,
            (Self::WallNorth, South) => EdgeKind::Floor,
            (Self::WallNorth, East | West) => EdgeKind::Wall,

            (Self::WallSouth, South) => EdgeKind::Empty,
            (Self::WallSouth, North | East | West) => EdgeKind::Wall,

            (Self::WallEast, East) => EdgeKind::Empty,
            (Self::WallEast, West) => EdgeKind::Floor,
            (Self::WallEast, North | South) => EdgeKind::Wall,

            (Self::WallWest, West) => EdgeKind::Empty,
            (Self::WallWest, North | South | East) => EdgeKind::Wall,

            (Self::CornerNe, North | East) => EdgeKind::Empty,
            (Self::CornerNe, South | West) => EdgeKind::Wall,

            (Self::CornerNw, North | West) => EdgeKind::Empty,
            (Self::CornerNw, South | East) => EdgeKind::Wall,

            (Self::CornerSe, South | East) => EdgeKind::Empty,
            (Self::CornerSe, North | West) => EdgeKind::Wall,

            (Self::CornerSw, South | West) => EdgeKind::Empty,
            (Self::CornerSw, North | East) => EdgeKind::Wall,
        }
    }

    /// Whether `neighbor` may sit on the `side` of `self`.
    ///
    /// Compares this tile's `side` edge against the neighbor's facing edge.
    #[inline]
    #[must_use]
    pub const fn accepts(self, neighbor: Self, side: Direction) -> bool {
        self.edge(side).compatible(neighbor.edge(side.opposite()))
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Grass => "grass",
            Self::Floor => "floor",
            Self::WallNorth => "wall-north",
            Self::WallSouth => "wall-south",
            Self::WallEast => "wall-east",
            Self::WallWest => "wall-west",
            Self::CornerNe => "corner-ne",
            Self::CornerNw => "corner-nw",
            Self::CornerSe => "corner-se",
            Self::CornerSw => "corner-sw",
            Self::Door => "door",
        };
        f.write_str(name)
    }
}
