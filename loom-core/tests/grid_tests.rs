use loom_core::grid::Grid;

#[test]
fn test_grid_new() {
    let grid: Grid<usize> = Grid::new(3, 4);
    assert_eq!(grid.width, 3);
    assert_eq!(grid.height, 4);
    // Initialized with default (0 for usize).
    assert_eq!(*grid.get(0, 0).expect("cell (0,0) should exist"), 0);
    assert_eq!(*grid.get(2, 3).expect("cell (2,3) should exist"), 0);
}

#[test]
fn test_grid_get() {
    let mut grid: Grid<usize> = Grid::new(2, 2);
    *grid.get_mut(1, 0).unwrap() = 42;

    assert_eq!(*grid.get(1, 0).unwrap(), 42);
    assert_eq!(*grid.get(0, 0).unwrap(), 0);

    // Out of bounds checks
    assert!(grid.get(2, 0).is_none()); // x out of bounds
    assert!(grid.get(0, 2).is_none()); // y out of bounds
}

#[test]
fn test_grid_get_mut() {
    let mut grid: Grid<usize> = Grid::new(2, 3);

    if let Some(cell) = grid.get_mut(1, 2) {
        *cell = 99;
    }
    assert_eq!(*grid.get(1, 2).unwrap(), 99);

    assert!(grid.get_mut(2, 0).is_none()); // x out of bounds
    assert!(grid.get_mut(0, 3).is_none()); // y out of bounds
}

#[test]
fn test_coords_cover_row_major() {
    let grid: Grid<u8> = Grid::new(3, 2);
    let coords: Vec<_> = grid.coords().collect();
    assert_eq!(
        coords,
        [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
    );
}
