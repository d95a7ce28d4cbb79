//! Neighbour connectivity and adjacency rules on the level grid

use crate::autotile::bitmask::{Direction, NeighborDescriptor};
use crate::game::grid::GameGrid;
use crate::game::tile::Position;

/// Connectivity descriptor for the tile at `position`
///
/// A neighbour connects only when it is inside the grid, revealed, and in the
/// same category class as the subject. Subjects without a class (or off-grid
/// subjects) connect to nothing.
pub fn neighbors_of(grid: &GameGrid, position: Position) -> NeighborDescriptor {
    let Some(subject_class) = grid.get(position).and_then(|tile| tile.class()) else {
        return NeighborDescriptor::default();
    };

    NeighborDescriptor::from_fn(|direction| {
        grid.neighbor(position, direction)
            .is_some_and(|tile| tile.revealed && tile.class() == Some(subject_class))
    })
}

/// Whether two positions are exactly one orthogonal step apart
pub const fn is_adjacent_four_way(a: Position, b: Position) -> bool {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col) == 1
}

/// Whether any edge-sharing neighbour of `position` is revealed
///
/// Gates which hidden tiles may be uncovered next.
pub fn has_revealed_four_way_neighbor(grid: &GameGrid, position: Position) -> bool {
    Direction::CARDINALS
        .into_iter()
        .filter_map(|direction| grid.neighbor(position, direction))
        .any(|tile| tile.revealed)
}
