// Grid coordinate math: bounds, distances, adjacency. Pure, no failure modes.

/// Cell coordinate on a room's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangular grid dimensions for one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: i32,
    pub height: i32,
}

impl GridSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns true if the position lies inside this grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }
}

/// Manhattan distance between two cells.
pub fn manhattan(a: Position, b: Position) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Four-directional adjacency (distance exactly 1, no diagonals).
pub fn adjacent(a: Position, b: Position) -> bool {
    manhattan(a, b) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_accepts_interior_and_rejects_edges_past_bounds() {
        let grid = GridSize::new(8, 6);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(7, 5)));
        assert!(!grid.contains(Position::new(8, 0)));
        assert!(!grid.contains(Position::new(0, 6)));
        assert!(!grid.contains(Position::new(-1, 3)));
    }

    #[test]
    fn manhattan_sums_axis_deltas() {
        assert_eq!(manhattan(Position::new(0, 0), Position::new(3, 4)), 7);
        assert_eq!(manhattan(Position::new(2, 2), Position::new(2, 2)), 0);
        assert_eq!(manhattan(Position::new(5, 1), Position::new(1, 1)), 4);
    }

    #[test]
    fn adjacency_is_four_directional_only() {
        let origin = Position::new(3, 3);
        assert!(adjacent(origin, Position::new(4, 3)));
        assert!(adjacent(origin, Position::new(3, 2)));
        assert!(!adjacent(origin, Position::new(4, 4))); // diagonal
        assert!(!adjacent(origin, origin));
        assert!(!adjacent(origin, Position::new(5, 3)));
    }
}
