//! Coordinate system for crossings, tiles and paths.
//!
//! The board is laid out as a "brick wall" honeycomb:
//! - `CrossCoord`: a crossing (corner where up to three tiles meet). Each column `x`
//!   is a zig-zag chain of crossings along `y`, and every crossing has one horizontal
//!   link to the column on its left or right depending on the parity of `x + y`.
//! - `TileCoord`: a hexagonal tile, named after its two middle crossings.
//! - `PathCoord`: the edge between two neighbouring crossings, stored in canonical order.
//!
//! The playable area is a fixed hexagon for 3-4 players: 6 crossing columns by
//! 11 crossing rows, with the four corners cut off.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of the crossing grid (columns `0..CROSS_COLUMNS`)
pub const CROSS_COLUMNS: i32 = 6;

/// Height of the crossing grid (rows `0..CROSS_ROWS`)
pub const CROSS_ROWS: i32 = 11;

/// Cursor movement direction fed in by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Check whether `(x, y)` lies inside the hexagon of crossings.
pub const fn valid_cross(x: i32, y: i32) -> bool {
    x >= 0
        && x < CROSS_COLUMNS
        && y >= 0
        && y < CROSS_ROWS
        && x + y >= 2
        && x + y <= 13
        && y - x <= 8
        && x - y <= 3
}

/// Check whether `(x, y)` names a tile: `x + y` must be odd and both middle
/// crossings `(x, y)` and `(x + 1, y)` must exist.
pub const fn valid_tile(x: i32, y: i32) -> bool {
    (x + y).rem_euclid(2) == 1 && valid_cross(x, y) && valid_cross(x + 1, y)
}

/// A crossing: the intersection point that hosts settlements and cities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct CrossCoord {
    pub x: i32,
    pub y: i32,
}

impl CrossCoord {
    /// Create a crossing coordinate without validation
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a crossing coordinate, or `None` if it is outside the board
    pub fn checked(x: i32, y: i32) -> Option<Self> {
        valid_cross(x, y).then_some(Self { x, y })
    }

    /// Whether this crossing is on the board
    pub const fn is_valid(&self) -> bool {
        valid_cross(self.x, self.y)
    }

    /// Crossings with even `x + y` link to the right, odd ones to the left.
    const fn links_right(&self) -> bool {
        (self.x + self.y).rem_euclid(2) == 0
    }

    /// The (up to three) crossings one path away, restricted to the board.
    pub fn neighbors(&self) -> Vec<CrossCoord> {
        let horizontal = if self.links_right() {
            CrossCoord::new(self.x + 1, self.y)
        } else {
            CrossCoord::new(self.x - 1, self.y)
        };
        [
            horizontal,
            CrossCoord::new(self.x, self.y - 1),
            CrossCoord::new(self.x, self.y + 1),
        ]
        .into_iter()
        .filter(CrossCoord::is_valid)
        .collect()
    }

    /// Whether `other` is one path away from this crossing
    pub fn is_neighbor(&self, other: &CrossCoord) -> bool {
        self.neighbors().contains(other)
    }

    /// The (up to three) tiles that meet at this crossing
    pub fn adjacent_tiles(&self) -> Vec<TileCoord> {
        let (x, y) = (self.x, self.y);
        let candidates = if self.links_right() {
            [
                TileCoord::new(x, y - 1),
                TileCoord::new(x, y + 1),
                TileCoord::new(x - 1, y),
            ]
        } else {
            [
                TileCoord::new(x, y),
                TileCoord::new(x - 1, y - 1),
                TileCoord::new(x - 1, y + 1),
            ]
        };
        candidates.into_iter().filter(TileCoord::is_valid).collect()
    }

    /// The paths that end at this crossing
    pub fn paths(&self) -> Vec<PathCoord> {
        self.neighbors()
            .into_iter()
            .map(|other| PathCoord::new(*self, other))
            .collect()
    }

    /// Move one step on the grid, or `None` when that leaves the board
    pub fn step(&self, direction: Direction) -> Option<CrossCoord> {
        let (x, y) = match direction {
            Direction::Up => (self.x, self.y - 1),
            Direction::Down => (self.x, self.y + 1),
            Direction::Left => (self.x - 1, self.y),
            Direction::Right => (self.x + 1, self.y),
        };
        CrossCoord::checked(x, y)
    }

    pub fn up(&self) -> Option<CrossCoord> {
        self.step(Direction::Up)
    }

    pub fn down(&self) -> Option<CrossCoord> {
        self.step(Direction::Down)
    }

    pub fn left(&self) -> Option<CrossCoord> {
        self.step(Direction::Left)
    }

    pub fn right(&self) -> Option<CrossCoord> {
        self.step(Direction::Right)
    }

    /// Every crossing on the board, column by column
    pub fn all() -> impl Iterator<Item = CrossCoord> {
        (0..CROSS_COLUMNS)
            .flat_map(|x| (0..CROSS_ROWS).map(move |y| CrossCoord::new(x, y)))
            .filter(CrossCoord::is_valid)
    }

    /// Center of the board, used as the initial cursor position
    pub const fn center() -> Self {
        Self::new(2, 5)
    }
}

impl fmt::Display for CrossCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A hexagonal tile.
///
/// A tile `(x, y)` (with `x + y` odd) owns the six crossings in columns `x` and
/// `x + 1`, rows `y - 1..=y + 1`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    /// Create a tile coordinate without validation
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a tile coordinate, or `None` if no such tile exists
    pub fn checked(x: i32, y: i32) -> Option<Self> {
        valid_tile(x, y).then_some(Self { x, y })
    }

    /// Whether this tile is on the board
    pub const fn is_valid(&self) -> bool {
        valid_tile(self.x, self.y)
    }

    /// The six corner crossings of this tile
    pub fn crossings(&self) -> [CrossCoord; 6] {
        let (x, y) = (self.x, self.y);
        [
            CrossCoord::new(x, y - 1),
            CrossCoord::new(x, y),
            CrossCoord::new(x, y + 1),
            CrossCoord::new(x + 1, y - 1),
            CrossCoord::new(x + 1, y),
            CrossCoord::new(x + 1, y + 1),
        ]
    }

    /// Neighbouring tiles that exist on the board
    pub fn neighbors(&self) -> Vec<TileCoord> {
        let (x, y) = (self.x, self.y);
        [
            TileCoord::new(x, y - 2),
            TileCoord::new(x, y + 2),
            TileCoord::new(x - 1, y - 1),
            TileCoord::new(x - 1, y + 1),
            TileCoord::new(x + 1, y - 1),
            TileCoord::new(x + 1, y + 1),
        ]
        .into_iter()
        .filter(TileCoord::is_valid)
        .collect()
    }

    /// Move the cursor to a neighbouring tile.
    ///
    /// Up/Down move two rows; Left/Right move one column, preferring the diagonal
    /// that makes Left and Right inverse of each other.
    pub fn step(&self, direction: Direction) -> Option<TileCoord> {
        let (x, y) = (self.x, self.y);
        let candidates: &[(i32, i32)] = match direction {
            Direction::Up => &[(x, y - 2)],
            Direction::Down => &[(x, y + 2)],
            Direction::Left => &[(x - 1, y - 1), (x - 1, y + 1)],
            Direction::Right => &[(x + 1, y + 1), (x + 1, y - 1)],
        };
        candidates
            .iter()
            .find_map(|&(cx, cy)| TileCoord::checked(cx, cy))
    }

    pub fn up(&self) -> Option<TileCoord> {
        self.step(Direction::Up)
    }

    pub fn down(&self) -> Option<TileCoord> {
        self.step(Direction::Down)
    }

    pub fn left(&self) -> Option<TileCoord> {
        self.step(Direction::Left)
    }

    pub fn right(&self) -> Option<TileCoord> {
        self.step(Direction::Right)
    }

    /// Every tile on the board, column by column
    pub fn all() -> impl Iterator<Item = TileCoord> {
        (0..CROSS_COLUMNS)
            .flat_map(|x| (0..CROSS_ROWS).map(move |y| TileCoord::new(x, y)))
            .filter(TileCoord::is_valid)
    }

    /// The middle tile of the board
    pub const fn center() -> Self {
        Self::new(2, 5)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// A path between two neighbouring crossings, where roads are built.
///
/// The endpoints are kept in ascending `(x, y)` order so the same path always
/// compares and hashes equal no matter which end it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathCoord {
    a: CrossCoord,
    b: CrossCoord,
}

impl PathCoord {
    /// Create the path between two neighbouring crossings.
    ///
    /// # Panics
    ///
    /// Panics if the crossings are not neighbours.
    pub fn new(a: CrossCoord, b: CrossCoord) -> Self {
        Self::between(a, b).unwrap_or_else(|| panic!("{a} and {b} are not neighbouring crossings"))
    }

    /// The path between two crossings, or `None` if they are not neighbours
    pub fn between(a: CrossCoord, b: CrossCoord) -> Option<Self> {
        if !a.is_valid() || !a.is_neighbor(&b) {
            return None;
        }
        Some(if a <= b { Self { a, b } } else { Self { a: b, b: a } })
    }

    /// Both endpoints in canonical order
    pub fn endpoints(&self) -> [CrossCoord; 2] {
        [self.a, self.b]
    }

    /// Whether this path ends at the given crossing
    pub fn touches(&self, cross: &CrossCoord) -> bool {
        self.a == *cross || self.b == *cross
    }

    /// Every path on the board
    pub fn all() -> impl Iterator<Item = PathCoord> {
        CrossCoord::all().flat_map(|cross| {
            cross
                .neighbors()
                .into_iter()
                .filter(move |other| cross < *other)
                .map(move |other| PathCoord { a: cross, b: other })
        })
    }
}

impl fmt::Display for PathCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_board_has_54_crossings() {
        assert_eq!(CrossCoord::all().count(), 54);
    }

    #[test]
    fn test_board_has_19_tiles() {
        assert_eq!(TileCoord::all().count(), 19);
    }

    #[test]
    fn test_board_has_72_paths() {
        let paths: HashSet<_> = PathCoord::all().collect();
        assert_eq!(paths.len(), 72);
    }

    #[test]
    fn test_corner_cuts() {
        assert!(!valid_cross(0, 0));
        assert!(!valid_cross(0, 1));
        assert!(valid_cross(0, 2));
        assert!(valid_cross(2, 0));
        assert!(valid_cross(3, 0));
        assert!(!valid_cross(4, 0));
        assert!(!valid_cross(5, 9));
        assert!(valid_cross(5, 8));
        assert!(!valid_cross(0, 9));
        assert!(!valid_cross(6, 5));
        assert!(!valid_cross(-1, 5));
    }

    #[test]
    fn test_bounds_symmetric_under_point_reflection() {
        // The hexagon is symmetric under (x, y) -> (5 - x, 10 - y)
        for x in -2..8 {
            for y in -2..13 {
                assert_eq!(valid_cross(x, y), valid_cross(5 - x, 10 - y), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_valid_tiles_have_valid_crossings() {
        for tile in TileCoord::all() {
            assert!(valid_cross(tile.x, tile.y));
            assert!(valid_cross(tile.x + 1, tile.y));
            for cross in tile.crossings() {
                assert!(cross.is_valid(), "{tile} has off-board corner {cross}");
            }
        }
    }

    #[test]
    fn test_tile_parity() {
        assert!(valid_tile(2, 5));
        assert!(!valid_tile(2, 4));
        assert!(!valid_tile(5, 5));
    }

    #[test]
    fn test_neighbors_follow_parity() {
        let even = CrossCoord::new(2, 4);
        let n: HashSet<_> = even.neighbors().into_iter().collect();
        let expected: HashSet<_> = [
            CrossCoord::new(3, 4),
            CrossCoord::new(2, 3),
            CrossCoord::new(2, 5),
        ]
        .into_iter()
        .collect();
        assert_eq!(n, expected);

        let odd = CrossCoord::new(2, 5);
        let n: HashSet<_> = odd.neighbors().into_iter().collect();
        let expected: HashSet<_> = [
            CrossCoord::new(1, 5),
            CrossCoord::new(2, 4),
            CrossCoord::new(2, 6),
        ]
        .into_iter()
        .collect();
        assert_eq!(n, expected);
    }

    #[test]
    fn test_neighbors_are_filtered_to_board() {
        // (0, 2) links right to (1, 2) and down to (0, 3); (0, 1) is off-board
        let n = CrossCoord::new(0, 2).neighbors();
        assert_eq!(n.len(), 2);
        assert!(n.iter().all(CrossCoord::is_valid));
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        for a in CrossCoord::all() {
            for b in a.neighbors() {
                assert!(b.is_neighbor(&a), "{a} -> {b} is one-way");
            }
        }
    }

    #[test]
    fn test_adjacent_tiles_contain_crossing() {
        for cross in CrossCoord::all() {
            let tiles = cross.adjacent_tiles();
            assert!(!tiles.is_empty() && tiles.len() <= 3);
            for tile in tiles {
                assert!(tile.crossings().contains(&cross));
            }
        }
        assert_eq!(CrossCoord::center().adjacent_tiles().len(), 3);
    }

    #[test]
    fn test_every_tile_corner_sees_the_tile() {
        for tile in TileCoord::all() {
            for cross in tile.crossings() {
                assert!(cross.adjacent_tiles().contains(&tile));
            }
        }
    }

    #[test]
    fn test_canonical_path_ignores_order() {
        for a in CrossCoord::all() {
            for b in a.neighbors() {
                assert_eq!(PathCoord::new(a, b), PathCoord::new(b, a));
            }
        }
    }

    #[test]
    fn test_path_endpoints_sorted() {
        let p = PathCoord::new(CrossCoord::new(3, 4), CrossCoord::new(2, 4));
        assert_eq!(p.endpoints(), [CrossCoord::new(2, 4), CrossCoord::new(3, 4)]);
    }

    #[test]
    fn test_between_rejects_non_neighbors() {
        assert!(PathCoord::between(CrossCoord::new(2, 4), CrossCoord::new(2, 6)).is_none());
        assert!(PathCoord::between(CrossCoord::new(2, 4), CrossCoord::new(2, 4)).is_none());
    }

    #[test]
    #[should_panic(expected = "not neighbouring")]
    fn test_new_path_panics_on_non_neighbors() {
        PathCoord::new(CrossCoord::new(0, 2), CrossCoord::new(3, 3));
    }

    #[test]
    fn test_cross_steps_stay_on_board() {
        assert_eq!(CrossCoord::new(2, 0).up(), None);
        assert_eq!(CrossCoord::new(2, 0).down(), Some(CrossCoord::new(2, 1)));
        assert_eq!(CrossCoord::new(0, 5).left(), None);
        assert_eq!(CrossCoord::new(0, 5).right(), Some(CrossCoord::new(1, 5)));
    }

    #[test]
    fn test_tile_left_right_are_inverse() {
        let center = TileCoord::center();
        let left = center.left().unwrap();
        assert_eq!(left.right(), Some(center));
        let right = center.right().unwrap();
        assert_eq!(right.left(), Some(center));
    }

    #[test]
    fn test_tile_up_down() {
        let center = TileCoord::center();
        assert_eq!(center.up(), Some(TileCoord::new(2, 3)));
        assert_eq!(center.down(), Some(TileCoord::new(2, 7)));
        assert_eq!(TileCoord::new(2, 1).up(), None);
    }

    #[test]
    fn test_center_tile_has_six_neighbors() {
        assert_eq!(TileCoord::center().neighbors().len(), 6);
    }
}
