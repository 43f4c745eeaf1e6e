//! Neighbor directions and the 8-bit neighbor bitmask
//!
//! Each of the 8 surrounding cells owns one bit, clockwise starting at the top:
//!
//! ```text
//!   7|0|1        up_left | up   | up_right
//!   6|X|2   =>   left    |  X   | right
//!   5|4|3        down_left | down | down_right
//! ```
//!
//! Vectors use a Y-up coordinate system: `(0, 1)` is the neighbor above.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{AutotileError, Result};

/// One of the 8 neighbor directions of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    /// All directions in bit order (bit 0 first)
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    /// The orthogonal directions (up, right, down, left)
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Bit index in `0..8`
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// Single-bit mask for this direction
    pub const fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Unit offset of the neighbor in this direction (Y-up)
    pub const fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::UpRight => (1, 1),
            Direction::Right => (1, 0),
            Direction::DownRight => (1, -1),
            Direction::Down => (0, -1),
            Direction::DownLeft => (-1, -1),
            Direction::Left => (-1, 0),
            Direction::UpLeft => (-1, 1),
        }
    }

    /// Direction whose vector is the negation of this one
    pub const fn opposite(self) -> Direction {
        Self::ALL[(self as usize + 4) % 8]
    }

    /// Whether this is a diagonal (odd index) direction
    pub const fn is_diagonal(self) -> bool {
        (self as u8) % 2 == 1
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::UpRight => "up_right",
            Direction::Right => "right",
            Direction::DownRight => "down_right",
            Direction::Down => "down",
            Direction::DownLeft => "down_left",
            Direction::Left => "left",
            Direction::UpLeft => "up_left",
        }
    }

    /// Parse a direction from its snake_case name
    pub fn from_name(name: &str) -> Result<Direction> {
        Self::ALL
            .into_iter()
            .find(|d| d.name() == name)
            .ok_or_else(|| AutotileError::UnknownDirection(name.to_string()))
    }

    /// Look up the direction for a neighbor offset.
    ///
    /// Only the 8 Chebyshev distance 1 offsets are valid.
    pub fn from_vector(dx: i32, dy: i32) -> Result<Direction> {
        Self::ALL
            .into_iter()
            .find(|d| d.vector() == (dx, dy))
            .ok_or(AutotileError::InvalidDirectionVector { dx, dy })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bit for a single direction
pub const fn from_direction(direction: Direction) -> u8 {
    direction.bit()
}

/// Bit for a neighbor offset
pub fn from_vector(dx: i32, dy: i32) -> Result<u8> {
    Direction::from_vector(dx, dy).map(Direction::bit)
}

/// Bitwise OR of all given directions. An empty list yields 0.
pub fn combine(directions: &[Direction]) -> u8 {
    directions.iter().fold(0, |bits, d| bits | d.bit())
}

/// Named direction masks, usable in `const` tables
pub mod bits {
    use super::Direction;

    pub const UP: u8 = Direction::Up.bit();
    pub const UP_RIGHT: u8 = Direction::UpRight.bit();
    pub const RIGHT: u8 = Direction::Right.bit();
    pub const DOWN_RIGHT: u8 = Direction::DownRight.bit();
    pub const DOWN: u8 = Direction::Down.bit();
    pub const DOWN_LEFT: u8 = Direction::DownLeft.bit();
    pub const LEFT: u8 = Direction::Left.bit();
    pub const UP_LEFT: u8 = Direction::UpLeft.bit();

    pub const ALL: u8 = 0xFF;
    pub const ORTHOGONAL: u8 = UP | RIGHT | DOWN | LEFT;
}

/// Which of the 8 neighbors of a cell are filled with the same tile.
///
/// A plain value type: every operation returns a new value.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Neighbors(u8);

impl Neighbors {
    pub const NONE: Neighbors = Neighbors(0);
    pub const ALL: Neighbors = Neighbors(bits::ALL);

    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub fn from_directions(directions: &[Direction]) -> Self {
        Self(combine(directions))
    }

    /// Build from neighbor offsets, failing on the first invalid one
    pub fn from_vectors(vectors: &[(i32, i32)]) -> Result<Self> {
        let mut result = Self::NONE;
        for &(dx, dy) in vectors {
            result = result.add(from_vector(dx, dy)?);
        }
        Ok(result)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Set all bits of `other`
    #[allow(clippy::should_implement_trait)]
    pub const fn add(self, other: u8) -> Self {
        Self(self.0 | other)
    }

    /// Clear all bits of `other`
    pub const fn remove(self, other: u8) -> Self {
        Self(self.0 & !other)
    }

    /// True when every bit of `mask` is set
    pub const fn includes_all(self, mask: u8) -> bool {
        self.0 & mask == mask
    }

    /// True when no bit of `mask` is set
    pub const fn excludes_all(self, mask: u8) -> bool {
        self.0 & mask == 0
    }

    pub const fn contains(self, direction: Direction) -> bool {
        self.includes_all(direction.bit())
    }

    /// Filled directions in bit order
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Clear every diagonal whose two flanking orthogonal neighbors are not
    /// both filled.
    ///
    /// Collapses the 256 masks onto the 47 blob masks.
    pub const fn normalized(self) -> Self {
        use bits::*;

        let mut result = self.0;
        if self.0 & (UP | LEFT) != (UP | LEFT) {
            result &= !UP_LEFT;
        }
        if self.0 & (UP | RIGHT) != (UP | RIGHT) {
            result &= !UP_RIGHT;
        }
        if self.0 & (DOWN | RIGHT) != (DOWN | RIGHT) {
            result &= !DOWN_RIGHT;
        }
        if self.0 & (DOWN | LEFT) != (DOWN | LEFT) {
            result &= !DOWN_LEFT;
        }
        Self(result)
    }
}

impl From<u8> for Neighbors {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

impl From<Neighbors> for u8 {
    fn from(neighbors: Neighbors) -> Self {
        neighbors.0
    }
}

impl Add<Direction> for Neighbors {
    type Output = Neighbors;

    fn add(self, rhs: Direction) -> Neighbors {
        Neighbors::add(self, rhs.bit())
    }
}

impl Add<Neighbors> for Neighbors {
    type Output = Neighbors;

    fn add(self, rhs: Neighbors) -> Neighbors {
        Neighbors::add(self, rhs.0)
    }
}

impl Sub<Direction> for Neighbors {
    type Output = Neighbors;

    fn sub(self, rhs: Direction) -> Neighbors {
        self.remove(rhs.bit())
    }
}

impl Sub<Neighbors> for Neighbors {
    type Output = Neighbors;

    fn sub(self, rhs: Neighbors) -> Neighbors {
        self.remove(rhs.0)
    }
}

impl fmt::Display for Neighbors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Neighbors(")?;
        for (i, direction) in self.directions().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(direction.name())?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for Neighbors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_and_directions_agree() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.vector();
            assert_eq!(from_vector(dx, dy).unwrap(), from_direction(direction));
        }
    }

    #[test]
    fn test_bit_layout() {
        assert_eq!(bits::UP, 0b0000_0001);
        assert_eq!(bits::UP_RIGHT, 0b0000_0010);
        assert_eq!(bits::RIGHT, 0b0000_0100);
        assert_eq!(bits::DOWN_RIGHT, 0b0000_1000);
        assert_eq!(bits::DOWN, 0b0001_0000);
        assert_eq!(bits::DOWN_LEFT, 0b0010_0000);
        assert_eq!(bits::LEFT, 0b0100_0000);
        assert_eq!(bits::UP_LEFT, 0b1000_0000);
    }

    #[test]
    fn test_invalid_vectors_rejected() {
        for (dx, dy) in [(0, 0), (2, 0), (0, -2), (3, 3), (-1, 2)] {
            assert!(matches!(
                from_vector(dx, dy),
                Err(AutotileError::InvalidDirectionVector { .. })
            ));
        }
    }

    #[test]
    fn test_opposite_negates_vector() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.vector();
            assert_eq!(direction.opposite().vector(), (-dx, -dy));
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_combine() {
        assert_eq!(combine(&[]), 0);
        assert_eq!(combine(&[Direction::Up, Direction::Down]), 0b0001_0001);
        assert_eq!(combine(&Direction::ALL), 0xFF);
    }

    #[test]
    fn test_names_round_trip() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_name(direction.name()).unwrap(), direction);
        }
        assert!(matches!(
            Direction::from_name("north"),
            Err(AutotileError::UnknownDirection(_))
        ));
    }

    #[test]
    fn test_add_remove_idempotent() {
        for bits in 0..=255u8 {
            let n = Neighbors::new(bits);
            for mask in 0..=255u8 {
                assert_eq!(n.add(mask).remove(mask), n.remove(mask));
                assert_eq!(n.remove(mask).add(mask), n.add(mask));
            }
        }
    }

    #[test]
    fn test_includes_excludes() {
        let n = Neighbors::from_directions(&[Direction::Up, Direction::Right]);
        assert!(n.includes_all(bits::UP));
        assert!(n.includes_all(bits::UP | bits::RIGHT));
        assert!(!n.includes_all(bits::UP | bits::DOWN));
        assert!(n.excludes_all(bits::DOWN | bits::LEFT));
        assert!(!n.excludes_all(bits::DOWN | bits::UP));
        assert!(n.includes_all(0));
        assert!(n.excludes_all(0));
    }

    #[test]
    fn test_operators() {
        let n = Neighbors::NONE + Direction::Up + Direction::Right;
        assert_eq!(n.bits(), bits::UP | bits::RIGHT);
        assert_eq!((n - Direction::Up).bits(), bits::RIGHT);
        assert_eq!(n - n, Neighbors::NONE);
    }

    #[test]
    fn test_from_vectors() {
        let n = Neighbors::from_vectors(&[(0, 1), (0, -1)]).unwrap();
        assert_eq!(n.bits(), bits::UP | bits::DOWN);
        assert!(Neighbors::from_vectors(&[(0, 1), (5, 5)]).is_err());
    }

    #[test]
    fn test_display_lists_directions() {
        let n = Neighbors::from_directions(&[Direction::Right, Direction::UpRight]);
        assert_eq!(n.to_string(), "Neighbors(up_right, right)");
        assert_eq!(Neighbors::NONE.to_string(), "Neighbors()");
    }

    #[test]
    fn test_normalized_drops_unsupported_diagonals() {
        let n = Neighbors::from_directions(&[Direction::Up, Direction::UpRight]);
        assert_eq!(n.normalized().bits(), bits::UP);

        let n = Neighbors::from_directions(&[Direction::Up, Direction::Right, Direction::UpRight]);
        assert_eq!(n.normalized(), n);

        let distinct: std::collections::HashSet<_> =
            (0..=255u8).map(|b| Neighbors::new(b).normalized()).collect();
        assert_eq!(distinct.len(), 47);
    }

    #[test]
    fn test_serde_as_plain_integer() {
        let n = Neighbors::new(0b0101_0101);
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "85");
        let back: Neighbors = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }
}
