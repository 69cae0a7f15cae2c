//! Exit directions and lattice coordinates.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// One of the six fixed exit labels.
///
/// Parsing is case-insensitive and accepts the single-letter compass
/// abbreviations (`n`, `s`, `e`, `w`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    #[strum(to_string = "north", serialize = "n")]
    North,
    #[strum(to_string = "south", serialize = "s")]
    South,
    #[strum(to_string = "east", serialize = "e")]
    East,
    #[strum(to_string = "west", serialize = "w")]
    West,
    #[strum(to_string = "up")]
    Up,
    #[strum(to_string = "down")]
    Down,
}

impl Direction {
    /// All directions in display order.
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    /// Returns the paired direction (north↔south, east↔west, up↔down).
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Position of this direction in [`Direction::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Unit step on the lattice.
    pub const fn offset(self) -> LatticePos {
        match self {
            Self::North => LatticePos::new(0, 1, 0),
            Self::South => LatticePos::new(0, -1, 0),
            Self::East => LatticePos::new(1, 0, 0),
            Self::West => LatticePos::new(-1, 0, 0),
            Self::Up => LatticePos::new(0, 0, 1),
            Self::Down => LatticePos::new(0, 0, -1),
        }
    }
}

/// Integer coordinate of a room in the 3D dungeon lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LatticePos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl LatticePos {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Coordinate one step away in `direction`.
    pub const fn step(self, direction: Direction) -> Self {
        let d = direction.offset();
        Self::new(self.x + d.x, self.y + d.y, self.z + d.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn opposites_are_involutive() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn stepping_back_returns_to_origin() {
        for direction in Direction::ALL {
            let there = LatticePos::ORIGIN.step(direction);
            assert_eq!(there.step(direction.opposite()), LatticePos::ORIGIN);
        }
    }

    #[test]
    fn parses_labels_and_abbreviations() {
        assert_eq!(Direction::from_str("North").unwrap(), Direction::North);
        assert_eq!(Direction::from_str("w").unwrap(), Direction::West);
        assert_eq!(Direction::from_str("DOWN").unwrap(), Direction::Down);
        assert!(Direction::from_str("sideways").is_err());
        assert_eq!(Direction::Up.to_string(), "up");
    }

    #[test]
    fn static_labels_match_display() {
        for direction in Direction::ALL {
            let label: &'static str = direction.into();
            assert_eq!(label, direction.to_string());
        }
    }

    #[test]
    fn index_matches_all_order() {
        for (i, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), i);
        }
    }
}
