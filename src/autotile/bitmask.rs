//! Neighbour descriptors and their 8-bit connectivity encoding
//!
//! Bit layout, clockwise from the top-left corner:
//!
//! ```text
//! [bit0=TL][bit1=T][bit2=TR]
//! [bit7=L ]   X   [bit3=R ]
//! [bit6=BL][bit5=B][bit4=BR]
//! ```
//!
//! The reference sheet sampler walks [`Direction::ALL`] as well, so a cell
//! painted for a given neighbourhood reads back as the same bitmask.

use crate::io::configuration::{CARDINAL_WEIGHT, DIAGONAL_WEIGHT};

/// One of the eight neighbour positions around a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Row above, column left
    TopLeft,
    /// Row above
    Top,
    /// Row above, column right
    TopRight,
    /// Column right
    Right,
    /// Row below, column right
    BottomRight,
    /// Row below
    Bottom,
    /// Row below, column left
    BottomLeft,
    /// Column left
    Left,
}

impl Direction {
    /// All directions in bit order
    pub const ALL: [Self; 8] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
    ];

    /// Edge-sharing directions in bit order
    pub const CARDINALS: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Bit index of this direction in a [`ConnectivityBitmask`]
    pub const fn bit(self) -> u8 {
        match self {
            Self::TopLeft => 0,
            Self::Top => 1,
            Self::TopRight => 2,
            Self::Right => 3,
            Self::BottomRight => 4,
            Self::Bottom => 5,
            Self::BottomLeft => 6,
            Self::Left => 7,
        }
    }

    /// Grid offset as (row delta, column delta)
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::TopLeft => (-1, -1),
            Self::Top => (-1, 0),
            Self::TopRight => (-1, 1),
            Self::Right => (0, 1),
            Self::BottomRight => (1, 1),
            Self::Bottom => (1, 0),
            Self::BottomLeft => (1, -1),
            Self::Left => (0, -1),
        }
    }

    /// Whether this direction shares an edge with the centre cell
    pub const fn is_cardinal(self) -> bool {
        matches!(self, Self::Top | Self::Right | Self::Bottom | Self::Left)
    }

    /// Mismatch cost used by [`weighted_distance`]
    pub const fn weight(self) -> u32 {
        if self.is_cardinal() {
            CARDINAL_WEIGHT
        } else {
            DIAGONAL_WEIGHT
        }
    }
}

/// Which of the eight neighbours connect to the subject cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct NeighborDescriptor {
    /// Neighbour above
    pub top: bool,
    /// Neighbour to the right
    pub right: bool,
    /// Neighbour below
    pub bottom: bool,
    /// Neighbour to the left
    pub left: bool,
    /// Neighbour above-left
    pub top_left: bool,
    /// Neighbour above-right
    pub top_right: bool,
    /// Neighbour below-left
    pub bottom_left: bool,
    /// Neighbour below-right
    pub bottom_right: bool,
}

impl NeighborDescriptor {
    /// Read the flag for one direction
    pub const fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::TopLeft => self.top_left,
            Direction::Top => self.top,
            Direction::TopRight => self.top_right,
            Direction::Right => self.right,
            Direction::BottomRight => self.bottom_right,
            Direction::Bottom => self.bottom,
            Direction::BottomLeft => self.bottom_left,
            Direction::Left => self.left,
        }
    }

    /// Set the flag for one direction
    pub const fn set(&mut self, direction: Direction, connected: bool) {
        match direction {
            Direction::TopLeft => self.top_left = connected,
            Direction::Top => self.top = connected,
            Direction::TopRight => self.top_right = connected,
            Direction::Right => self.right = connected,
            Direction::BottomRight => self.bottom_right = connected,
            Direction::Bottom => self.bottom = connected,
            Direction::BottomLeft => self.bottom_left = connected,
            Direction::Left => self.left = connected,
        }
    }

    /// Build a descriptor by evaluating `connected` for every direction
    pub fn from_fn<F>(mut connected: F) -> Self
    where
        F: FnMut(Direction) -> bool,
    {
        let mut descriptor = Self::default();
        for direction in Direction::ALL {
            descriptor.set(direction, connected(direction));
        }
        descriptor
    }
}

/// 8-bit connectivity code, see the module docs for the bit layout
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectivityBitmask(pub u8);

impl ConnectivityBitmask {
    /// No connected neighbours
    pub const EMPTY: Self = Self(0);

    /// Raw bit value
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the bit for `direction` is set
    pub const fn has(self, direction: Direction) -> bool {
        self.0 & (1 << direction.bit()) != 0
    }

    /// Copy with the bit for `direction` set
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | (1 << direction.bit()))
    }

    /// Copy with the diagonal bits cleared
    #[must_use]
    pub const fn cardinals_only(self) -> Self {
        Self(self.0 & 0b1010_1010)
    }
}

impl From<u8> for ConnectivityBitmask {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

/// Encode a neighbour descriptor into its connectivity bitmask
pub fn encode(descriptor: &NeighborDescriptor) -> ConnectivityBitmask {
    Direction::ALL
        .into_iter()
        .filter(|&direction| descriptor.get(direction))
        .fold(ConnectivityBitmask::EMPTY, ConnectivityBitmask::with)
}

/// Expand a connectivity bitmask back into a neighbour descriptor
pub fn decode(mask: ConnectivityBitmask) -> NeighborDescriptor {
    NeighborDescriptor::from_fn(|direction| mask.has(direction))
}

/// Weighted Hamming distance between two bitmasks
///
/// Cardinal mismatches cost far more than diagonal ones, since a missing edge
/// connection shows up as a seam while a corner mismatch barely shows.
pub fn weighted_distance(a: ConnectivityBitmask, b: ConnectivityBitmask) -> u32 {
    let diff = ConnectivityBitmask(a.0 ^ b.0);
    Direction::ALL
        .into_iter()
        .filter(|&direction| diff.has(direction))
        .map(Direction::weight)
        .sum()
}
