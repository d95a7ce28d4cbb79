//! Constant-time sprite estimate from the cardinal bits alone

use crate::autotile::bitmask::{ConnectivityBitmask, Direction};
use crate::autotile::matcher::SpriteCoordinate;

/// Canonical shape of a cell's edge connections
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardinalShape {
    /// No edge connections
    Isolated,
    /// Dead end opening upwards
    StubTop,
    /// Dead end opening right
    StubRight,
    /// Dead end opening downwards
    StubBottom,
    /// Dead end opening left
    StubLeft,
    /// Straight top to bottom
    Vertical,
    /// Straight left to right
    Horizontal,
    /// Turn joining top and right
    CornerTopRight,
    /// Turn joining right and bottom
    CornerRightBottom,
    /// Turn joining bottom and left
    CornerBottomLeft,
    /// Turn joining left and top
    CornerLeftTop,
    /// Junction open everywhere but left
    TeeNoLeft,
    /// Junction open everywhere but top
    TeeNoTop,
    /// Junction open everywhere but right
    TeeNoRight,
    /// Junction open everywhere but bottom
    TeeNoBottom,
    /// Open on all four edges
    Cross,
}

impl CardinalShape {
    /// Classify a bitmask by its cardinal bits
    pub const fn classify(mask: ConnectivityBitmask) -> Self {
        let top = mask.has(Direction::Top);
        let right = mask.has(Direction::Right);
        let bottom = mask.has(Direction::Bottom);
        let left = mask.has(Direction::Left);

        match (top, right, bottom, left) {
            (false, false, false, false) => Self::Isolated,
            (true, false, false, false) => Self::StubTop,
            (false, true, false, false) => Self::StubRight,
            (false, false, true, false) => Self::StubBottom,
            (false, false, false, true) => Self::StubLeft,
            (true, false, true, false) => Self::Vertical,
            (false, true, false, true) => Self::Horizontal,
            (true, true, false, false) => Self::CornerTopRight,
            (false, true, true, false) => Self::CornerRightBottom,
            (false, false, true, true) => Self::CornerBottomLeft,
            (true, false, false, true) => Self::CornerLeftTop,
            (true, true, true, false) => Self::TeeNoLeft,
            (false, true, true, true) => Self::TeeNoTop,
            (true, false, true, true) => Self::TeeNoRight,
            (true, true, false, true) => Self::TeeNoBottom,
            (true, true, true, true) => Self::Cross,
        }
    }

    /// Column of this shape in row 0 of the sheet
    pub const fn column(self) -> u32 {
        match self {
            Self::Isolated => 0,
            Self::StubTop => 1,
            Self::StubRight => 2,
            Self::StubBottom => 3,
            Self::StubLeft => 4,
            Self::Vertical => 5,
            Self::Horizontal => 6,
            Self::CornerTopRight => 7,
            Self::CornerRightBottom => 8,
            Self::CornerBottomLeft => 9,
            Self::CornerLeftTop => 10,
            Self::TeeNoLeft => 11,
            Self::TeeNoTop => 12,
            Self::TeeNoRight => 13,
            Self::TeeNoBottom => 14,
            Self::Cross => 15,
        }
    }
}

/// Placeholder sprite used until the precise lookup has resolved
///
/// Columns 12-15 lie past the 12-column reference sheet; renderers treat them
/// as missing cells.
pub const fn estimate(mask: ConnectivityBitmask) -> SpriteCoordinate {
    SpriteCoordinate::new(CardinalShape::classify(mask).column(), 0)
}
