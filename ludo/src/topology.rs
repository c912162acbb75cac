//! The geometry of the board: where pieces are, and where they go next.

use serde::{Deserialize, Serialize};

use crate::Seat;

/// Number of cells on the circular track shared by both seats.
pub const TRACK_LEN: u8 = 52;
/// Number of cells in each seat's private home lane.
pub const HOME_LANE_LEN: u8 = 5;
/// Number of pieces each seat plays with.
pub const PIECES_PER_SEAT: usize = 4;

/// Track cells on which a piece can never be captured.
///
/// These are the entry cells of all four colours of a physical board and
/// the four star cells between them, so both seats share them.
pub const SAFE_CELLS: [u8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// The location of a single piece.
///
/// Home lane indices are relative to the seat owning the piece, so a
/// position only has a meaning together with a [`Seat`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Position {
    /// Not yet entered. The slot is the index of the piece.
    Base(u8),
    /// On the shared track, `0..TRACK_LEN`.
    Track(u8),
    /// In the seat's home lane, `0..HOME_LANE_LEN`.
    HomeLane(u8),
    /// Finished.
    Home,
}

/// The kinds of [`Position`], in the order a piece passes through them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PositionKind {
    Base,
    Track,
    HomeLane,
    Home,
}

/// A physical cell that can hold pieces of both seats, or be locked.
///
/// Bases and homes are not cells in this sense.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Track { index: u8 },
    HomeLane { seat: Seat, index: u8 },
}

impl Position {
    pub fn kind(self) -> PositionKind {
        match self {
            Position::Base(_) => PositionKind::Base,
            Position::Track(_) => PositionKind::Track,
            Position::HomeLane(_) => PositionKind::HomeLane,
            Position::Home => PositionKind::Home,
        }
    }

    /// The cell this position occupies for a piece of `seat`, if any.
    pub fn cell(self, seat: Seat) -> Option<Cell> {
        match self {
            Position::Track(index) => Some(Cell::Track { index }),
            Position::HomeLane(index) => Some(Cell::HomeLane { seat, index }),
            Position::Base(_) | Position::Home => None,
        }
    }

    /// Capture never happens here.
    pub fn is_safe(self) -> bool {
        matches!(self, Position::Track(index) if SAFE_CELLS.contains(&index))
    }

    pub fn is_home(self) -> bool {
        self == Position::Home
    }

    pub fn is_base(self) -> bool {
        matches!(self, Position::Base(_))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Base(slot) => write!(f, "base {}", slot),
            Position::Track(index) => write!(f, "track {}", index),
            Position::HomeLane(index) => write!(f, "home lane {}", index),
            Position::Home => write!(f, "home"),
        }
    }
}

/// The track cell a piece of this seat lands on when leaving its base.
pub fn entry_cell(seat: Seat) -> u8 {
    match seat {
        Seat::A => 0,
        Seat::B => 26,
    }
}

/// The last track cell before a piece of this seat turns into its home lane.
pub fn turning_point(seat: Seat) -> u8 {
    (entry_cell(seat) + TRACK_LEN - 2) % TRACK_LEN
}

/// The position one pip further along the route of `seat`.
///
/// Pieces in base or at home have no successor.
pub fn next_position(seat: Seat, position: Position) -> Option<Position> {
    match position {
        Position::Base(_) | Position::Home => None,
        Position::Track(index) if index == turning_point(seat) => Some(Position::HomeLane(0)),
        Position::Track(index) => Some(Position::Track((index + 1) % TRACK_LEN)),
        Position::HomeLane(index) if index + 1 < HOME_LANE_LEN => {
            Some(Position::HomeLane(index + 1))
        }
        Position::HomeLane(_) => Some(Position::Home),
    }
}

/// The number of pips still needed to bring a piece home.
///
/// Returns `None` for pieces in base.
pub fn distance_to_home(seat: Seat, position: Position) -> Option<u8> {
    match position {
        Position::Base(_) => None,
        Position::Track(index) => {
            let to_turn = (turning_point(seat) + TRACK_LEN - index) % TRACK_LEN;
            Some(to_turn + HOME_LANE_LEN + 1)
        }
        Position::HomeLane(index) => Some(HOME_LANE_LEN - index),
        Position::Home => Some(0),
    }
}

/// The positions a piece passes through for one dice roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    /// Every position after the start, in order, ending with the landing position.
    pub cells: Vec<Position>,
    /// Pips that were left over because home was reached early.
    pub unused_pips: u8,
}

impl Path {
    /// Build the path of a piece of `seat` standing on `from`, moving `pips` steps.
    ///
    /// Accumulation stops as soon as home is reached, so the path never
    /// contains more than `pips` positions. For pieces in base or at home
    /// the path is empty and no pip is used.
    pub fn new(seat: Seat, from: Position, pips: u8) -> Self {
        let mut cells = Vec::with_capacity(pips as usize);
        let mut current = from;
        let mut remaining = pips;
        while remaining > 0 {
            let Some(next) = next_position(seat, current) else {
                break;
            };
            cells.push(next);
            current = next;
            remaining -= 1;
            if next.is_home() {
                break;
            }
        }
        Self {
            cells,
            unused_pips: remaining,
        }
    }

    /// Whether the roll would carry the piece past home.
    pub fn is_beyond_home(&self) -> bool {
        self.unused_pips > 0
    }

    /// The landing position, if the piece moved at all.
    pub fn destination(&self) -> Option<Position> {
        self.cells.last().copied()
    }
}
