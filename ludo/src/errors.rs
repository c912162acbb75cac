use crate::{Cell, Seat};

/// The error type for [`Board::calculate()`](crate::Board::calculate), i.e. for moving a single piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    NoSuchPiece { piece_idx: usize },
    AlreadyHome,
    SixNeededToLeaveBase,
    EntryBlocked { cell: Cell, by: Seat },
    PathBlocked { cell: Cell, by: Seat },
    Overshoot { unused_pips: u8 },
}

impl IllegalMove {
    /// A stable, machine-readable name for this kind of error.
    pub fn tag(&self) -> &'static str {
        match self {
            IllegalMove::NoSuchPiece { .. } => "no_such_piece",
            IllegalMove::AlreadyHome => "already_home",
            IllegalMove::SixNeededToLeaveBase => "six_needed_to_leave_base",
            IllegalMove::EntryBlocked { .. } => "entry_blocked",
            IllegalMove::PathBlocked { .. } => "path_blocked",
            IllegalMove::Overshoot { .. } => "overshoot",
        }
    }
}

impl std::error::Error for IllegalMove {}

fn describe_cell(cell: &Cell) -> String {
    match cell {
        Cell::Track { index } => format!("track cell {}", index),
        Cell::HomeLane { seat, index } => format!("home lane cell {} of seat {}", index, seat),
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::NoSuchPiece { piece_idx } =>
                write!(f, "There is no piece with index {}", piece_idx),
            IllegalMove::AlreadyHome =>
                write!(f, "The piece has already reached home"),
            IllegalMove::SixNeededToLeaveBase =>
                write!(f, "A piece can only leave its base with a six"),
            IllegalMove::EntryBlocked { cell, by } =>
                write!(f, "The entry cell ({}) is locked by seat {}", describe_cell(cell), by),
            IllegalMove::PathBlocked { cell, by } =>
                write!(
                    f,
                    "The path crosses {}, which is locked by seat {}",
                    describe_cell(cell),
                    by
                ),
            IllegalMove::Overshoot { unused_pips } =>
                write!(f, "The roll overshoots home by {} pips", unused_pips),
        }
    }
}

/// The error type for an intent sent to a [`Match`](crate::Match).
///
/// None of these change the state of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentError {
    /// Another seat is in turn, or this seat has already rolled.
    NotYourTurn,
    /// A move or pass was attempted before rolling.
    NoRoll,
    /// The match already has a winner.
    MatchFinished { winner: Seat },
    IllegalMove(IllegalMove),
}

impl IntentError {
    /// A stable, machine-readable name for this kind of error.
    pub fn tag(&self) -> &'static str {
        match self {
            IntentError::NotYourTurn => "not_your_turn",
            IntentError::NoRoll => "no_roll",
            IntentError::MatchFinished { .. } => "match_finished",
            IntentError::IllegalMove(err) => err.tag(),
        }
    }
}

impl From<IllegalMove> for IntentError {
    fn from(err: IllegalMove) -> Self {
        IntentError::IllegalMove(err)
    }
}

impl std::error::Error for IntentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IntentError::IllegalMove(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IntentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntentError::NotYourTurn => write!(f, "It is not your turn to do that"),
            IntentError::NoRoll => write!(f, "The dice has not been rolled yet"),
            IntentError::MatchFinished { winner } => {
                write!(f, "The match is over, seat {} has won", winner)
            }
            IntentError::IllegalMove(_) => write!(f, "Illegal move"),
        }
    }
}
