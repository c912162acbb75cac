use ludo::IntentError;

/// The error type for the room table.
#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    /// Both seats of the room are taken.
    RoomFull,
    NoSuchMatch,
    /// The room is still waiting for a second player.
    MatchNotStarted,
    /// The player has no seat in this room.
    NotSeated,
    /// The player tried to take both seats.
    AlreadySeated,
    /// The match rejected the intent.
    Rejected(IntentError),
}

impl From<IntentError> for SessionError {
    fn from(err: IntentError) -> Self {
        SessionError::Rejected(err)
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::RoomFull => write!(f, "The room already has two players"),
            SessionError::NoSuchMatch => write!(f, "There is no such room"),
            SessionError::MatchNotStarted => {
                write!(f, "The room is still waiting for a second player")
            }
            SessionError::NotSeated => write!(f, "The player does not have a seat in this room"),
            SessionError::AlreadySeated => write!(f, "The player already has a seat in this room"),
            SessionError::Rejected(_) => write!(f, "The intent was rejected"),
        }
    }
}

#[derive(Debug)]
/// Why a player lost a game by breaking the rules.
pub enum IllegalAction {
    Rejected(IntentError),
    /// Passing is only allowed when no piece can move.
    PassedDespiteLegalMove { movable_pieces: Vec<usize> },
}

impl std::error::Error for IllegalAction {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalAction::Rejected(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalAction::Rejected(err) => write!(f, "Intent rejected ({})", err.tag()),
            IllegalAction::PassedDespiteLegalMove { movable_pieces } => write!(
                f,
                "Passed although these pieces could move: {:?}",
                movable_pieces
            ),
        }
    }
}
