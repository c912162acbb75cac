use serde::{Deserialize, Serialize};

use crate::{DiceValue, IntentError, LockedCell, Position, Seat, TurnOutcome, PIECES_PER_SEAT};

/// Identifies a single piece in a match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceRef {
    pub seat: Seat,
    #[serde(rename = "pieceIndex")]
    pub piece_idx: usize,
}

/// What happened during one move, for broadcasting to both seats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementRecord {
    pub seat: Seat,
    #[serde(rename = "pieceIndex")]
    pub piece_idx: usize,
    /// Every position the piece passed through, ending with where it landed.
    pub path: Vec<Position>,
    /// The opposing pieces that were sent back to their base.
    pub captured_pieces: Vec<PieceRef>,
}

impl MovementRecord {
    pub fn captured(&self) -> bool {
        !self.captured_pieces.is_empty()
    }
}

/// An intent sent by the seat in turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Roll,
    Move {
        #[serde(rename = "pieceIndex")]
        piece_idx: usize,
    },
    /// Give up the roll because no piece can move.
    Pass,
}

/// The confirmed effect of a [`Command`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Rolled {
        seat: Seat,
        dice: DiceValue,
    },
    Moved {
        record: MovementRecord,
        outcome: TurnOutcome,
    },
    Passed {
        seat: Seat,
        outcome: TurnOutcome,
    },
}

/// A read-only view of a match, for sending to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Whose turn it is.
    pub turn: Seat,
    /// The dice value waiting to be used, if the seat in turn has rolled.
    #[serde(default)]
    pub dice: Option<DiceValue>,
    /// Indexed by seat (A first), then piece index.
    pub pieces: [[Position; PIECES_PER_SEAT]; 2],
    pub locks: Vec<LockedCell>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub winner: Option<Seat>,
}

/// A rejected intent, relayed only to the seat that sent it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Machine-readable reason, e.g. `"path_blocked"`.
    pub tag: String,
    /// Human-readable reason.
    pub reason: String,
}

impl From<&IntentError> for Rejection {
    fn from(err: &IntentError) -> Self {
        let reason = match err {
            IntentError::IllegalMove(inner) => format!("{}: {}", err, inner),
            _ => err.to_string(),
        };
        Rejection {
            tag: String::from(err.tag()),
            reason,
        }
    }
}

/// Request for a bot to do something.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame { seat: Seat },
    /// It's the bot's turn and it should roll the dice.
    ///
    /// The response should be [`Command::Roll`].
    Roll { snapshot: Snapshot },
    /// The bot rolled `dice` and should pick a piece to move.
    ///
    /// The response should be [`Command::Move`], or [`Command::Pass`] if no
    /// piece can be moved.
    Move { snapshot: Snapshot, dice: DiceValue },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Okay();
