use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Board, Command, DiceValue, Event, IntentError, LockIndex, MovementRecord, Position, Seat,
    Snapshot, PIECES_PER_SEAT,
};

/// Where a match stands between two intents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The seat in turn has to roll.
    AwaitingRoll,
    /// The seat in turn has rolled and has to move a piece or pass.
    AwaitingMove { dice: DiceValue },
    /// Someone has all pieces home. No more intents are accepted.
    Finished { winner: Seat },
}

/// Summarizes who acts next after a move or pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "next", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// The same seat rolls again, because of a six or a capture.
    ExtraTurn { seat: Seat },
    /// The other seat is in turn now.
    TurnPassed { to: Seat },
    GameEnded { winner: Seat },
}

/// The state of one match, i.e. everything the server knows about a room's game.
///
/// It is only changed by the sequence roll, then move or pass. Every method
/// that returns an error leaves the match untouched.
#[derive(Clone, Debug)]
pub struct Match {
    board: Board,
    turn: Seat,
    phase: Phase,
    /// Whether the last applied move sent an opposing piece back to base.
    last_move_captured: bool,
    /// Number of completed moves and passes.
    turns_played: usize,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// Creates a new match. All pieces start in their base, and seat A rolls first.
    pub fn new() -> Self {
        Self::from_board(Board::default(), Seat::A)
    }

    /// Creates a match from an arbitrary position, with `turn` about to roll.
    pub fn from_board(board: Board, turn: Seat) -> Self {
        let phase = match Seat::ALL.into_iter().find(|&seat| board.has_won(seat)) {
            Some(winner) => Phase::Finished { winner },
            None => Phase::AwaitingRoll,
        };
        Self {
            board,
            turn,
            phase,
            last_move_captured: false,
            turns_played: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending_dice(&self) -> Option<DiceValue> {
        match self.phase {
            Phase::AwaitingMove { dice } => Some(dice),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<Seat> {
        match self.phase {
            Phase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn positions(&self, seat: Seat) -> [Position; PIECES_PER_SEAT] {
        self.board.positions(seat)
    }

    pub fn locks(&self) -> &LockIndex {
        self.board.locks()
    }

    pub fn last_move_captured(&self) -> bool {
        self.last_move_captured
    }

    pub fn turns_played(&self) -> usize {
        self.turns_played
    }

    /// True iff all pieces of the seat are home.
    pub fn has_won(&self, seat: Seat) -> bool {
        self.board.has_won(seat)
    }

    /// The pieces the seat in turn may move with the pending dice value.
    ///
    /// Empty when nothing has been rolled, in which case passing is not allowed either.
    pub fn legal_moves(&self) -> Vec<usize> {
        match self.pending_dice() {
            Some(dice) => self.board.movable_pieces(self.turn, dice),
            None => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            turn: self.turn,
            dice: self.pending_dice(),
            pieces: *self.board.pieces(),
            locks: self.board.locks().to_vec(),
            winner: self.winner(),
        }
    }

    /// Roll the dice for `seat`.
    pub fn roll<R: Rng + ?Sized>(
        &mut self,
        seat: Seat,
        rng: &mut R,
    ) -> Result<DiceValue, IntentError> {
        self.check_can_roll(seat)?;
        let dice = DiceValue::roll(rng);
        self.roll_with(seat, dice)
    }

    /// Like [`Self::roll()`], but with a dice value determined elsewhere.
    pub fn roll_with(&mut self, seat: Seat, dice: DiceValue) -> Result<DiceValue, IntentError> {
        self.check_can_roll(seat)?;
        debug!(%seat, pips = dice.pips(), "Rolled");
        self.phase = Phase::AwaitingMove { dice };
        Ok(dice)
    }

    /// Decide whether `seat` may move the piece with the pending dice value. Does not change anything.
    pub fn validate(&self, seat: Seat, piece_idx: usize) -> Result<(), IntentError> {
        let dice = self.pending_dice_of(seat)?;
        self.board.calculate(seat, piece_idx, dice)?;
        Ok(())
    }

    /// Move a piece of `seat` by the pending dice value.
    ///
    /// Win detection happens before the turn changes hands, so a winning
    /// move always reports [`TurnOutcome::GameEnded`].
    pub fn play_move(
        &mut self,
        seat: Seat,
        piece_idx: usize,
    ) -> Result<(MovementRecord, TurnOutcome), IntentError> {
        let dice = self.pending_dice_of(seat)?;
        let (board, record) = self.board.calculate(seat, piece_idx, dice)?.execute();
        self.board = board;
        self.last_move_captured = record.captured();
        self.turns_played += 1;
        debug!(
            %seat,
            piece_idx,
            to = %record.path.last().copied().unwrap_or(Position::Home),
            captured = record.captured_pieces.len(),
            "Moved"
        );

        let outcome = if self.board.has_won(seat) {
            self.phase = Phase::Finished { winner: seat };
            TurnOutcome::GameEnded { winner: seat }
        } else {
            self.end_turn(dice.is_six() || record.captured())
        };
        trace!(?outcome);
        Ok((record, outcome))
    }

    /// Give up the pending roll. The turn always goes to the other seat.
    ///
    /// This does not check whether a move would have been possible.
    pub fn pass(&mut self, seat: Seat) -> Result<TurnOutcome, IntentError> {
        self.pending_dice_of(seat)?;
        self.last_move_captured = false;
        self.turns_played += 1;
        debug!(%seat, "Passed");
        Ok(self.end_turn(false))
    }

    /// Execute a single command for `seat`.
    pub fn dispatch<R: Rng + ?Sized>(
        &mut self,
        seat: Seat,
        command: Command,
        rng: &mut R,
    ) -> Result<Event, IntentError> {
        match command {
            Command::Roll => self.roll(seat, rng).map(|dice| Event::Rolled { seat, dice }),
            Command::Move { piece_idx } => self
                .play_move(seat, piece_idx)
                .map(|(record, outcome)| Event::Moved { record, outcome }),
            Command::Pass => self.pass(seat).map(|outcome| Event::Passed { seat, outcome }),
        }
    }

    fn check_can_roll(&self, seat: Seat) -> Result<(), IntentError> {
        match self.phase {
            Phase::Finished { winner } => Err(IntentError::MatchFinished { winner }),
            // Rolling again before using the dice counts as acting out of turn
            Phase::AwaitingMove { .. } => Err(IntentError::NotYourTurn),
            Phase::AwaitingRoll if seat != self.turn => Err(IntentError::NotYourTurn),
            Phase::AwaitingRoll => Ok(()),
        }
    }

    fn pending_dice_of(&self, seat: Seat) -> Result<DiceValue, IntentError> {
        match self.phase {
            Phase::Finished { winner } => Err(IntentError::MatchFinished { winner }),
            _ if seat != self.turn => Err(IntentError::NotYourTurn),
            Phase::AwaitingRoll => Err(IntentError::NoRoll),
            Phase::AwaitingMove { dice } => Ok(dice),
        }
    }

    // The dice is cleared whether or not the seat keeps the turn.
    fn end_turn(&mut self, repeat: bool) -> TurnOutcome {
        self.phase = Phase::AwaitingRoll;
        if repeat {
            TurnOutcome::ExtraTurn { seat: self.turn }
        } else {
            self.turn = self.turn.other();
            TurnOutcome::TurnPassed { to: self.turn }
        }
    }
}
