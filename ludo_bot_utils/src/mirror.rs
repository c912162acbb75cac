use ludo::{distance_to_home, Board, DiceValue, Position, Seat, Snapshot};

/// A move the seat in turn could make, as seen from the client side.
///
/// This is what a client highlights after rolling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOption {
    pub piece_idx: usize,
    pub from: Position,
    pub destination: Position,
    /// How many opposing pieces would be sent back to base.
    pub captures: usize,
    /// Pips the piece still needs after this move, or `None` if it is still in base.
    pub remaining_distance: Option<u8>,
}

/// Rebuilds the board from a snapshot received from the server.
pub fn mirror_board(snapshot: &Snapshot) -> Board {
    Board::new(snapshot.pieces)
}

/// Every legal move of `seat` for the dice value.
///
/// Uses the same rules as the server, so a bot only ever picks moves the
/// judge accepts. An empty result means the only option is to pass.
pub fn move_options(snapshot: &Snapshot, seat: Seat, dice: DiceValue) -> Vec<MoveOption> {
    let board = mirror_board(snapshot);
    let positions = board.positions(seat);
    let mut options = Vec::new();
    for (piece_idx, &from) in positions.iter().enumerate() {
        let Ok(plan) = board.calculate(seat, piece_idx, dice) else {
            continue;
        };
        let destination = plan.destination();
        options.push(MoveOption {
            piece_idx,
            from,
            destination,
            captures: plan.captured_pieces().count(),
            remaining_distance: distance_to_home(seat, destination),
        });
    }
    options
}
