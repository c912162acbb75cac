mod locks;

pub use locks::*;

use crate::{
    entry_cell, Cell, DiceValue, IllegalMove, MovementRecord, Path, PieceRef, Position, Seat,
    PIECES_PER_SEAT,
};

/// The positions of all pieces of both seats.
///
/// The lock index is derived from the positions and recomputed whenever they change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Indexed by [`Seat::index()`], then by piece index.
    pieces: [[Position; PIECES_PER_SEAT]; 2],
    locks: LockIndex,
}

struct Diff {
    seat: Seat,
    piece_idx: usize,
    path: Vec<Position>,
    evicted: Vec<usize>,
}

pub struct MoveCalculation<'a> {
    /// This struct ties together the board and its diff, to prevent any possible mixups
    board: &'a Board,
    diff: Diff,
}

impl Default for Board {
    fn default() -> Self {
        Self::new([Self::base_slots(); 2])
    }
}

impl Board {
    /// Creates a board from the positions of all pieces.
    pub fn new(pieces: [[Position; PIECES_PER_SEAT]; 2]) -> Self {
        debug_assert!(pieces.iter().flatten().all(|&position| match position {
            Position::Base(slot) => (slot as usize) < PIECES_PER_SEAT,
            Position::Track(index) => index < crate::TRACK_LEN,
            Position::HomeLane(index) => index < crate::HOME_LANE_LEN,
            Position::Home => true,
        }));
        let locks = LockIndex::compute(&pieces);
        Self { pieces, locks }
    }

    /// Every piece in its own base slot.
    pub fn base_slots() -> [Position; PIECES_PER_SEAT] {
        [
            Position::Base(0),
            Position::Base(1),
            Position::Base(2),
            Position::Base(3),
        ]
    }

    pub fn pieces(&self) -> &[[Position; PIECES_PER_SEAT]; 2] {
        &self.pieces
    }

    pub fn positions(&self, seat: Seat) -> [Position; PIECES_PER_SEAT] {
        self.pieces[seat.index()]
    }

    pub fn locks(&self) -> &LockIndex {
        &self.locks
    }

    /// True iff all pieces of the seat have reached home.
    pub fn has_won(&self, seat: Seat) -> bool {
        self.pieces[seat.index()].iter().all(|p| p.is_home())
    }

    /// Check moving a piece by the dice value and plan out the effects.
    ///
    /// This only applies the board rules, it does not know whose turn it is.
    /// The returned calculation can be executed to get the new board.
    pub fn calculate(
        &self,
        seat: Seat,
        piece_idx: usize,
        dice: DiceValue,
    ) -> Result<MoveCalculation<'_>, IllegalMove> {
        let from = *self.pieces[seat.index()]
            .get(piece_idx)
            .ok_or(IllegalMove::NoSuchPiece { piece_idx })?;
        let opponent = seat.other();

        let path = match from {
            Position::Home => return Err(IllegalMove::AlreadyHome),
            Position::Base(_) => {
                if !dice.is_six() {
                    return Err(IllegalMove::SixNeededToLeaveBase);
                }
                let index = entry_cell(seat);
                let cell = Cell::Track { index };
                if self.locks.is_locked_by(cell, opponent) {
                    return Err(IllegalMove::EntryBlocked { cell, by: opponent });
                }
                vec![Position::Track(index)]
            }
            Position::Track(_) | Position::HomeLane(_) => {
                let path = Path::new(seat, from, dice.pips());
                // A lock blocks passing through, not only landing on it
                if let Some(cell) = path
                    .cells
                    .iter()
                    .filter_map(|p| p.cell(seat))
                    .find(|&cell| self.locks.is_locked_by(cell, opponent))
                {
                    return Err(IllegalMove::PathBlocked { cell, by: opponent });
                }
                if path.is_beyond_home() {
                    return Err(IllegalMove::Overshoot {
                        unused_pips: path.unused_pips,
                    });
                }
                path.cells
            }
        };

        let destination = path.last().copied().unwrap_or(from);
        let evicted = self.evictions_at(seat, destination);

        Ok(MoveCalculation {
            board: self,
            diff: Diff {
                seat,
                piece_idx,
                path,
                evicted,
            },
        })
    }

    /// The pieces that can legally be moved by the dice value.
    pub fn movable_pieces(&self, seat: Seat, dice: DiceValue) -> Vec<usize> {
        (0..PIECES_PER_SEAT)
            .filter(|&piece_idx| self.calculate(seat, piece_idx, dice).is_ok())
            .collect()
    }

    // The opposing pieces that a piece of `seat` landing on `destination` would send back to base.
    fn evictions_at(&self, seat: Seat, destination: Position) -> Vec<usize> {
        if destination.is_safe() {
            return Vec::new();
        }
        let Some(cell) = destination.cell(seat) else {
            return Vec::new();
        };
        // A stacked cell is never captured on, whoever holds it. An opposing lock
        // cannot be landed on in the first place.
        if self.locks.is_locked(cell) {
            return Vec::new();
        }
        let opponent = seat.other();
        self.pieces[opponent.index()]
            .iter()
            .enumerate()
            .filter(|(_, p)| p.cell(opponent) == Some(cell))
            .map(|(idx, _)| idx)
            .collect()
    }
}

impl<'a> MoveCalculation<'a> {
    /// Where the piece would end up.
    pub fn destination(&self) -> Position {
        self.diff
            .path
            .last()
            .copied()
            .unwrap_or(self.board.pieces[self.diff.seat.index()][self.diff.piece_idx])
    }

    /// The positions the piece would pass through, ending with the destination.
    pub fn path(&self) -> &[Position] {
        &self.diff.path
    }

    /// The opposing pieces that would be sent back to base.
    pub fn captured_pieces(&self) -> impl Iterator<Item = PieceRef> + '_ {
        let seat = self.diff.seat.other();
        self.diff
            .evicted
            .iter()
            .map(move |&piece_idx| PieceRef { seat, piece_idx })
    }

    pub fn captures(&self) -> bool {
        !self.diff.evicted.is_empty()
    }

    /// Apply the computed changes and return the new board, plus a record of the move.
    pub fn execute(self) -> (Board, MovementRecord) {
        let destination = self.destination();
        let captured_pieces = self.captured_pieces().collect();
        let Diff {
            seat,
            piece_idx,
            path,
            evicted,
        } = self.diff;

        let mut pieces = self.board.pieces;
        pieces[seat.index()][piece_idx] = destination;
        for idx in evicted {
            pieces[seat.other().index()][idx] = Position::Base(idx as u8);
        }

        let record = MovementRecord {
            seat,
            piece_idx,
            path,
            captured_pieces,
        };
        (Board::new(pieces), record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice;

    fn board_with(placements: &[(Seat, usize, Position)]) -> Board {
        let mut pieces = [Board::base_slots(); 2];
        for &(seat, idx, position) in placements {
            pieces[seat.index()][idx] = position;
        }
        Board::new(pieces)
    }

    #[test]
    fn leaving_base_needs_a_six() {
        let board = Board::default();
        for pips in 1..=5 {
            let dice = DiceValue::new(pips).unwrap();
            assert_eq!(
                board.calculate(Seat::A, 0, dice).err(),
                Some(IllegalMove::SixNeededToLeaveBase)
            );
        }
        let plan = board.calculate(Seat::A, 0, dice!(6)).unwrap();
        assert_eq!(plan.path(), &[Position::Track(0)]);
        let (board, record) = plan.execute();
        assert_eq!(board.positions(Seat::A)[0], Position::Track(0));
        assert_eq!(record.path, vec![Position::Track(0)]);
        assert!(!record.captured());
    }

    #[test]
    fn entry_blocked_by_opposing_lock() {
        let board = board_with(&[
            (Seat::B, 0, Position::Track(0)),
            (Seat::B, 1, Position::Track(0)),
        ]);
        assert_eq!(
            board.calculate(Seat::A, 2, dice!(6)).err(),
            Some(IllegalMove::EntryBlocked {
                cell: Cell::Track { index: 0 },
                by: Seat::B
            })
        );
        assert_eq!(board.movable_pieces(Seat::A, dice!(6)), Vec::<usize>::new());
        // B's own entry cell is still open for B
        assert!(board.calculate(Seat::B, 2, dice!(6)).is_ok());
    }

    #[test]
    fn entering_onto_own_lock_is_fine() {
        let board = board_with(&[
            (Seat::B, 0, Position::Track(26)),
            (Seat::B, 1, Position::Track(26)),
        ]);
        let (board, record) = board.calculate(Seat::B, 2, dice!(6)).unwrap().execute();
        assert!(!record.captured());
        assert_eq!(board.locks().owner(Cell::Track { index: 26 }), Some(Seat::B));
    }

    #[test]
    fn opposing_lock_blocks_passing_through() {
        let board = board_with(&[
            (Seat::A, 0, Position::Track(10)),
            (Seat::A, 1, Position::Track(10)),
            (Seat::B, 0, Position::Track(5)),
        ]);
        for pips in 5..=6 {
            let dice = DiceValue::new(pips).unwrap();
            assert_eq!(
                board.calculate(Seat::B, 0, dice).err(),
                Some(IllegalMove::PathBlocked {
                    cell: Cell::Track { index: 10 },
                    by: Seat::A
                })
            );
        }
        assert!(board.calculate(Seat::B, 0, dice!(4)).is_ok());
        // The pieces still in base could enter on a six, so check with a five
        assert_eq!(board.movable_pieces(Seat::B, dice!(5)), Vec::<usize>::new());
        assert_eq!(board.movable_pieces(Seat::B, dice!(6)), vec![1, 2, 3]);
    }

    #[test]
    fn own_lock_does_not_block() {
        let board = board_with(&[
            (Seat::A, 0, Position::Track(10)),
            (Seat::A, 1, Position::Track(10)),
            (Seat::A, 2, Position::Track(7)),
        ]);
        assert!(board.calculate(Seat::A, 2, dice!(5)).is_ok());
    }

    #[test]
    fn overshoot_is_illegal() {
        let board = board_with(&[(Seat::A, 0, Position::HomeLane(2))]);
        assert_eq!(
            board.calculate(Seat::A, 0, dice!(5)).err(),
            Some(IllegalMove::Overshoot { unused_pips: 2 })
        );
        let (board, record) = board.calculate(Seat::A, 0, dice!(3)).unwrap().execute();
        assert_eq!(board.positions(Seat::A)[0], Position::Home);
        assert_eq!(record.path.len(), 3);
        assert_eq!(
            board.calculate(Seat::A, 0, dice!(1)).err(),
            Some(IllegalMove::AlreadyHome)
        );
    }

    #[test]
    fn no_such_piece() {
        assert_eq!(
            Board::default().calculate(Seat::B, 4, dice!(6)).err(),
            Some(IllegalMove::NoSuchPiece { piece_idx: 4 })
        );
    }

    #[test]
    fn capture_sends_piece_to_its_own_base_slot() {
        let board = board_with(&[
            (Seat::A, 0, Position::Track(15)),
            (Seat::B, 2, Position::Track(18)),
        ]);
        let plan = board.calculate(Seat::A, 0, dice!(3)).unwrap();
        assert!(plan.captures());
        let (board, record) = plan.execute();
        assert_eq!(board.positions(Seat::A)[0], Position::Track(18));
        assert_eq!(board.positions(Seat::B)[2], Position::Base(2));
        assert_eq!(
            record.captured_pieces,
            vec![PieceRef {
                seat: Seat::B,
                piece_idx: 2
            }]
        );
    }

    #[test]
    fn no_capture_on_safe_cell() {
        let board = board_with(&[
            (Seat::A, 0, Position::Track(5)),
            (Seat::B, 1, Position::Track(8)),
        ]);
        let (board, record) = board.calculate(Seat::A, 0, dice!(3)).unwrap().execute();
        assert!(!record.captured());
        assert_eq!(board.positions(Seat::B)[1], Position::Track(8));
        assert_eq!(board.positions(Seat::A)[0], Position::Track(8));
    }

    #[test]
    fn no_capture_on_locked_cell() {
        let board = board_with(&[
            (Seat::A, 0, Position::Track(10)),
            (Seat::A, 1, Position::Track(10)),
            (Seat::A, 2, Position::Track(7)),
            (Seat::B, 0, Position::Track(10)),
        ]);
        assert_eq!(board.locks().owner(Cell::Track { index: 10 }), Some(Seat::A));
        let plan = board.calculate(Seat::A, 2, dice!(3)).unwrap();
        assert!(!plan.captures());
        let (board, record) = plan.execute();
        assert!(!record.captured());
        assert_eq!(board.positions(Seat::B)[0], Position::Track(10));
        assert_eq!(board.positions(Seat::A)[2], Position::Track(10));
    }

    #[test]
    fn no_capture_when_entering_on_occupied_entry_cell() {
        let board = board_with(&[(Seat::B, 3, Position::Track(0))]);
        let (board, record) = board.calculate(Seat::A, 1, dice!(6)).unwrap().execute();
        assert!(!record.captured());
        assert_eq!(board.positions(Seat::B)[3], Position::Track(0));
    }

    #[test]
    fn moving_onto_own_piece_forms_lock() {
        let board = board_with(&[
            (Seat::A, 0, Position::Track(12)),
            (Seat::A, 1, Position::Track(16)),
        ]);
        assert!(board.locks().is_empty());
        let (board, _) = board.calculate(Seat::A, 0, dice!(4)).unwrap().execute();
        assert_eq!(board.locks().owner(Cell::Track { index: 16 }), Some(Seat::A));
        // Leaving again releases the lock
        let (board, _) = board.calculate(Seat::A, 1, dice!(1)).unwrap().execute();
        assert!(board.locks().is_empty());
    }

    #[test]
    fn win_requires_all_pieces_home() {
        let mut board = board_with(&[
            (Seat::B, 0, Position::Home),
            (Seat::B, 1, Position::Home),
            (Seat::B, 2, Position::Home),
            (Seat::B, 3, Position::HomeLane(4)),
        ]);
        assert!(!board.has_won(Seat::B));
        board = board.calculate(Seat::B, 3, dice!(1)).unwrap().execute().0;
        assert!(board.has_won(Seat::B));
        assert!(!board.has_won(Seat::A));
    }
}
