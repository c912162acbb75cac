use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Cell, Position, Seat, PIECES_PER_SEAT};

/// The cells currently stacked by two or more pieces of the same seat.
///
/// This is always derived from the piece positions, see [`LockIndex::compute()`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LockIndex {
    locks: BTreeMap<Cell, Seat>,
}

/// A single entry of a [`LockIndex`], as it appears on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedCell {
    pub cell: Cell,
    pub seat: Seat,
}

impl LockIndex {
    /// Derive the locks from the positions of all pieces, indexed by [`Seat::index()`].
    ///
    /// A cell is locked iff exactly one seat has at least two pieces on it.
    /// Pieces in base or at home are ignored.
    pub fn compute(pieces: &[[Position; PIECES_PER_SEAT]; 2]) -> Self {
        let mut counts: BTreeMap<Cell, [u8; 2]> = BTreeMap::new();
        for seat in Seat::ALL {
            for position in pieces[seat.index()] {
                if let Some(cell) = position.cell(seat) {
                    counts.entry(cell).or_default()[seat.index()] += 1;
                }
            }
        }

        let locks = counts
            .into_iter()
            .filter_map(|(cell, [a, b])| match (a >= 2, b >= 2) {
                (true, false) => Some((cell, Seat::A)),
                (false, true) => Some((cell, Seat::B)),
                _ => None,
            })
            .collect();
        Self { locks }
    }

    /// The seat holding a lock on `cell`, if any.
    pub fn owner(&self, cell: Cell) -> Option<Seat> {
        self.locks.get(&cell).copied()
    }

    pub fn is_locked(&self, cell: Cell) -> bool {
        self.locks.contains_key(&cell)
    }

    pub fn is_locked_by(&self, cell: Cell, seat: Seat) -> bool {
        self.owner(cell) == Some(seat)
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// The locks in cell order.
    pub fn iter(&self) -> impl Iterator<Item = LockedCell> + '_ {
        self.locks
            .iter()
            .map(|(&cell, &seat)| LockedCell { cell, seat })
    }

    pub fn to_vec(&self) -> Vec<LockedCell> {
        self.iter().collect()
    }
}
