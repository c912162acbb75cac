use crate::{entry_cell, Board, Position, Seat, SAFE_CELLS, TRACK_LEN};

fn seat_symbol(seat: Seat) -> char {
    match seat {
        Seat::A => 'a',
        Seat::B => 'b',
    }
}

/// Render the board as a few lines of text, for logging.
///
/// The track is drawn as a single row of 52 cells starting at cell 0. Each
/// cell shows the seat holding it (upper case when locked), `x` when both
/// seats share it, `*` for an empty safe cell, `>` for an empty entry cell and
/// `·` otherwise.
pub fn visualize_board(board: &Board) -> String {
    let mut track = String::with_capacity(TRACK_LEN as usize * 2);
    for index in 0..TRACK_LEN {
        let occupants: Vec<Seat> = Seat::ALL
            .into_iter()
            .filter(|&seat| {
                board
                    .positions(seat)
                    .iter()
                    .any(|&p| p == Position::Track(index))
            })
            .collect();
        let symbol = match occupants[..] {
            [_, _] => 'x',
            [seat] => {
                let locked = board
                    .locks()
                    .is_locked_by(crate::Cell::Track { index }, seat);
                if locked {
                    seat_symbol(seat).to_ascii_uppercase()
                } else {
                    seat_symbol(seat)
                }
            }
            _ if Seat::ALL.iter().any(|&s| entry_cell(s) == index) => '>',
            _ if SAFE_CELLS.contains(&index) => '*',
            _ => '·',
        };
        track.push(symbol);
    }

    let mut result = format!("track │{}│", track);
    for seat in Seat::ALL {
        let positions = board.positions(seat);
        let in_base = positions.iter().filter(|p| p.is_base()).count();
        let at_home = positions.iter().filter(|p| p.is_home()).count();
        let lane: String = (0..crate::HOME_LANE_LEN)
            .map(|index| {
                match positions
                    .iter()
                    .filter(|&&p| p == Position::HomeLane(index))
                    .count()
                {
                    0 => '·',
                    1 => seat_symbol(seat),
                    _ => seat_symbol(seat).to_ascii_uppercase(),
                }
            })
            .collect();
        result += &format!(
            "\nseat {} base {} lane │{}│ home {}",
            seat, in_base, lane, at_home
        );
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board() {
        let text = visualize_board(&Board::default());
        let first_line = text.lines().next().unwrap();
        assert!(first_line.starts_with("track │>"));
        assert_eq!(first_line.chars().filter(|&c| c == '>').count(), 2);
        assert!(text.contains("seat A base 4 lane │·····│ home 0"));
    }

    #[test]
    fn shows_locks_and_lanes() {
        let mut pieces = [Board::base_slots(); 2];
        pieces[0][0] = Position::Track(3);
        pieces[0][1] = Position::Track(3);
        pieces[1][0] = Position::HomeLane(1);
        pieces[1][1] = Position::Home;
        let text = visualize_board(&Board::new(pieces));
        assert_eq!(text.lines().next().unwrap().chars().nth(10), Some('A'));
        assert!(text.contains("seat B base 2 lane │·b···│ home 1"));
    }

    #[test]
    fn shared_safe_cell() {
        let mut pieces = [Board::base_slots(); 2];
        pieces[0][0] = Position::Track(8);
        pieces[1][0] = Position::Track(8);
        pieces[1][1] = Position::Track(9);
        let text = visualize_board(&Board::new(pieces));
        let track: Vec<char> = text.lines().next().unwrap().chars().skip(7).collect();
        assert_eq!(track[8], 'x');
        assert_eq!(track[9], 'b');
    }
}
