use crate::{Position, Seat, HOME_LANE_LEN, PIECES_PER_SEAT, TRACK_LEN};

impl quickcheck::Arbitrary for Seat {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Seat::ALL).unwrap()
    }
}

impl quickcheck::Arbitrary for Position {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        // Weighted towards the track, which is where most of the interesting moves happen
        match u8::arbitrary(g) % 8 {
            0 => Position::Base(u8::arbitrary(g) % PIECES_PER_SEAT as u8),
            1 => Position::Home,
            2 | 3 => Position::HomeLane(u8::arbitrary(g) % HOME_LANE_LEN),
            _ => Position::Track(u8::arbitrary(g) % TRACK_LEN),
        }
    }
}
