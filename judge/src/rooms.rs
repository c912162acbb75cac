//! The room table: pairs players, assigns seats and owns one match per room.
//!
//! All mutation goes through `&mut Rooms`, so intents for a room are always
//! handled one at a time. Rooms do not share any state with each other.

use std::collections::BTreeMap;

use ludo::{Command, Event, Match, Seat, TurnOutcome};
use rand::Rng;
use tracing::debug;

use crate::SessionError;

/// Identifies a player across rooms, e.g. a connection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomId(u64);

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "room-{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub enum Room {
    Waiting { host: PlayerId },
    /// Indexed by [`Seat::index()`].
    Playing { seats: [PlayerId; 2], game: Match },
}

impl Room {
    fn has_player(&self, player: PlayerId) -> bool {
        match self {
            Room::Waiting { host } => *host == player,
            Room::Playing { seats, .. } => seats.contains(&player),
        }
    }
}

#[derive(Debug, Default)]
pub struct Rooms {
    rooms: BTreeMap<RoomId, Room>,
    next_id: u64,
}

impl Rooms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get(&self, room: RoomId) -> Option<&Room> {
        self.rooms.get(&room)
    }

    /// Open a room with the host waiting for an opponent. The host will be seat A.
    pub fn open(&mut self, host: PlayerId) -> RoomId {
        let id = RoomId(self.next_id);
        self.next_id += 1;
        self.rooms.insert(id, Room::Waiting { host });
        debug!(room = %id, host = host.0, "Opened room");
        id
    }

    /// Take the second seat of a waiting room, which starts the match.
    pub fn join(&mut self, room: RoomId, guest: PlayerId) -> Result<[PlayerId; 2], SessionError> {
        let entry = self.rooms.get_mut(&room).ok_or(SessionError::NoSuchMatch)?;
        let host = match entry {
            Room::Playing { .. } => return Err(SessionError::RoomFull),
            Room::Waiting { host } if *host == guest => return Err(SessionError::AlreadySeated),
            Room::Waiting { host } => *host,
        };
        let seats = [host, guest];
        *entry = Room::Playing {
            seats,
            game: Match::new(),
        };
        debug!(room = %room, host = host.0, guest = guest.0, "Match started");
        Ok(seats)
    }

    /// The match played in the room.
    pub fn game(&self, room: RoomId) -> Result<&Match, SessionError> {
        match self.rooms.get(&room) {
            None => Err(SessionError::NoSuchMatch),
            Some(Room::Waiting { .. }) => Err(SessionError::MatchNotStarted),
            Some(Room::Playing { game, .. }) => Ok(game),
        }
    }

    pub fn seat_of(&self, room: RoomId, player: PlayerId) -> Result<Seat, SessionError> {
        match self.rooms.get(&room) {
            None => Err(SessionError::NoSuchMatch),
            Some(Room::Waiting { .. }) => Err(SessionError::MatchNotStarted),
            Some(Room::Playing { seats, .. }) => Seat::ALL
                .into_iter()
                .find(|seat| seats[seat.index()] == player)
                .ok_or(SessionError::NotSeated),
        }
    }

    /// Forward a command of `player` to the room's match.
    ///
    /// When the command ends the match, the room is torn down.
    pub fn dispatch<R: Rng + ?Sized>(
        &mut self,
        room: RoomId,
        player: PlayerId,
        command: Command,
        rng: &mut R,
    ) -> Result<Event, SessionError> {
        let seat = self.seat_of(room, player)?;
        let Some(Room::Playing { game, .. }) = self.rooms.get_mut(&room) else {
            return Err(SessionError::NoSuchMatch);
        };
        let event = game.dispatch(seat, command, rng)?;
        if let Event::Moved {
            outcome: TurnOutcome::GameEnded { winner },
            ..
        } = event
        {
            debug!(room = %room, %winner, "Match over, closing room");
            self.rooms.remove(&room);
        }
        Ok(event)
    }

    /// Tear the room down, whatever state it is in.
    pub fn close(&mut self, room: RoomId) -> Option<Room> {
        let closed = self.rooms.remove(&room);
        if closed.is_some() {
            debug!(room = %room, "Closed room");
        }
        closed
    }

    /// The player is gone for good: close every room they are part of.
    pub fn leave(&mut self, player: PlayerId) -> Vec<RoomId> {
        let rooms: Vec<RoomId> = self
            .rooms
            .iter()
            .filter(|(_, room)| room.has_player(player))
            .map(|(&id, _)| id)
            .collect();
        for &id in &rooms {
            self.close(id);
        }
        rooms
    }
}

#[cfg(test)]
mod tests {
    use ludo::{IntentError, Phase};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const HOST: PlayerId = PlayerId(0);
    const GUEST: PlayerId = PlayerId(1);

    #[test]
    fn pairing_assigns_seats() {
        let mut rooms = Rooms::new();
        let room = rooms.open(HOST);
        assert_eq!(rooms.game(room).unwrap_err(), SessionError::MatchNotStarted);
        assert_eq!(rooms.join(room, HOST), Err(SessionError::AlreadySeated));
        assert_eq!(rooms.join(room, GUEST), Ok([HOST, GUEST]));
        assert_eq!(rooms.seat_of(room, HOST), Ok(Seat::A));
        assert_eq!(rooms.seat_of(room, GUEST), Ok(Seat::B));
        assert_eq!(rooms.seat_of(room, PlayerId(7)), Err(SessionError::NotSeated));
        assert_eq!(rooms.game(room).unwrap().phase(), Phase::AwaitingRoll);
    }

    #[test]
    fn third_player_is_turned_away() {
        let mut rooms = Rooms::new();
        let room = rooms.open(HOST);
        rooms.join(room, GUEST).unwrap();
        assert_eq!(rooms.join(room, PlayerId(2)), Err(SessionError::RoomFull));
    }

    #[test]
    fn unknown_room() {
        let mut rooms = Rooms::new();
        let mut rng = StdRng::seed_from_u64(0);
        let room = rooms.open(HOST);
        rooms.close(room);
        assert_eq!(rooms.join(room, GUEST), Err(SessionError::NoSuchMatch));
        assert_eq!(
            rooms.dispatch(room, HOST, Command::Roll, &mut rng).unwrap_err(),
            SessionError::NoSuchMatch
        );
    }

    #[test]
    fn rejections_are_relayed_without_change() {
        let mut rooms = Rooms::new();
        let mut rng = StdRng::seed_from_u64(0);
        let room = rooms.open(HOST);
        rooms.join(room, GUEST).unwrap();
        assert_eq!(
            rooms.dispatch(room, GUEST, Command::Roll, &mut rng).unwrap_err(),
            SessionError::Rejected(IntentError::NotYourTurn)
        );
        assert_eq!(
            rooms
                .dispatch(room, HOST, Command::Move { piece_idx: 0 }, &mut rng)
                .unwrap_err(),
            SessionError::Rejected(IntentError::NoRoll)
        );
        assert!(matches!(
            rooms.dispatch(room, HOST, Command::Roll, &mut rng),
            Ok(Event::Rolled { seat: Seat::A, .. })
        ));
    }

    #[test]
    fn rooms_are_independent() {
        let mut rooms = Rooms::new();
        let mut rng = StdRng::seed_from_u64(3);
        let first = rooms.open(HOST);
        rooms.join(first, GUEST).unwrap();
        let second = rooms.open(PlayerId(2));
        rooms.join(second, PlayerId(3)).unwrap();
        rooms.dispatch(first, HOST, Command::Roll, &mut rng).unwrap();
        assert!(rooms.game(first).unwrap().pending_dice().is_some());
        assert!(rooms.game(second).unwrap().pending_dice().is_none());
    }

    #[test]
    fn leaving_tears_down() {
        let mut rooms = Rooms::new();
        let room = rooms.open(HOST);
        rooms.join(room, GUEST).unwrap();
        let other = rooms.open(PlayerId(5));
        assert_eq!(rooms.leave(GUEST), vec![room]);
        assert!(rooms.get(room).is_none());
        assert!(rooms.get(other).is_some());
        assert_eq!(rooms.len(), 1);
    }

    #[test]
    fn finished_match_closes_room() {
        let mut rooms = Rooms::new();
        let mut rng = StdRng::seed_from_u64(11);
        let room = rooms.open(HOST);
        let seats = rooms.join(room, GUEST).unwrap();
        // Play random legal moves until the room disappears
        for _ in 0..100_000 {
            let Ok(game) = rooms.game(room) else {
                break;
            };
            let player = seats[game.turn().index()];
            let command = if game.pending_dice().is_none() {
                Command::Roll
            } else {
                match game.legal_moves().first() {
                    Some(&piece_idx) => Command::Move { piece_idx },
                    None => Command::Pass,
                }
            };
            rooms.dispatch(room, player, command, &mut rng).unwrap();
        }
        assert_eq!(rooms.game(room).unwrap_err(), SessionError::NoSuchMatch);
        assert!(rooms.is_empty());
    }
}
