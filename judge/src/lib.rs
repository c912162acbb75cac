mod error;
mod game;
mod player;
mod recording;
mod rooms;
mod tournament;
pub use error::*;
pub use game::*;
pub use player::*;
pub use recording::*;
pub use rooms::*;
pub use tournament::*;

/// Everything that persists between games of a tournament.
pub struct Config {
    pub rng: rand::rngs::StdRng,
    pub recorder: Option<recording::Recorder>,
    pub rooms: rooms::Rooms,
    /// Games with more moves and passes than this are abandoned.
    pub max_turns: usize,
}
