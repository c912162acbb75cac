pub use board::*;
pub use dice::*;
pub use errors::*;
pub use game::*;
pub use protocol::*;
pub use seat::*;
pub use topology::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod dice;
mod errors;
mod game;
mod protocol;
mod seat;
mod topology;
mod visualization;
