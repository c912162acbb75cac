use ludo::{visualize_board, Command, Event, Match, Okay, Phase, Request, Seat, TurnOutcome};
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::error::IllegalAction;
use crate::player::Player;
use crate::rooms::RoomId;
use crate::{Config, SessionError};

pub enum GameResult {
    WonByPlayer {
        player_idx: usize,
        seat: Seat,
        /// Moves and passes of both seats, including the winning move.
        turns: usize,
    },
    /// Nobody won within the turn limit.
    Unfinished,
    IllegalMoveByPlayer { player_idx: usize, err: IllegalAction },
}

impl GameResult {
    pub fn describe(&self, player_names: &[&str; 2]) -> String {
        match self {
            GameResult::WonByPlayer {
                player_idx,
                seat,
                turns,
            } => format!(
                "{} won as seat {} after {} turns",
                player_names[*player_idx], seat, turns
            ),
            GameResult::Unfinished => String::from("unfinished"),
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                format!("illegal move by {}: {}", player_names[*player_idx], err)
            }
        }
    }
}

/// Passing is only allowed when the seat in turn has no piece it could move.
///
/// The match itself accepts any pass, so the judge has to check this.
pub fn check_pass(game: &Match, command: Command) -> Result<(), IllegalAction> {
    if command != Command::Pass {
        return Ok(());
    }
    let movable_pieces = game.legal_moves();
    if movable_pieces.is_empty() {
        Ok(())
    } else {
        Err(IllegalAction::PassedDespiteLegalMove { movable_pieces })
    }
}

/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game(
    config: &mut Config,
    player_1: &mut Player,
    player_2: &mut Player,
) -> anyhow::Result<GameResult> {
    // Assign the seats randomly. Seat A moves first.
    let mut players = [player_1, player_2];
    let seat_a_idx = *[0, 1].choose(&mut config.rng).unwrap_or(&0);
    // Indexed by seat, contains the index into `players`
    let player_idx_of_seat = [seat_a_idx, 1 - seat_a_idx];

    let room = config.rooms.open(players[seat_a_idx].id);
    config.rooms.join(room, players[1 - seat_a_idx].id)?;

    // Inform the players about the new game, so that they can reset their state
    for seat in Seat::ALL {
        let player = &mut players[player_idx_of_seat[seat.index()]];
        let _: Okay = player.perform_request(&mut config.recorder, &Request::NewGame { seat })?;
    }

    let result = run_room(config, room, &mut players, player_idx_of_seat);
    // A room that is still open after the game has ended is torn down here
    config.rooms.close(room);
    let result = result?;

    if let Some(rec) = &mut config.recorder {
        let names = [players[0].name.as_str(), players[1].name.as_str()];
        let path = rec.write_game_recording(&result.describe(&names))?;
        debug!(path = %path.display(), "Wrote recording");
    }
    Ok(result)
}

fn run_room(
    config: &mut Config,
    room: RoomId,
    players: &mut [&mut Player; 2],
    player_idx_of_seat: [usize; 2],
) -> anyhow::Result<GameResult> {
    loop {
        let game = config.rooms.game(room)?;
        let turns = game.turns_played();
        if turns >= config.max_turns {
            debug!(room = %room, turns, "Turn limit reached");
            return Ok(GameResult::Unfinished);
        }
        let seat = game.turn();
        let player_idx = player_idx_of_seat[seat.index()];
        let snapshot = game.snapshot();

        let command: Command = match game.phase() {
            Phase::AwaitingRoll => {
                trace!("\n{}", visualize_board(game.board()));
                let request = Request::Roll { snapshot };
                players[player_idx].perform_request(&mut config.recorder, &request)?
            }
            Phase::AwaitingMove { dice } => {
                let command = players[player_idx]
                    .perform_request(&mut config.recorder, &Request::Move { snapshot, dice })?;
                // Re-borrow, the room table was not touched in between
                let game = config.rooms.game(room)?;
                if let Err(err) = check_pass(game, command) {
                    return Ok(GameResult::IllegalMoveByPlayer { player_idx, err });
                }
                command
            }
            Phase::Finished { winner } => {
                return Ok(GameResult::WonByPlayer {
                    player_idx: player_idx_of_seat[winner.index()],
                    seat: winner,
                    turns,
                });
            }
        };

        let player_id = players[player_idx].id;
        match config
            .rooms
            .dispatch(room, player_id, command, &mut config.rng)
        {
            Ok(Event::Moved {
                outcome: TurnOutcome::GameEnded { winner },
                ..
            }) => {
                // The room is gone now, so count the winning move here
                return Ok(GameResult::WonByPlayer {
                    player_idx: player_idx_of_seat[winner.index()],
                    seat: winner,
                    turns: turns + 1,
                });
            }
            Ok(event) => trace!(?event),
            Err(SessionError::Rejected(err)) => {
                debug!(
                    player = &players[player_idx].name,
                    rejection = ?ludo::Rejection::from(&err),
                    "Intent rejected"
                );
                return Ok(GameResult::IllegalMoveByPlayer {
                    player_idx,
                    err: IllegalAction::Rejected(err),
                });
            }
            Err(err) => return Err(err.into()),
        }
    }
}
