mod mirror;
pub use mirror::*;

use ludo::{Command, DiceValue, Okay, Request, Seat, Snapshot};

/// A trait to simplify writing bots.
pub trait Bot {
    fn new_game(&mut self, seat: Seat);

    /// Called when it's our turn. There is nothing to decide before seeing the dice.
    fn roll(&mut self, _snapshot: Snapshot) -> Command {
        Command::Roll
    }

    /// Pick a piece to move, or pass if there is none.
    fn play_turn(&mut self, snapshot: Snapshot, dice: DiceValue) -> Command;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { seat } => {
                    self.new_game(seat);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::Roll { snapshot } => {
                    serde_json::to_writer(&mut stdout, &self.roll(snapshot))?
                }
                Request::Move { snapshot, dice } => {
                    serde_json::to_writer(&mut stdout, &self.play_turn(snapshot, dice))?
                }
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}
