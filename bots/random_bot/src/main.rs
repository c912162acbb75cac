use clap::Parser;
use ludo::{Command, DiceValue, Seat, Snapshot};
use ludo_bot_utils::{move_options, Bot};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot { rng, seat: Seat::A }.run()
}

struct RandomBot {
    rng: StdRng,
    seat: Seat,
}

impl Bot for RandomBot {
    fn new_game(&mut self, seat: Seat) {
        self.seat = seat;
    }

    fn play_turn(&mut self, snapshot: Snapshot, dice: DiceValue) -> Command {
        match move_options(&snapshot, self.seat, dice).choose(&mut self.rng) {
            Some(option) => Command::Move {
                piece_idx: option.piece_idx,
            },
            None => Command::Pass,
        }
    }
}
