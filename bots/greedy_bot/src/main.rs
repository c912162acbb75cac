use clap::Parser;
use ludo::{Command, DiceValue, Position, Seat, Snapshot};
use ludo_bot_utils::{move_options, Bot, MoveOption};
use rand::rngs::StdRng;
use rand::{seq::SliceRandom, SeedableRng};
use tracing::debug;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    GreedyBot { rng, seat: Seat::A }.run()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    // Stdout is reserved for talking to the judge
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

struct GreedyBot {
    rng: StdRng,
    seat: Seat,
}

/// Captures first, then getting a piece out of base, then finishing
/// pieces, then advancing whichever piece is furthest along.
fn score(option: &MoveOption) -> u32 {
    let capture_bonus = option.captures as u32 * 1000;
    let entry_bonus = if option.from.is_base() { 500 } else { 0 };
    let home_bonus = if option.destination == Position::Home { 200 } else { 0 };
    let progress = 100 - u32::from(option.remaining_distance.unwrap_or(100)).min(100);
    capture_bonus + entry_bonus + home_bonus + progress
}

impl Bot for GreedyBot {
    fn new_game(&mut self, seat: Seat) {
        self.seat = seat;
    }

    fn play_turn(&mut self, snapshot: Snapshot, dice: DiceValue) -> Command {
        let options = move_options(&snapshot, self.seat, dice);
        let Some(top_score) = options.iter().map(score).max() else {
            debug!(pips = dice.pips(), "No legal move, passing");
            return Command::Pass;
        };
        let top_choices: Vec<&MoveOption> =
            options.iter().filter(|o| score(o) == top_score).collect();
        match top_choices.choose(&mut self.rng) {
            Some(option) => {
                debug!(piece_idx = option.piece_idx, top_score, "Moving");
                Command::Move {
                    piece_idx: option.piece_idx,
                }
            }
            None => Command::Pass,
        }
    }
}
