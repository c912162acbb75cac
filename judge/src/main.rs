use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use judge::{
    play_game, results_table, Config, GameResult, MatchScore, Player, PlayerConfig, PlayerId,
    Recorder, Rooms,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the config JSON files of players
    #[clap(num_args(2..), value_delimiter = ' ')]
    player_configs: Vec<PathBuf>,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// Abandon a game after this many moves and passes
    #[arg(long, default_value_t = 10_000)]
    max_turns: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Stop the tournament as soon as one player makes an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// Record the game's interactions as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn play_matchup(
    config: &mut Config,
    player_1: &mut Player,
    player_2: &mut Player,
    num_games: usize,
    stop_on_illegal_move: bool,
) -> anyhow::Result<MatchScore> {
    let mut match_score = MatchScore::default();

    for game_idx in 0..num_games {
        let result = play_game(config, player_1, player_2)?;
        let names = [player_1.name.as_str(), player_2.name.as_str()];
        debug!(game_idx, result = %result.describe(&names));
        if let GameResult::IllegalMoveByPlayer { player_idx, err } = &result {
            info!(player = names[*player_idx], game_idx, "Illegal move by player");
            let mut err_dyn = err as &dyn std::error::Error;
            while let Some(src_err) = err_dyn.source() {
                info!("{}", err_dyn);
                err_dyn = src_err;
            }
            info!("{}", err_dyn);
            if stop_on_illegal_move {
                break;
            }
        }
        match_score.record(&result);
    }

    eprintln!("{}", match_score.summary([player_1.name.as_str(), player_2.name.as_str()]));
    Ok(match_score)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let mut config = Config {
        rng: StdRng::seed_from_u64(seed),
        recorder,
        rooms: Rooms::new(),
        max_turns: args.max_turns,
    };

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;

    let matchups: Vec<(usize, usize)> = (0..player_configs.len()).tuple_combinations().collect();

    let mut match_results: HashMap<(usize, usize), MatchScore> = HashMap::new();
    for (i1, i2) in matchups {
        let mut player_1 = Player::from_config(PlayerId(i1), &player_configs[i1])?;
        let mut player_2 = Player::from_config(PlayerId(i2), &player_configs[i2])?;

        let match_score = play_matchup(
            &mut config,
            &mut player_1,
            &mut player_2,
            args.num_games,
            args.stop_on_illegal_move,
        )?;
        player_1.bye()?;
        player_2.bye()?;

        match_results.insert((i1, i2), match_score);
    }

    if player_configs.len() > 2 {
        let nicks: Vec<&str> = player_configs.iter().map(|c| c.nick.as_str()).collect();
        println!("\nTournament results (percentages are of all games of a matchup):\n");
        print!("{}", results_table(&nicks, &match_results));
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
