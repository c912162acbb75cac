use std::collections::HashMap;
use std::fmt::Write;

use ludo::Seat;

use crate::GameResult;

/// Tally of all games between two players, indexed like the players of the matchup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchScore {
    pub wins: [usize; 2],
    /// Games lost by an illegal move of this player. Counted as wins of the other.
    pub illegal_moves: [usize; 2],
    pub unfinished: usize,
    /// Won games where the winner moved first.
    pub wins_as_seat_a: usize,
    turns_of_won_games: usize,
}

impl MatchScore {
    pub fn record(&mut self, result: &GameResult) {
        match *result {
            GameResult::WonByPlayer {
                player_idx,
                seat,
                turns,
            } => {
                self.wins[player_idx] += 1;
                self.turns_of_won_games += turns;
                if seat == Seat::A {
                    self.wins_as_seat_a += 1;
                }
            }
            GameResult::Unfinished => self.unfinished += 1,
            GameResult::IllegalMoveByPlayer { player_idx, .. } => {
                self.wins[1 - player_idx] += 1;
                self.illegal_moves[player_idx] += 1;
            }
        }
    }

    pub fn games(&self) -> usize {
        self.wins[0] + self.wins[1] + self.unfinished
    }

    fn won_on_the_board(&self) -> usize {
        self.wins[0] + self.wins[1] - self.illegal_moves[0] - self.illegal_moves[1]
    }

    /// Average number of turns of the games that someone won by reaching home.
    pub fn average_turns(&self) -> Option<f32> {
        match self.won_on_the_board() {
            0 => None,
            n => Some(self.turns_of_won_games as f32 / n as f32),
        }
    }

    /// Share of the games won on the board where seat A won, in percent.
    pub fn seat_a_win_percentage(&self) -> Option<f32> {
        match self.won_on_the_board() {
            0 => None,
            n => Some(self.wins_as_seat_a as f32 / n as f32 * 100.0),
        }
    }

    pub fn summary(&self, names: [&str; 2]) -> String {
        let mut text = String::from("End result:");
        for (idx, name) in names.iter().enumerate() {
            let _ = write!(text, "\n- {} wins by {}", self.wins[idx], name);
            let forfeits = self.illegal_moves[1 - idx];
            if forfeits > 0 {
                let other = names[1 - idx];
                let _ = write!(text, " ({} through illegal moves of {})", forfeits, other);
            }
        }
        let _ = write!(text, "\n- {} unfinished", self.unfinished);
        if let (Some(turns), Some(seat_a)) = (self.average_turns(), self.seat_a_win_percentage()) {
            let _ = write!(
                text,
                "\n- {:.1} turns per finished game, {:.1}% won by seat A",
                turns, seat_a
            );
        }
        text
    }
}

fn percentage(part: usize, whole: usize) -> f32 {
    if whole == 0 {
        0.0
    } else {
        part as f32 / whole as f32 * 100.0
    }
}

/// One row per matchup, in the order of the player indices.
pub fn results_table(nicks: &[&str], results: &HashMap<(usize, usize), MatchScore>) -> String {
    let mut table = format!(
        "{:>16} vs {:<16} | {:>6} | {:>6} | {:>6} | {:>6} | {:>6}\n",
        "p1", "p2", "p1 %", "p2 %", "unf %", "A %", "turns"
    );
    table.push_str(&"-".repeat(table.chars().count() - 1));
    table.push('\n');

    let mut matchups: Vec<_> = results.keys().copied().collect();
    matchups.sort_unstable();
    for (i, j) in matchups {
        let score = &results[&(i, j)];
        let games = score.games();
        let optional = |value: Option<f32>| match value {
            Some(value) => format!("{:6.1}", value),
            None => format!("{:>6}", "-"),
        };
        let _ = writeln!(
            table,
            "{:>16} vs {:<16} | {:6.1} | {:6.1} | {:6.1} | {} | {}",
            nicks[i],
            nicks[j],
            percentage(score.wins[0], games),
            percentage(score.wins[1], games),
            percentage(score.unfinished, games),
            optional(score.seat_a_win_percentage()),
            optional(score.average_turns()),
        );
    }
    table
}

#[cfg(test)]
mod tests {
    use ludo::IntentError;

    use super::*;
    use crate::IllegalAction;

    fn won(player_idx: usize, seat: Seat, turns: usize) -> GameResult {
        GameResult::WonByPlayer {
            player_idx,
            seat,
            turns,
        }
    }

    #[test]
    fn tallies_results() {
        let mut score = MatchScore::default();
        score.record(&won(0, Seat::A, 100));
        score.record(&won(1, Seat::A, 200));
        score.record(&won(0, Seat::B, 300));
        score.record(&GameResult::Unfinished);
        score.record(&GameResult::IllegalMoveByPlayer {
            player_idx: 1,
            err: IllegalAction::Rejected(IntentError::NoRoll),
        });

        assert_eq!(score.wins, [3, 1]);
        assert_eq!(score.illegal_moves, [0, 1]);
        assert_eq!(score.games(), 5);
        // Forfeits and unfinished games do not count towards game length
        assert_eq!(score.average_turns(), Some(200.0));
        assert_eq!(score.wins_as_seat_a, 2);

        let summary = score.summary(["alice", "bob"]);
        assert!(summary.contains("- 3 wins by alice (1 through illegal moves of bob)"));
        assert!(summary.contains("- 1 wins by bob\n"));
        assert!(summary.contains("- 1 unfinished"));
        assert!(summary.contains("200.0 turns per finished game"));
    }

    #[test]
    fn no_finished_games() {
        let mut score = MatchScore::default();
        score.record(&GameResult::Unfinished);
        assert_eq!(score.average_turns(), None);
        assert_eq!(score.seat_a_win_percentage(), None);
        assert!(!score.summary(["alice", "bob"]).contains("turns"));
    }

    #[test]
    fn table_has_a_row_per_matchup() {
        let mut results = HashMap::new();
        let mut score = MatchScore::default();
        score.record(&won(1, Seat::B, 80));
        results.insert((0, 2), score);
        results.insert((0, 1), MatchScore::default());

        let table = results_table(&["alice", "bob", "carol"], &results);
        let rows: Vec<&str> = table.lines().skip(2).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains("alice vs bob"));
        assert!(rows[1].contains("alice vs carol"));
        assert!(rows[1].contains("100.0"));
        assert!(rows[1].contains("80.0"));
    }
}
