use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed per-game question count baked into the accuracy formula.
///
/// `record` takes whatever `total` the caller passes (historically the
/// literal 1 per completed round), but accuracy always divides by
/// `games_played * 10`. The two are deliberately not derived from each other.
pub const QUESTIONS_PER_GAME: u32 = 10;

//
// ─── GAME RESULT ───────────────────────────────────────────────────────────────
//

/// Result of one completed quiz game.
///
/// Compared by `correct` only; ties on count are not distinguished by
/// recency, so the earliest game with a given high score stays the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    correct: u32,
    total: u32,
    date: DateTime<Utc>,
}

impl GameResult {
    #[must_use]
    pub fn new(correct: u32, total: u32, date: DateTime<Utc>) -> Self {
        Self {
            correct,
            total,
            date,
        }
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Strictly better than `other`; equal scores never replace a record.
    #[must_use]
    pub fn beats(&self, other: &GameResult) -> bool {
        self.correct > other.correct
    }
}

//
// ─── AGGREGATE STATS ───────────────────────────────────────────────────────────
//

/// Lifetime aggregates across completed games.
///
/// Updated transactionally on each session completion: counters are bumped
/// and the best game is conditionally replaced in one step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateStats {
    games_played: u32,
    cumulative_correct: u32,
    best_game: Option<GameResult>,
}

impl AggregateStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate aggregates from persisted scalars.
    #[must_use]
    pub fn from_parts(
        games_played: u32,
        cumulative_correct: u32,
        best_game: Option<GameResult>,
    ) -> Self {
        Self {
            games_played,
            cumulative_correct,
            best_game,
        }
    }

    #[must_use]
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    #[must_use]
    pub fn cumulative_correct(&self) -> u32 {
        self.cumulative_correct
    }

    #[must_use]
    pub fn best_game(&self) -> Option<&GameResult> {
        self.best_game.as_ref()
    }

    /// Fold one completed game into the aggregates.
    ///
    /// The candidate replaces the stored best only on a strictly greater
    /// correct count. With nothing stored yet the comparison is against a
    /// zero score, so a zero-correct game never becomes the record.
    pub fn record(&mut self, correct: u32, total: u32, now: DateTime<Utc>) {
        self.cumulative_correct += correct;
        self.games_played += total;

        let best_correct = self.best_game.as_ref().map_or(0, GameResult::correct);
        if correct > best_correct {
            self.best_game = Some(GameResult::new(correct, total, now));
        }
    }

    /// Lifetime accuracy percentage.
    ///
    /// `0.0` before any game is recorded; otherwise
    /// `100 * cumulative_correct / (games_played * QUESTIONS_PER_GAME)`.
    #[must_use]
    pub fn total_accuracy(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let asked = self.games_played * QUESTIONS_PER_GAME;
        f64::from(self.cumulative_correct) / f64::from(asked) * 100.0
    }
}
