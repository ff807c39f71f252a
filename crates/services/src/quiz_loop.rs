use std::sync::Arc;

use crate::error::QuizError;
use crate::movies::MovieProvider;
use crate::question_factory::QuestionFactory;
use crate::session::{QuestionStep, QuizSession};
use crate::statistics::StatisticsService;
use quiz_core::model::{AggregateStats, GameResult, SessionPhase};

/// Summary of a just-finished round, composed from the updated aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundSummary {
    pub correct_count: u32,
    pub total_questions: usize,
    pub stats: AggregateStats,
    pub message: String,
}

/// What follows the result display: another question or the round summary.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Next(QuestionStep),
    Finished(RoundSummary),
}

/// Orchestrates pool loading, question acquisition, and finalization for a
/// quiz session.
pub struct QuizLoopService {
    factory: QuestionFactory,
    stats: StatisticsService,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(provider: Arc<dyn MovieProvider>, stats: StatisticsService) -> Self {
        Self {
            factory: QuestionFactory::new(provider),
            stats,
        }
    }

    /// Start a fresh session: load the pool, then present the first question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::State` if the session was already started, or
    /// `QuizError::Load` for pool/question failures (the session stays
    /// retryable).
    pub async fn start(&mut self, session: &mut QuizSession) -> Result<QuestionStep, QuizError> {
        session.begin()?;
        self.factory.load_pool().await?;
        self.next_question(session).await
    }

    /// Fetch and present the next question for a session in `Loading`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Load` on acquisition failure or `QuizError::State`
    /// if no load is expected.
    pub async fn next_question(
        &mut self,
        session: &mut QuizSession,
    ) -> Result<QuestionStep, QuizError> {
        let question = self.factory.next_question().await?;
        Ok(session.present_question(question)?)
    }

    /// Leave the result display: load the next question, or — after the last
    /// answer — record the game and compose the round summary.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::State` if no result is showing, `QuizError::Load`
    /// on question acquisition failure, or `QuizError::Stats` if the final
    /// record cannot be persisted.
    pub async fn advance(&mut self, session: &mut QuizSession) -> Result<StepOutcome, QuizError> {
        match session.advance()? {
            SessionPhase::Finished => Ok(StepOutcome::Finished(self.finalize(session).await?)),
            _ => Ok(StepOutcome::Next(self.next_question(session).await?)),
        }
    }

    /// Retry question acquisition after a loading failure.
    ///
    /// Per the error policy, counters are zeroed and the round restarts from
    /// the first question; the pool is reloaded only if it never arrived.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Load` if acquisition fails again.
    pub async fn retry(&mut self, session: &mut QuizSession) -> Result<QuestionStep, QuizError> {
        session.reset_for_retry();
        if self.factory.pool_size() == 0 {
            self.factory.load_pool().await?;
        }
        self.next_question(session).await
    }

    /// Begin another round on the same pool after "play again".
    ///
    /// # Errors
    ///
    /// Returns `QuizError::State` unless the session was reset first, or
    /// `QuizError::Load` on question acquisition failure.
    pub async fn restart(&mut self, session: &mut QuizSession) -> Result<QuestionStep, QuizError> {
        session.begin()?;
        self.next_question(session).await
    }

    async fn finalize(&self, session: &QuizSession) -> Result<RoundSummary, QuizError> {
        let correct = session.correct_count();
        // Each completed round submits a single game unit, regardless of the
        // question count; accuracy divides by the fixed ten elsewhere.
        let stats = self.stats.record(correct, 1).await?;
        let message = compose_summary_message(correct, session.total_questions(), &stats);

        Ok(RoundSummary {
            correct_count: correct,
            total_questions: session.total_questions(),
            stats,
            message,
        })
    }
}

fn compose_summary_message(correct: u32, total: usize, stats: &AggregateStats) -> String {
    let record_line = stats.best_game().map_or_else(
        || "0/10".to_owned(),
        |best: &GameResult| {
            format!(
                "{}/10 ({})",
                best.correct(),
                best.date().format("%d.%m.%y %H:%M")
            )
        },
    );

    format!(
        "Your result: {correct}/{total}\n\
         Quizzes played: {games}\n\
         Record: {record_line}\n\
         Average accuracy: {accuracy:.2}%",
        games = stats.games_played(),
        accuracy = stats.total_accuracy(),
    )
}
