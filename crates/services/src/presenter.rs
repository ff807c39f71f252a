use std::time::Duration;

use async_trait::async_trait;

use crate::error::{LoadError, QuizError};
use crate::quiz_loop::{QuizLoopService, RoundSummary, StepOutcome};
use crate::session::{QuestionStep, QuizSession};

/// Fixed result-display window between an answer and the next step.
pub const ANSWER_FEEDBACK_DELAY: Duration = Duration::from_secs(1);

//
// ─── VIEW BOUNDARY ─────────────────────────────────────────────────────────────
//

/// Instruction for a modal alert with a single action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub button_text: String,
}

impl Alert {
    #[must_use]
    pub fn round_finished(summary: &RoundSummary) -> Self {
        Self {
            title: "This round is over!".into(),
            message: summary.message.clone(),
            button_text: "Play again".into(),
        }
    }

    #[must_use]
    pub fn load_failed(err: &LoadError) -> Self {
        Self {
            title: "Error".into(),
            message: err.to_string(),
            button_text: "Try again".into(),
        }
    }
}

/// Display boundary driven by the presenter.
///
/// `show_question` renders the step and relays the user's yes/no answer
/// back, keeping rendering and input behind one seam.
#[async_trait]
pub trait QuizView: Send + Sync {
    async fn show_loading(&self, visible: bool);
    async fn show_question(&self, step: &QuestionStep) -> bool;
    async fn show_answer_feedback(&self, is_correct: bool);
    /// Present a modal alert; returns true if the user chose its action
    /// (retry or play again), false if they dismissed it.
    async fn show_alert(&self, alert: &Alert) -> bool;
}

//
// ─── PRESENTER ─────────────────────────────────────────────────────────────────
//

/// Drives full quiz rounds against a `QuizView`.
///
/// All session mutation happens on this single logical thread of control;
/// background fetches only hand values back across the await points.
pub struct QuizPresenter<V: QuizView> {
    quiz: QuizLoopService,
    view: V,
    feedback_delay: Duration,
}

impl<V: QuizView> QuizPresenter<V> {
    #[must_use]
    pub fn new(quiz: QuizLoopService, view: V) -> Self {
        Self {
            quiz,
            view,
            feedback_delay: ANSWER_FEEDBACK_DELAY,
        }
    }

    /// Override the result-display delay (tests use `Duration::ZERO`).
    #[must_use]
    pub fn with_feedback_delay(mut self, delay: Duration) -> Self {
        self.feedback_delay = delay;
        self
    }

    /// Run rounds until the player declines to play again.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Load` if the player gives up on a retry alert,
    /// or any stats/state error, none of which are expected in normal play.
    pub async fn run(&mut self) -> Result<(), QuizError> {
        let mut session = QuizSession::new();

        self.view.show_loading(true).await;
        let first = self.quiz.start(&mut session).await;
        let mut step = self.recover_step(&mut session, first).await?;

        loop {
            self.view.show_loading(false).await;
            let answer = self.view.show_question(&step).await;
            let feedback = session.submit_answer(answer)?;
            self.view.show_answer_feedback(feedback.is_correct).await;

            // Input stays locked for the whole window: the session is in
            // ShowingResult until `advance`, so a stray submit cannot race
            // the timer.
            tokio::time::sleep(self.feedback_delay).await;

            self.view.show_loading(true).await;
            match self.quiz.advance(&mut session).await {
                Ok(StepOutcome::Next(next)) => step = next,
                Ok(StepOutcome::Finished(summary)) => {
                    self.view.show_loading(false).await;
                    let wants_replay =
                        self.view.show_alert(&Alert::round_finished(&summary)).await;
                    if !wants_replay {
                        return Ok(());
                    }
                    session.reset();
                    self.view.show_loading(true).await;
                    let restart = self.quiz.restart(&mut session).await;
                    step = self.recover_step(&mut session, restart).await?;
                }
                Err(err) => {
                    step = self.recover_step(&mut session, Err(err)).await?;
                }
            }
        }
    }

    async fn recover_step(
        &mut self,
        session: &mut QuizSession,
        first_attempt: Result<QuestionStep, QuizError>,
    ) -> Result<QuestionStep, QuizError> {
        let mut attempt = first_attempt;
        loop {
            match attempt {
                Ok(step) => return Ok(step),
                Err(QuizError::Load(err)) => {
                    tracing::warn!(error = %err, "question acquisition failed");
                    self.view.show_loading(false).await;
                    if !self.view.show_alert(&Alert::load_failed(&err)).await {
                        return Err(QuizError::Load(err));
                    }
                    self.view.show_loading(true).await;
                    attempt = self.quiz.retry(session).await;
                }
                Err(other) => return Err(other),
            }
        }
    }
}
