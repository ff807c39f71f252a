use thiserror::Error;

/// Number of questions asked per quiz session.
pub const QUESTIONS_PER_SESSION: usize = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors raised when a session operation is attempted in the wrong phase.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("session already started")]
    AlreadyStarted,

    #[error("no question data is loading")]
    NotLoading,

    #[error("no question is awaiting an answer")]
    NotAwaitingAnswer,

    #[error("no answer result is being shown")]
    NotShowingResult,
}

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// Lifecycle phase of a quiz session.
///
/// `NotStarted → Loading → AwaitingAnswer → ShowingResult → (AwaitingAnswer…
/// | Finished)`. Answers are only accepted in `AwaitingAnswer`, which is what
/// locks input for the duration of the result-display delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    Loading,
    AwaitingAnswer,
    ShowingResult,
    Finished,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Mutable per-session counters plus the phase machine that guards them.
///
/// Invariants: `question_index < total_questions` while the session is
/// active, and `correct_count <= question_index + 1` (an answer is recorded
/// at most once per question, enforced by the phase transitions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    phase: SessionPhase,
    question_index: usize,
    correct_count: u32,
    total_questions: usize,
}

impl SessionState {
    #[must_use]
    pub fn new(total_questions: usize) -> Self {
        Self {
            phase: SessionPhase::NotStarted,
            question_index: 0,
            correct_count: 0,
            total_questions,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    /// One-based position label for display, e.g. `"3/10"`.
    #[must_use]
    pub fn position_label(&self) -> String {
        format!("{}/{}", self.question_index + 1, self.total_questions)
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.question_index == self.total_questions - 1
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    /// Begin loading the pool and the first question.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::AlreadyStarted` unless the session is in
    /// `NotStarted`.
    pub fn begin(&mut self) -> Result<(), SessionStateError> {
        if self.phase != SessionPhase::NotStarted {
            return Err(SessionStateError::AlreadyStarted);
        }
        self.phase = SessionPhase::Loading;
        Ok(())
    }

    /// Mark the pending question as displayed, unlocking answer input.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::NotLoading` unless a load is in flight.
    pub fn question_ready(&mut self) -> Result<(), SessionStateError> {
        if self.phase != SessionPhase::Loading {
            return Err(SessionStateError::NotLoading);
        }
        self.phase = SessionPhase::AwaitingAnswer;
        Ok(())
    }

    /// Record whether the submitted answer matched, locking input until the
    /// result display ends.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::NotAwaitingAnswer` if no answer is
    /// expected — including a second submit racing the result display.
    pub fn record_answer(&mut self, matched: bool) -> Result<(), SessionStateError> {
        if self.phase != SessionPhase::AwaitingAnswer {
            return Err(SessionStateError::NotAwaitingAnswer);
        }
        if matched {
            self.correct_count += 1;
        }
        self.phase = SessionPhase::ShowingResult;
        Ok(())
    }

    /// Leave the result display: advance to loading the next question, or
    /// finish the session if the last question was just answered.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::NotShowingResult` unless a result is
    /// currently displayed.
    pub fn advance(&mut self) -> Result<SessionPhase, SessionStateError> {
        if self.phase != SessionPhase::ShowingResult {
            return Err(SessionStateError::NotShowingResult);
        }
        if self.is_last_question() {
            self.phase = SessionPhase::Finished;
        } else {
            self.question_index += 1;
            self.phase = SessionPhase::Loading;
        }
        Ok(self.phase)
    }

    /// Zero the counters and restart question acquisition after a load
    /// failure. The session stays live so the user can retry.
    pub fn reset_for_retry(&mut self) {
        self.question_index = 0;
        self.correct_count = 0;
        self.phase = SessionPhase::Loading;
    }

    /// Reset to a fresh, not-yet-started session ("play again").
    pub fn reset(&mut self) {
        self.question_index = 0;
        self.correct_count = 0;
        self.phase = SessionPhase::NotStarted;
    }
}
