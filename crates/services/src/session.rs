use quiz_core::model::{
    QUESTIONS_PER_SESSION, Question, SessionPhase, SessionState, SessionStateError,
};

//
// ─── DISPLAY MODELS ────────────────────────────────────────────────────────────
//

/// Display model for one question step.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionStep {
    pub prompt: String,
    pub image: Vec<u8>,
    pub position_label: String,
}

/// Two-valued visual feedback emitted right after an answer is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub is_correct: bool,
    pub was_last_question: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One playthrough from the first question to the final results dialog.
///
/// Wraps the phase machine together with the question currently on screen.
/// The question is discarded as soon as it is answered, so a second submit
/// during the result display has nothing to score against and is rejected.
pub struct QuizSession {
    state: SessionState,
    current_question: Option<Question>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SessionState::new(QUESTIONS_PER_SESSION),
            current_question: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn question_index(&self) -> usize {
        self.state.question_index()
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.state.correct_count()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.state.total_questions()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub(crate) fn begin(&mut self) -> Result<(), SessionStateError> {
        self.current_question = None;
        self.state.begin()
    }

    /// Install a freshly fetched question and unlock answer input.
    pub(crate) fn present_question(
        &mut self,
        question: Question,
    ) -> Result<QuestionStep, SessionStateError> {
        self.state.question_ready()?;
        let step = QuestionStep {
            prompt: question.prompt().to_owned(),
            image: question.image().to_vec(),
            position_label: self.state.position_label(),
        };
        self.current_question = Some(question);
        Ok(step)
    }

    /// Score the user's answer against the current question.
    ///
    /// Valid only while a question is awaiting an answer; this is the input
    /// lock — a repeat submit during the result display fails here.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::NotAwaitingAnswer` when no answer is
    /// expected.
    pub fn submit_answer(&mut self, answer: bool) -> Result<AnswerFeedback, SessionStateError> {
        let Some(question) = self.current_question.as_ref() else {
            return Err(SessionStateError::NotAwaitingAnswer);
        };
        let matched = question.matches(answer);
        self.state.record_answer(matched)?;
        self.current_question = None;

        Ok(AnswerFeedback {
            is_correct: matched,
            was_last_question: self.state.is_last_question(),
        })
    }

    pub(crate) fn advance(&mut self) -> Result<SessionPhase, SessionStateError> {
        self.state.advance()
    }

    /// Zero counters and restart question acquisition after a load failure.
    pub(crate) fn reset_for_retry(&mut self) {
        self.current_question = None;
        self.state.reset_for_retry();
    }

    /// Reset for a brand-new round ("play again").
    pub fn reset(&mut self) {
        self.current_question = None;
        self.state.reset();
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Comparison, Question};

    fn question(correct_answer: bool) -> Question {
        // rating 9.0 vs threshold 7.0: "greater" makes yes correct
        let comparison = if correct_answer {
            Comparison::GreaterThan
        } else {
            Comparison::LessThan
        };
        Question::for_rating(9.0, 7.0, comparison, vec![1, 2, 3])
    }

    fn started_session() -> QuizSession {
        let mut session = QuizSession::new();
        session.begin().unwrap();
        session
    }

    #[test]
    fn step_carries_prompt_image_and_position() {
        let mut session = started_session();
        let step = session.present_question(question(true)).unwrap();

        assert_eq!(step.prompt, "Is the rating of this movie greater than 7.0?");
        assert_eq!(step.image, vec![1, 2, 3]);
        assert_eq!(step.position_label, "1/10");
    }

    #[test]
    fn answers_are_scored_against_the_current_question() {
        let mut session = started_session();

        session.present_question(question(true)).unwrap();
        let feedback = session.submit_answer(true).unwrap();
        assert!(feedback.is_correct);
        assert!(!feedback.was_last_question);
        assert_eq!(session.correct_count(), 1);

        session.advance().unwrap();
        session.present_question(question(true)).unwrap();
        let feedback = session.submit_answer(false).unwrap();
        assert!(!feedback.is_correct);
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn second_submit_during_result_display_is_rejected() {
        let mut session = started_session();
        session.present_question(question(true)).unwrap();
        session.submit_answer(true).unwrap();

        let err = session.submit_answer(true).unwrap_err();
        assert_eq!(err, SessionStateError::NotAwaitingAnswer);
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn submit_before_any_question_is_rejected() {
        let mut session = started_session();
        let err = session.submit_answer(true).unwrap_err();
        assert_eq!(err, SessionStateError::NotAwaitingAnswer);
    }

    #[test]
    fn last_answer_flags_the_final_question() {
        let mut session = started_session();

        for index in 0..QUESTIONS_PER_SESSION {
            session.present_question(question(true)).unwrap();
            let feedback = session.submit_answer(true).unwrap();
            assert_eq!(feedback.was_last_question, index == QUESTIONS_PER_SESSION - 1);
            let phase = session.advance().unwrap();
            if index == QUESTIONS_PER_SESSION - 1 {
                assert_eq!(phase, SessionPhase::Finished);
            }
        }

        assert_eq!(session.correct_count(), QUESTIONS_PER_SESSION as u32);
        assert!(session.is_finished());
    }

    #[test]
    fn reset_prepares_a_fresh_round() {
        let mut session = started_session();
        session.present_question(question(true)).unwrap();
        session.submit_answer(true).unwrap();

        session.reset();
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert_eq!(session.correct_count(), 0);
        session.begin().unwrap();
        assert_eq!(session.phase(), SessionPhase::Loading);
    }
}
