#![forbid(unsafe_code)]

pub mod error;
pub mod movies;
pub mod presenter;
pub mod question_factory;
pub mod quiz_loop;
pub mod session;
pub mod statistics;

pub use quiz_core::Clock;

pub use error::{LoadError, QuizError, StatsError};
pub use movies::{MovieApiConfig, MovieProvider, TvApiClient};
pub use presenter::{ANSWER_FEEDBACK_DELAY, Alert, QuizPresenter, QuizView};
pub use question_factory::QuestionFactory;
pub use quiz_loop::{QuizLoopService, RoundSummary, StepOutcome};
pub use session::{AnswerFeedback, QuestionStep, QuizSession};
pub use statistics::StatisticsService;
