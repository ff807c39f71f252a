mod movie;
mod question;
mod session;
mod stats;

pub use movie::Movie;
pub use question::{Comparison, Question, comparison_threshold};
pub use session::{QUESTIONS_PER_SESSION, SessionPhase, SessionState, SessionStateError};
pub use stats::{AggregateStats, GameResult, QUESTIONS_PER_GAME};
