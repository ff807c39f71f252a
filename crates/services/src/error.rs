//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SessionStateError;
use storage::repository::StorageError;

/// Failures while acquiring quiz data.
///
/// All of these surface to the presentation boundary as a retryable alert;
/// none are fatal to the process.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// Transport or provider failure.
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-empty error message despite an
    /// otherwise successful response.
    #[error("movie service reported an error: {0}")]
    Api(String),

    #[error("malformed movie payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// A single question's image fetch failed; the pool itself stays usable.
    #[error("failed to load the question image")]
    ImageLoad(#[source] reqwest::Error),

    #[error("no movies available for questions")]
    EmptyPool,
}

/// Errors emitted by `StatisticsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the quiz session loop and presenter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    State(#[from] SessionStateError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}
