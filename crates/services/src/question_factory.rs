use std::sync::Arc;

use rand::Rng;

use crate::error::LoadError;
use crate::movies::MovieProvider;
use quiz_core::model::{Comparison, Movie, Question, comparison_threshold};

/// Produces one question at a time from a fetched movie pool.
///
/// Selection is memoryless: every call picks a uniformly random movie, so
/// repeats within a session are possible and expected. The comparison
/// threshold is re-drawn per question around the pool's mean rating, which
/// keeps question variety bounded by the pool's rating distribution.
pub struct QuestionFactory {
    provider: Arc<dyn MovieProvider>,
    movies: Vec<Movie>,
}

impl QuestionFactory {
    #[must_use]
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self {
            provider,
            movies: Vec::new(),
        }
    }

    /// Fetch the movie pool from the provider, replacing previous contents.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Network`/`Api`/`Decode` if the provider fails.
    pub async fn load_pool(&mut self) -> Result<usize, LoadError> {
        self.movies = self.provider.fetch_movies().await?;
        tracing::debug!(pool_size = self.movies.len(), "movie pool loaded");
        Ok(self.movies.len())
    }

    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.movies.len()
    }

    /// Assemble the next question: random movie, random threshold around the
    /// pool mean, random comparison direction.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::EmptyPool` if no movies are loaded, or
    /// `LoadError::ImageLoad` if the selected movie's image cannot be
    /// fetched. An image failure does not poison the pool; callers may
    /// simply request another question.
    pub async fn next_question(&self) -> Result<Question, LoadError> {
        if self.movies.is_empty() {
            return Err(LoadError::EmptyPool);
        }

        // Draw all randomness up front; the thread-local rng must not be
        // held across the image fetch await.
        let (index, adjustment, comparison) = {
            let mut rng = rand::rng();
            (
                rng.random_range(0..self.movies.len()),
                rng.random_range(-1.0..=1.0),
                if rng.random_bool(0.5) {
                    Comparison::GreaterThan
                } else {
                    Comparison::LessThan
                },
            )
        };

        let movie = &self.movies[index];
        let image = self.provider.fetch_image(movie.image_url()).await?;
        let threshold = comparison_threshold(self.mean_rating(), adjustment);

        Ok(Question::for_rating(
            movie.rating(),
            threshold,
            comparison,
            image,
        ))
    }

    fn mean_rating(&self) -> f64 {
        if self.movies.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.movies.iter().map(Movie::rating).sum();
        #[allow(clippy::cast_precision_loss)]
        let len = self.movies.len() as f64;
        sum / len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use url::Url;

    struct StubProvider {
        movies: Vec<Movie>,
        fail_images: bool,
    }

    impl StubProvider {
        fn with_ratings(ratings: &[f64]) -> Self {
            let movies = ratings
                .iter()
                .enumerate()
                .map(|(i, rating)| {
                    let url = Url::parse(&format!("https://img.example/{i}.jpg")).unwrap();
                    Movie::new(format!("Movie {i}"), *rating, url)
                })
                .collect();
            Self {
                movies,
                fail_images: false,
            }
        }
    }

    #[async_trait]
    impl MovieProvider for StubProvider {
        async fn fetch_movies(&self) -> Result<Vec<Movie>, LoadError> {
            Ok(self.movies.clone())
        }

        async fn fetch_image(&self, _url: &Url) -> Result<Vec<u8>, LoadError> {
            if self.fail_images {
                // There is no way to build a reqwest::Error by hand, so image
                // failures in tests ride on the Api variant instead.
                return Err(LoadError::Api("image fetch refused".into()));
            }
            Ok(vec![0xFF, 0xD8])
        }
    }

    #[tokio::test]
    async fn empty_pool_is_reported_not_crashed() {
        let factory = QuestionFactory::new(Arc::new(StubProvider::with_ratings(&[])));
        let err = factory.next_question().await.unwrap_err();
        assert!(matches!(err, LoadError::EmptyPool));
    }

    #[tokio::test]
    async fn load_pool_reports_size() {
        let mut factory =
            QuestionFactory::new(Arc::new(StubProvider::with_ratings(&[9.2, 4.3, 7.0])));
        let size = factory.load_pool().await.unwrap();
        assert_eq!(size, 3);
        assert_eq!(factory.pool_size(), 3);
    }

    #[tokio::test]
    async fn questions_carry_prompt_image_and_answer() {
        let mut factory = QuestionFactory::new(Arc::new(StubProvider::with_ratings(&[9.2, 4.3])));
        factory.load_pool().await.unwrap();

        for _ in 0..20 {
            let question = factory.next_question().await.unwrap();
            assert!(question.prompt().starts_with("Is the rating of this movie "));
            assert!(
                question.prompt().contains("greater than")
                    || question.prompt().contains("less than")
            );
            assert_eq!(question.image(), [0xFF, 0xD8]);
        }
    }

    #[tokio::test]
    async fn image_failure_leaves_pool_usable() {
        let mut provider = StubProvider::with_ratings(&[9.2, 4.3]);
        provider.fail_images = true;
        let provider = Arc::new(provider);
        let mut factory = QuestionFactory::new(provider);
        factory.load_pool().await.unwrap();

        assert!(factory.next_question().await.is_err());
        assert_eq!(factory.pool_size(), 2);
    }
}
