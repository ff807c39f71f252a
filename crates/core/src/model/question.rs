use std::fmt;

//
// ─── COMPARISON ────────────────────────────────────────────────────────────────
//

/// Direction of a rating-comparison question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    LessThan,
}

impl Comparison {
    /// Returns true if `rating` satisfies this comparison against `threshold`.
    #[must_use]
    pub fn holds(self, rating: f64, threshold: f64) -> bool {
        match self {
            Comparison::GreaterThan => rating > threshold,
            Comparison::LessThan => rating < threshold,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparison::GreaterThan => f.write_str("greater than"),
            Comparison::LessThan => f.write_str("less than"),
        }
    }
}

/// Compute the comparison threshold from the pool's mean rating and a random
/// adjustment, rounded to one decimal place.
#[must_use]
pub fn comparison_threshold(mean: f64, adjustment: f64) -> f64 {
    ((mean + adjustment) * 10.0).round() / 10.0
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single yes/no quiz question.
///
/// Immutable once built; created per round and discarded after being answered.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    image: Vec<u8>,
    prompt: String,
    correct_answer: bool,
}

impl Question {
    #[must_use]
    pub fn new(image: Vec<u8>, prompt: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            image,
            prompt: prompt.into(),
            correct_answer,
        }
    }

    /// Build a rating-comparison question for a movie.
    ///
    /// The prompt embeds the threshold with one decimal and the comparison
    /// direction; the correct answer is whether the rating satisfies it.
    #[must_use]
    pub fn for_rating(rating: f64, threshold: f64, comparison: Comparison, image: Vec<u8>) -> Self {
        let prompt = format!("Is the rating of this movie {comparison} {threshold:.1}?");
        Self {
            image,
            prompt,
            correct_answer: comparison.holds(rating, threshold),
        }
    }

    #[must_use]
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> bool {
        self.correct_answer
    }

    /// Returns true if the user's answer matches the correct one.
    #[must_use]
    pub fn matches(&self, answer: bool) -> bool {
        self.correct_answer == answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_rounds_to_one_decimal() {
        // mean of [9.2, 4.3] with no adjustment
        assert_eq!(comparison_threshold(6.75, 0.0), 6.8);
        assert_eq!(comparison_threshold(6.75, -0.5), 6.3);
        assert_eq!(comparison_threshold(7.0, 0.04), 7.0);
    }

    #[test]
    fn greater_than_question_scores_ratings_around_threshold() {
        let threshold = comparison_threshold(6.75, 0.0);
        let high = Question::for_rating(9.2, threshold, Comparison::GreaterThan, Vec::new());
        let low = Question::for_rating(4.3, threshold, Comparison::GreaterThan, Vec::new());

        assert!(high.correct_answer());
        assert!(!low.correct_answer());
        assert!(high.matches(true));
        assert!(low.matches(false));
    }

    #[test]
    fn prompt_embeds_direction_and_threshold() {
        let q = Question::for_rating(5.0, 6.8, Comparison::LessThan, Vec::new());
        assert_eq!(q.prompt(), "Is the rating of this movie less than 6.8?");
        assert!(q.correct_answer());
    }

    #[test]
    fn rating_equal_to_threshold_satisfies_neither_direction() {
        assert!(!Comparison::GreaterThan.holds(6.8, 6.8));
        assert!(!Comparison::LessThan.holds(6.8, 6.8));
    }
}
