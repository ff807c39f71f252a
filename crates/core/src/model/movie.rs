use serde::{Deserialize, Serialize};
use url::Url;

/// A movie record from the fetched pool, normalized for question building.
///
/// The provider reports ratings as strings; they are parsed once at the
/// transport boundary so everything downstream works with `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    title: String,
    rating: f64,
    image_url: Url,
}

impl Movie {
    #[must_use]
    pub fn new(title: impl Into<String>, rating: f64, image_url: Url) -> Self {
        Self {
            title: title.into(),
            rating,
            image_url,
        }
    }

    /// Parse a provider rating string.
    ///
    /// Malformed or empty values count as `0.0`, matching the provider's
    /// habit of shipping blank ratings for unreleased titles.
    #[must_use]
    pub fn parse_rating(raw: &str) -> f64 {
        raw.trim().parse().unwrap_or(0.0)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn rating(&self) -> f64 {
        self.rating
    }

    #[must_use]
    pub fn image_url(&self) -> &Url {
        &self.image_url
    }
}
