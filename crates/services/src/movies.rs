use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::error::LoadError;
use quiz_core::model::Movie;

/// Default top-250 endpoint with the provider's published demo key.
const DEFAULT_API_URL: &str = "https://tv-api.com/en/API/Top250Movies/k_zcuw1ytf";

#[derive(Clone, Debug)]
pub struct MovieApiConfig {
    pub api_url: String,
}

impl MovieApiConfig {
    /// Resolve the endpoint from the environment, falling back to the
    /// public demo URL.
    ///
    /// `MOVIEQUIZ_API_URL` overrides the whole endpoint; `MOVIEQUIZ_API_KEY`
    /// swaps just the key on the default one.
    #[must_use]
    pub fn from_env() -> Self {
        if let Ok(api_url) = env::var("MOVIEQUIZ_API_URL") {
            if !api_url.trim().is_empty() {
                return Self { api_url };
            }
        }
        let api_url = match env::var("MOVIEQUIZ_API_KEY") {
            Ok(key) if !key.trim().is_empty() => {
                format!("https://tv-api.com/en/API/Top250Movies/{}", key.trim())
            }
            _ => DEFAULT_API_URL.into(),
        };
        Self { api_url }
    }
}

//
// ─── PROVIDER SEAM ─────────────────────────────────────────────────────────────
//

/// Supplies the movie pool and per-question image bytes.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Fetch the full movie list.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Network`/`Decode` on transport or payload
    /// failures, or `LoadError::Api` if the provider reports an
    /// application-level error.
    async fn fetch_movies(&self) -> Result<Vec<Movie>, LoadError>;

    /// Fetch the raw image bytes for one movie.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::ImageLoad` on any fetch failure.
    async fn fetch_image(&self, url: &Url) -> Result<Vec<u8>, LoadError>;
}

//
// ─── HTTP CLIENT ───────────────────────────────────────────────────────────────
//

/// `MovieProvider` backed by the tv-api JSON endpoint.
#[derive(Clone)]
pub struct TvApiClient {
    client: Client,
    config: MovieApiConfig,
}

impl TvApiClient {
    #[must_use]
    pub fn new(config: MovieApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(MovieApiConfig::from_env())
    }
}

#[async_trait]
impl MovieProvider for TvApiClient {
    async fn fetch_movies(&self) -> Result<Vec<Movie>, LoadError> {
        let response = self
            .client
            .get(&self.config.api_url)
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        let payload: MovieListPayload = serde_json::from_slice(&body)?;
        decode_movies(payload)
    }

    async fn fetch_image(&self, url: &Url) -> Result<Vec<u8>, LoadError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(LoadError::ImageLoad)?
            .error_for_status()
            .map_err(LoadError::ImageLoad)?;
        let bytes = response.bytes().await.map_err(LoadError::ImageLoad)?;
        Ok(bytes.to_vec())
    }
}

//
// ─── PAYLOAD ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct MovieListPayload {
    #[serde(rename = "errorMessage", default)]
    error_message: String,
    #[serde(default)]
    items: Vec<MovieItem>,
}

#[derive(Debug, Deserialize)]
struct MovieItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    rating: String,
    #[serde(rename = "resizedImageURL", default)]
    resized_image_url: String,
}

/// An empty `errorMessage` signals success; anything else is an
/// application-level failure even on HTTP 200.
fn decode_movies(payload: MovieListPayload) -> Result<Vec<Movie>, LoadError> {
    if !payload.error_message.is_empty() {
        return Err(LoadError::Api(payload.error_message));
    }
    let movies = payload
        .items
        .into_iter()
        .filter_map(|item| {
            // Items with unusable image URLs are dropped rather than
            // poisoning the pool.
            let url = Url::parse(&item.resized_image_url).ok()?;
            Some(Movie::new(
                item.title,
                Movie::parse_rating(&item.rating),
                url,
            ))
        })
        .collect();
    Ok(movies)
}
