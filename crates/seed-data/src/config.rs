//! Configuration types for seed data generation.

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection string used when `MONGO_URI` is not set.
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";

/// Connection string used by `seed-movies` when `MONGO_URI` is not set.
pub const DEFAULT_MOVIES_URI: &str = "mongodb://127.0.0.1:27017/movies_db";

/// Public TMDB v3 endpoint.
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Settings for the flat user collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSeedConfig {
    /// Number of users to generate.
    pub count: usize,
    /// Target database.
    pub database: String,
    /// Target collection.
    pub collection: String,
    /// Whether to empty the collection before inserting.
    pub clean: bool,
}

impl Default for UserSeedConfig {
    fn default() -> Self {
        Self {
            count: 20,
            database: "mydb".to_string(),
            collection: "users".to_string(),
            clean: false,
        }
    }
}

/// Settings shared by the one-to-one and one-to-many location scenarios.
#[derive(Debug, Clone)]
pub struct RelationConfig {
    /// Target database.
    pub database: String,
    /// Number of users to generate.
    pub user_count: usize,
    /// Number of locations to generate.
    pub location_count: usize,
    /// How many locations each user references (one-to-many only).
    pub locations_per_user: RangeInclusive<usize>,
    /// Fixed country for every address, or `None` for a random one.
    pub country: Option<String>,
}

impl RelationConfig {
    /// Ten users, each owning exactly one Cambodian address.
    pub fn one_to_one() -> Self {
        Self {
            database: "mydb".to_string(),
            user_count: 10,
            location_count: 10,
            locations_per_user: 1..=1,
            country: Some("Cambodia".to_string()),
        }
    }

    /// Ten users spread over a pool of a hundred locations.
    pub fn one_to_many() -> Self {
        Self {
            database: "relationshop".to_string(),
            user_count: 10,
            location_count: 100,
            locations_per_user: 2..=5,
            country: None,
        }
    }
}

/// Limits and pacing for the movie graph build.
#[derive(Debug, Clone, Copy)]
pub struct MovieGraphConfig {
    /// How many movies to collect in total.
    pub max_movies: usize,
    /// Top N credited cast members kept per movie.
    pub cast_limit: usize,
    /// Fixed wait after every catalog request.
    pub delay: Duration,
}

impl Default for MovieGraphConfig {
    fn default() -> Self {
        Self {
            max_movies: 50,
            cast_limit: 20,
            delay: Duration::from_millis(550),
        }
    }
}

/// Connection settings for the TMDB catalog.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// v3 API key, sent as the `api_key` query parameter.
    pub api_key: String,
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Response language.
    pub language: String,
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: TMDB_BASE_URL.to_string(),
            language: "en-US".to_string(),
        }
    }

    /// Points the client at a different host (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}
