//! External data sources.
//!
//! - [`TmdbClient`]: popular movies and cast credits from The Movie Database
//! - [`CatalogSource`]: the trait the movie graph builder pages through

mod tmdb;

pub use tmdb::{CastMember, CatalogError, CatalogMovie, CatalogPage, CatalogSource, TmdbClient};
