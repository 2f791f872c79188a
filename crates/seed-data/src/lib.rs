//! Synthetic seed data for MongoDB development databases.
//!
//! Four scenarios are provided, each exposed as a binary under `src/bin`:
//! a flat user collection, a one-to-one and a one-to-many user/location
//! relationship, and a many-to-many movie/actor graph sourced from TMDB.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let client = TmdbClient::new(TmdbConfig::new(api_key));
//! let dataset = MovieGraphBuilder::new(&client)
//!     .with_config(MovieGraphConfig::default())
//!     .build(&mut rng)
//!     .await?;
//!
//! let seeder = Seeder::connect(DEFAULT_MOVIES_URI, None).await?;
//! seeder.persist_movie_graph(&dataset).await?;
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod generators;
pub mod logging;
pub mod sources;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{
        MovieDataset, MovieGraphBuilder, RelationDataset, build_one_to_many, build_one_to_one,
    };
    pub use crate::config::{
        DEFAULT_MONGO_URI, DEFAULT_MOVIES_URI, MovieGraphConfig, RelationConfig, TmdbConfig,
        UserSeedConfig,
    };
    pub use crate::db::{InsertMode, Seeder};
    pub use crate::generators::{LocationGenerator, PersonGenerator, UserGenerator};
    pub use crate::sources::{CatalogSource, TmdbClient};
}
