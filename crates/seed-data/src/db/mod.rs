//! Database integration for seeding.
//!
//! The [`Seeder`] wraps a MongoDB database handle and provides collection
//! resets plus ordered and unordered bulk inserts.

mod seeder;

pub use seeder::{
    ACTORS, GraphCounts, InsertMode, LOCATIONS, MOVIES, SeedError, Seeder, USERS,
};
