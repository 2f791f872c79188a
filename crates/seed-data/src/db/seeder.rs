//! Database seeding utilities.

use mongodb::bson::{Document, doc};
use mongodb::error::{BulkWriteError, Error as MongoError, ErrorKind};
use mongodb::options::InsertManyOptions;
use mongodb::{Client, Database};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::builders::{MovieDataset, RelationDataset};
use crate::generators::GeneratedUser;

pub const MOVIES: &str = "movies";
pub const ACTORS: &str = "actors";
pub const USERS: &str = "users";
pub const LOCATIONS: &str = "locations";

/// Database used when neither the caller nor the URI names one.
const FALLBACK_DATABASE: &str = "test";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] MongoError),
}

/// Write semantics for a bulk insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Stop at the first failing document.
    Ordered,
    /// Attempt every document; individual failures do not block the rest.
    Unordered,
}

/// Rows written by [`Seeder::persist_movie_graph`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphCounts {
    pub movies: u64,
    pub actors: u64,
}

/// Database seeder for inserting generated documents.
pub struct Seeder {
    db: Database,
}

impl Seeder {
    /// Wraps an existing database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Connects to `uri` and pings the server so connection problems surface here.
    ///
    /// Without an explicit `database`, the one named in the URI is used, then `test`.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, SeedError> {
        let client = Client::with_uri_str(uri).await?;
        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(FALLBACK_DATABASE)),
        };

        db.run_command(doc! { "ping": 1 }, None).await?;
        info!("Connected to database {}", db.name());

        Ok(Self::new(db))
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    /// Removes every document from each named collection.
    pub async fn reset(&self, collections: &[&str]) -> Result<(), SeedError> {
        for name in collections {
            let result = self
                .db
                .collection::<Document>(name)
                .delete_many(doc! {}, None)
                .await?;
            debug!("Cleared {} documents from {}", result.deleted_count, name);
        }
        Ok(())
    }

    /// Bulk-inserts `docs` and returns how many were written.
    ///
    /// In [`InsertMode::Unordered`], per-document write errors are logged and
    /// the remaining documents still count as inserted.
    pub async fn insert_documents<T>(
        &self,
        collection: &str,
        docs: &[T],
        mode: InsertMode,
    ) -> Result<u64, SeedError>
    where
        T: Serialize + Send + Sync,
    {
        if docs.is_empty() {
            return Ok(0);
        }

        let options = InsertManyOptions::builder()
            .ordered(mode == InsertMode::Ordered)
            .build();

        match self
            .db
            .collection::<T>(collection)
            .insert_many(docs, options)
            .await
        {
            Ok(result) => Ok(result.inserted_ids.len() as u64),
            Err(e) => {
                let Some(write_errors) = partial_write_errors(&e, mode) else {
                    return Err(e.into());
                };

                for err in &write_errors {
                    warn!(
                        "Skipped document {} in {}: {} (code {})",
                        err.index, collection, err.message, err.code
                    );
                }
                Ok(inserted_after_failures(docs.len(), write_errors.len()))
            }
        }
    }

    /// Seeds the flat user collection, optionally emptying it first.
    pub async fn seed_users(
        &self,
        collection: &str,
        users: &[GeneratedUser],
        clean: bool,
    ) -> Result<u64, SeedError> {
        if clean {
            self.reset(&[collection]).await?;
        }

        let inserted = self
            .insert_documents(collection, users, InsertMode::Ordered)
            .await?;
        info!(
            "Inserted {} docs into {}.{}",
            inserted,
            self.database_name(),
            collection
        );
        Ok(inserted)
    }

    /// Replaces `locations` and `users` with a relationship dataset.
    ///
    /// Locations go in first so every user reference points at a stored document.
    pub async fn persist_relations(&self, dataset: &RelationDataset) -> Result<(), SeedError> {
        self.reset(&[USERS, LOCATIONS]).await?;

        let locations = self
            .insert_documents(LOCATIONS, &dataset.locations, InsertMode::Ordered)
            .await?;
        info!("Seeded {} locations", locations);

        let users = self
            .insert_documents(USERS, &dataset.users, InsertMode::Ordered)
            .await?;
        info!("Seeded {} users", users);

        Ok(())
    }

    /// Replaces `movies` and `actors` with the given graph.
    ///
    /// The two batches are written one after the other without any atomicity
    /// between them.
    pub async fn persist_movie_graph(
        &self,
        dataset: &MovieDataset,
    ) -> Result<GraphCounts, SeedError> {
        self.reset(&[MOVIES, ACTORS]).await?;

        let movies = self
            .insert_documents(MOVIES, &dataset.movies, InsertMode::Unordered)
            .await?;
        info!("Inserted {} movies.", movies);

        let actors = self
            .insert_documents(ACTORS, &dataset.actors, InsertMode::Unordered)
            .await?;
        info!("Inserted {} actors.", actors);

        Ok(GraphCounts { movies, actors })
    }
}

/// Per-document write errors of an unordered bulk insert, or `None` when the
/// error has to be treated as fatal.
fn partial_write_errors(err: &MongoError, mode: InsertMode) -> Option<Vec<BulkWriteError>> {
    if mode != InsertMode::Unordered {
        return None;
    }

    match err.kind.as_ref() {
        ErrorKind::BulkWrite(failure) if failure.write_concern_error.is_none() => {
            Some(failure.write_errors.clone().unwrap_or_default())
        }
        _ => None,
    }
}

fn inserted_after_failures(attempted: usize, failed: usize) -> u64 {
    attempted.saturating_sub(failed) as u64
}
