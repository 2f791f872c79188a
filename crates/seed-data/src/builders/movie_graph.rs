//! Many-to-many movie/actor graph built from a paginated catalog.
//!
//! Movies reference their cast by local actor id, and actors list the local
//! ids of the movies they appear in. Local ids are dense, 1-based and handed
//! out in the order entities are first seen while paging through the source.

use std::collections::{BTreeSet, HashMap};

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::MovieGraphConfig;
use crate::generators::PersonGenerator;
use crate::sources::{CastMember, CatalogError, CatalogMovie, CatalogSource};

/// Movie document as stored locally.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDocument {
    pub id: u32,
    pub tmdb_id: i64,
    pub title: Option<String>,
    /// Local actor ids in billing order.
    pub castors: Vec<u32>,
}

/// Actor document as stored locally.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorDocument {
    pub id: u32,
    pub tmdb_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<u8>,
    /// Local movie ids, ascending and without duplicates.
    pub movies: Vec<u32>,
    pub bio: String,
}

/// Both halves of the graph, ready to persist.
#[derive(Debug, Clone, Default)]
pub struct MovieDataset {
    pub movies: Vec<MovieDocument>,
    pub actors: Vec<ActorDocument>,
}

#[derive(Debug)]
struct ActorEntry {
    tmdb_id: i64,
    name: String,
    popularity: Option<f64>,
    gender: Option<u8>,
    movies: BTreeSet<u32>,
}

/// Insertion-ordered map from catalog person id to local actor.
///
/// The local id of an actor is its position in insertion order plus one, so
/// ids never change once assigned.
#[derive(Debug, Default)]
pub struct ActorIndex {
    positions: HashMap<i64, usize>,
    entries: Vec<ActorEntry>,
}

impl ActorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Local id previously assigned to `tmdb_id`, if any.
    pub fn local_id(&self, tmdb_id: i64) -> Option<u32> {
        self.positions.get(&tmdb_id).map(|&pos| pos as u32 + 1)
    }

    /// Resolves a cast member to its local id, creating the entry on first sight,
    /// and records that the actor appears in `movie_id`.
    pub fn record(
        &mut self,
        member: &CastMember,
        movie_id: u32,
        people: &PersonGenerator,
        rng: &mut impl Rng,
    ) -> u32 {
        if let Some(id) = self.local_id(member.id) {
            debug!("Person {} already indexed as actor {id}", member.id);
            self.entries[id as usize - 1].movies.insert(movie_id);
            return id;
        }

        self.entries.push(ActorEntry {
            tmdb_id: member.id,
            name: people.name_or_fake(member.name.as_deref(), rng),
            popularity: member.popularity,
            gender: member.gender,
            movies: BTreeSet::from([movie_id]),
        });
        let pos = self.entries.len() - 1;
        self.positions.insert(member.id, pos);
        pos as u32 + 1
    }

    /// Flattens the index into actor documents in local id order.
    pub fn into_documents(
        self,
        people: &PersonGenerator,
        rng: &mut impl Rng,
    ) -> Vec<ActorDocument> {
        self.entries
            .into_iter()
            .enumerate()
            .map(|(pos, entry)| ActorDocument {
                id: pos as u32 + 1,
                tmdb_id: entry.tmdb_id,
                name: entry.name,
                popularity: entry.popularity,
                gender: entry.gender,
                movies: entry.movies.into_iter().collect(),
                bio: people.biography(rng),
            })
            .collect()
    }
}

/// Pages through a [`CatalogSource`] and assembles a [`MovieDataset`].
///
/// # Example
///
/// ```rust,ignore
/// let client = TmdbClient::new(TmdbConfig::new(api_key));
/// let dataset = MovieGraphBuilder::new(&client)
///     .with_config(MovieGraphConfig { max_movies: 100, ..Default::default() })
///     .build(&mut rng)
///     .await?;
/// ```
pub struct MovieGraphBuilder<'a, S> {
    source: &'a S,
    config: MovieGraphConfig,
    people: PersonGenerator,
}

impl<'a, S: CatalogSource> MovieGraphBuilder<'a, S> {
    /// Creates a builder with default limits and pacing.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            config: MovieGraphConfig::default(),
            people: PersonGenerator::new(),
        }
    }

    pub fn with_config(mut self, config: MovieGraphConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_people(mut self, people: PersonGenerator) -> Self {
        self.people = people;
        self
    }

    /// Runs the pagination loop until `max_movies` is reached or the source
    /// runs out of pages.
    ///
    /// A failed page fetch aborts the build. A failed credits fetch leaves that
    /// movie with an empty cast.
    pub async fn build(&self, rng: &mut impl Rng) -> Result<MovieDataset, CatalogError> {
        let target = self.config.max_movies;
        let mut movies: Vec<MovieDocument> = Vec::with_capacity(target);
        let mut actors = ActorIndex::new();
        let mut page_no = 1;

        while movies.len() < target {
            let page = self.source.fetch_page(page_no).await;
            self.pace().await;
            let page = page?;

            debug!(
                "Page {page_no}/{}: {} movies",
                page.total_pages.unwrap_or(page_no),
                page.results.len()
            );

            for item in &page.results {
                if movies.len() >= target {
                    break;
                }

                let movie_id = movies.len() as u32 + 1;
                let cast = self.credits_for(item).await;

                let castors = cast
                    .iter()
                    .take(self.config.cast_limit)
                    .map(|member| actors.record(member, movie_id, &self.people, rng))
                    .collect();

                movies.push(MovieDocument {
                    id: movie_id,
                    tmdb_id: item.id,
                    title: item.display_title().map(str::to_string),
                    castors,
                });
            }

            if page.is_last(page_no) {
                break;
            }
            page_no += 1;
        }

        info!(
            "Prepared {} movies and {} actors.",
            movies.len(),
            actors.len()
        );

        Ok(MovieDataset {
            movies,
            actors: actors.into_documents(&self.people, rng),
        })
    }

    /// Fetches credits for one movie, substituting an empty cast on failure.
    async fn credits_for(&self, item: &CatalogMovie) -> Vec<CastMember> {
        let credits = self.source.fetch_credits(item.id).await;
        self.pace().await;

        credits.unwrap_or_else(|e| {
            warn!(
                "Failed to fetch credits for movie {} ({}): {}",
                item.id,
                item.display_title().unwrap_or("untitled"),
                e
            );
            Vec::new()
        })
    }

    async fn pace(&self) {
        if !self.config.delay.is_zero() {
            tokio::time::sleep(self.config.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i64, name: &str) -> CastMember {
        CastMember {
            id,
            name: Some(name.to_string()),
            popularity: None,
            gender: None,
        }
    }

    #[test]
    fn test_index_assigns_first_seen_ids() {
        let people = PersonGenerator::new();
        let mut rng = rand::thread_rng();
        let mut index = ActorIndex::new();

        assert_eq!(index.record(&member(500, "A"), 1, &people, &mut rng), 1);
        assert_eq!(index.record(&member(300, "B"), 1, &people, &mut rng), 2);
        assert_eq!(index.record(&member(500, "A"), 2, &people, &mut rng), 1);
        assert_eq!(index.record(&member(100, "C"), 2, &people, &mut rng), 3);

        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
        assert_eq!(index.local_id(300), Some(2));
        assert_eq!(index.local_id(999), None);
    }

    #[test]
    fn test_index_reuse_keeps_first_credit_details() {
        let people = PersonGenerator::new();
        let mut rng = rand::thread_rng();
        let mut index = ActorIndex::new();

        let first = CastMember {
            popularity: Some(12.5),
            ..member(42, "Original Name")
        };
        let later = CastMember {
            popularity: Some(99.0),
            ..member(42, "Renamed")
        };

        let id = index.record(&first, 1, &people, &mut rng);
        assert_eq!(index.local_id(42), Some(id));
        assert_eq!(index.record(&later, 3, &people, &mut rng), id);
        assert_eq!(index.len(), 1);

        let actors = index.into_documents(&people, &mut rng);
        assert_eq!(actors[0].name, "Original Name");
        assert_eq!(actors[0].popularity, Some(12.5));
        assert_eq!(actors[0].movies, vec![1, 3]);
    }

    #[test]
    fn test_index_movie_lists_sorted_and_deduplicated() {
        let people = PersonGenerator::new();
        let mut rng = rand::thread_rng();
        let mut index = ActorIndex::new();

        for movie_id in [4, 2, 4, 1, 2] {
            index.record(&member(7, "Same Person"), movie_id, &people, &mut rng);
        }

        let actors = index.into_documents(&people, &mut rng);
        assert_eq!(actors.len(), 1);
        assert_eq!(actors[0].movies, vec![1, 2, 4]);
        assert_eq!(actors[0].name, "Same Person");
        assert!(!actors[0].bio.is_empty());
    }

    #[test]
    fn test_first_credit_wins_for_actor_details() {
        let people = PersonGenerator::new();
        let mut rng = rand::thread_rng();
        let mut index = ActorIndex::new();

        let first = CastMember {
            popularity: Some(12.5),
            gender: Some(1),
            ..member(8, "Original")
        };
        index.record(&first, 1, &people, &mut rng);
        index.record(&member(8, "Renamed"), 2, &people, &mut rng);

        let actors = index.into_documents(&people, &mut rng);
        assert_eq!(actors[0].name, "Original");
        assert_eq!(actors[0].popularity, Some(12.5));
        assert_eq!(actors[0].gender, Some(1));
    }

    #[test]
    fn test_actor_document_omits_missing_details() {
        let people = PersonGenerator::new();
        let mut rng = rand::thread_rng();
        let mut index = ActorIndex::new();
        index.record(&member(1, "X"), 1, &people, &mut rng);

        let actors = index.into_documents(&people, &mut rng);
        let doc = bson::to_document(&actors[0]).unwrap();
        assert!(doc.contains_key("tmdbId"));
        assert!(!doc.contains_key("popularity"));
        assert!(!doc.contains_key("gender"));
    }
}
