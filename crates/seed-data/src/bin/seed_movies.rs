//! Many-to-many seed script: popular TMDB movies and their cast
//!
//! Run with:
//! ```
//! TMDB_API_KEY=... cargo run -p seed-data --bin seed-movies
//! ```

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use seed_data::builders::MovieGraphBuilder;
use seed_data::config::{DEFAULT_MOVIES_URI, MovieGraphConfig, TMDB_BASE_URL, TmdbConfig};
use seed_data::db::Seeder;
use seed_data::generators::seeded_rng;
use seed_data::sources::TmdbClient;

#[derive(Debug, Parser)]
#[command(name = "seed-movies")]
struct Args {
    #[arg(long, env = "MONGO_URI", default_value = DEFAULT_MOVIES_URI)]
    mongo_uri: String,

    /// Overrides the database named in the URI.
    #[arg(long, env = "DB_NAME")]
    database: Option<String>,

    #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, env = "TMDB_BASE_URL", default_value = TMDB_BASE_URL)]
    base_url: String,

    /// How many movies to fetch in total.
    #[arg(long, env = "MAX_MOVIES", default_value_t = 50)]
    max_movies: usize,

    /// Top N cast members kept per movie.
    #[arg(long, env = "CAST_LIMIT", default_value_t = 20)]
    cast_limit: usize,

    /// Pause after every TMDB request, in milliseconds.
    #[arg(long, env = "DELAY_MS", default_value_t = 550)]
    delay_ms: u64,

    /// RNG seed for reproducible biographies.
    #[arg(long, env = "SEED")]
    seed: Option<u64>,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let api_key = args
        .api_key
        .filter(|key| !key.trim().is_empty())
        .context("Please set TMDB_API_KEY environment variable.")?;

    let seeder = Seeder::connect(&args.mongo_uri, args.database.as_deref()).await?;

    let client = TmdbClient::new(TmdbConfig::new(api_key).with_base_url(args.base_url));
    let config = MovieGraphConfig {
        max_movies: args.max_movies,
        cast_limit: args.cast_limit,
        delay: Duration::from_millis(args.delay_ms),
    };

    let mut rng = seeded_rng(args.seed);
    let dataset = MovieGraphBuilder::new(&client)
        .with_config(config)
        .build(&mut rng)
        .await?;

    let counts = seeder.persist_movie_graph(&dataset).await?;

    tracing::info!("Seed completed!");
    tracing::info!("  Movies: {}/{}", counts.movies, dataset.movies.len());
    tracing::info!("  Actors: {}/{}", counts.actors, dataset.actors.len());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    seed_data::logging::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Fatal error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
