//! One-to-many seed script: users reference several shared locations
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed-one-to-many
//! ```

use std::process::ExitCode;

use clap::Parser;
use seed_data::builders::build_one_to_many;
use seed_data::config::{DEFAULT_MONGO_URI, RelationConfig};
use seed_data::db::Seeder;
use seed_data::generators::seeded_rng;

#[derive(Debug, Parser)]
#[command(name = "seed-one-to-many")]
struct Args {
    #[arg(long, env = "MONGO_URI", default_value = DEFAULT_MONGO_URI)]
    mongo_uri: String,

    #[arg(long, env = "DB_NAME", default_value = "relationshop")]
    database: String,

    #[arg(long, default_value_t = 10)]
    users: usize,

    #[arg(long, default_value_t = 100)]
    locations: usize,

    /// RNG seed for reproducible data.
    #[arg(long, env = "SEED")]
    seed: Option<u64>,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = RelationConfig {
        database: args.database,
        user_count: args.users,
        location_count: args.locations,
        ..RelationConfig::one_to_many()
    };

    let seeder = Seeder::connect(&args.mongo_uri, Some(&config.database)).await?;

    let mut rng = seeded_rng(args.seed);
    let dataset = build_one_to_many(&config, &mut rng);
    seeder.persist_relations(&dataset).await?;

    tracing::info!("Dummy data generated successfully");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    seed_data::logging::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Error seeding data: {e:#}");
            ExitCode::FAILURE
        }
    }
}
