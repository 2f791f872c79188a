//! One-to-one seed script: every user owns exactly one location
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed-one-to-one
//! ```

use std::process::ExitCode;

use clap::Parser;
use seed_data::builders::build_one_to_one;
use seed_data::config::{DEFAULT_MONGO_URI, RelationConfig};
use seed_data::db::Seeder;
use seed_data::generators::seeded_rng;

#[derive(Debug, Parser)]
#[command(name = "seed-one-to-one")]
struct Args {
    #[arg(long, env = "MONGO_URI", default_value = DEFAULT_MONGO_URI)]
    mongo_uri: String,

    #[arg(long, env = "DB_NAME", default_value = "mydb")]
    database: String,

    /// Number of user/location pairs.
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// RNG seed for reproducible data.
    #[arg(long, env = "SEED")]
    seed: Option<u64>,
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = RelationConfig {
        database: args.database,
        user_count: args.count,
        location_count: args.count,
        ..RelationConfig::one_to_one()
    };

    let seeder = Seeder::connect(&args.mongo_uri, Some(&config.database)).await?;

    let mut rng = seeded_rng(args.seed);
    let dataset = build_one_to_one(&config, &mut rng);
    seeder.persist_relations(&dataset).await?;

    tracing::info!("User-location one-to-one data generated successfully");
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
