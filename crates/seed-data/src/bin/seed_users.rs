//! Flat users seed script
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed-users -- 100
//! ```

use std::process::ExitCode;

use clap::Parser;
use seed_data::config::{DEFAULT_MONGO_URI, UserSeedConfig};
use seed_data::db::Seeder;
use seed_data::generators::{UserGenerator, seeded_rng};

/// Inserts fake users into a single collection.
#[derive(Debug, Parser)]
#[command(name = "seed-users")]
struct Args {
    /// Number of users to generate.
    #[arg(default_value_t = 20)]
    count: usize,

    #[arg(long, env = "MONGO_URI", default_value = DEFAULT_MONGO_URI)]
    mongo_uri: String,

    #[arg(long, env = "DB_NAME", default_value = "mydb")]
    database: String,

    #[arg(long, env = "COLL", default_value = "users")]
    collection: String,

    /// Empty the collection before inserting.
    #[arg(long)]
    clean: bool,

    /// RNG seed for reproducible data.
    #[arg(long, env = "SEED")]
    seed: Option<u64>,
}

impl Args {
    fn seed_config(&self) -> UserSeedConfig {
        UserSeedConfig {
            count: self.count,
            database: self.database.clone(),
            collection: self.collection.clone(),
            clean: self.clean,
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.seed_config();
    let seeder = Seeder::connect(&args.mongo_uri, Some(&config.database)).await?;

    let mut rng = seeded_rng(args.seed);
    let users = UserGenerator::new().generate_batch(config.count, &mut rng);

    seeder
        .seed_users(&config.collection, &users, config.clean)
        .await?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    seed_data::logging::init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
