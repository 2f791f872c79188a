//! Entity generators for seed data.
//!
//! - [`UserGenerator`]: flat users with contact and enrolment details
//! - [`LocationGenerator`]: sequentially numbered postal locations
//! - [`PersonGenerator`]: fallback names and biographies for catalog people

use rand::SeedableRng;
use rand::rngs::StdRng;

pub mod location;
pub mod person;
pub mod user;

pub use location::{GeneratedLocation, LocationGenerator, StreetAddress};
pub use person::PersonGenerator;
pub use user::{GeneratedUser, HomeAddress, UserGenConfig, UserGenerator};

/// Deterministic RNG when `seed` is given, OS-seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
