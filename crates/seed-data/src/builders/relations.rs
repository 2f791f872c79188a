//! One-to-one and one-to-many user/location scenarios.

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::config::RelationConfig;
use crate::generators::{GeneratedLocation, LocationGenerator};

/// Account status of a linked user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// How a user points at its locations.
#[derive(Debug, Clone, Serialize)]
pub enum LocationRef {
    #[serde(rename = "locationId")]
    One(u32),
    #[serde(rename = "locationIds")]
    Many(Vec<u32>),
}

/// User document that references location documents by id.
#[derive(Debug, Clone, Serialize)]
pub struct LinkedUser {
    #[serde(rename = "_id")]
    pub id: u32,
    pub name: String,
    pub email: String,
    pub status: UserStatus,
    #[serde(flatten)]
    pub locations: LocationRef,
}

impl LinkedUser {
    fn generate(id: u32, locations: LocationRef, rng: &mut impl Rng) -> Self {
        Self {
            id,
            name: Name().fake_with_rng(rng),
            email: SafeEmail().fake_with_rng(rng),
            status: UserStatus::random(rng),
            locations,
        }
    }

    /// Referenced location ids, whichever shape they are stored in.
    pub fn location_ids(&self) -> &[u32] {
        match &self.locations {
            LocationRef::One(id) => std::slice::from_ref(id),
            LocationRef::Many(ids) => ids,
        }
    }
}

/// Locations plus the users that reference them.
#[derive(Debug, Clone)]
pub struct RelationDataset {
    pub locations: Vec<GeneratedLocation>,
    pub users: Vec<LinkedUser>,
}

fn location_generator(config: &RelationConfig) -> LocationGenerator {
    match &config.country {
        Some(country) => LocationGenerator::new().with_country(country.clone()),
        None => LocationGenerator::new(),
    }
}

/// Builds one location per user; location `n` is owned by user `n` and vice versa.
///
/// Only `user_count` and `country` are read from the config.
pub fn build_one_to_one(config: &RelationConfig, rng: &mut impl Rng) -> RelationDataset {
    let mut locations = location_generator(config).generate_batch(config.user_count, rng);
    for location in &mut locations {
        location.user_id = Some(location.id);
    }

    let users = locations
        .iter()
        .map(|location| {
            let owner = location.user_id.unwrap_or(location.id);
            LinkedUser::generate(owner, LocationRef::One(location.id), rng)
        })
        .collect();

    RelationDataset { locations, users }
}

/// Builds a shared pool of locations and lets every user reference a random
/// subset of it. Ids within one user are distinct.
pub fn build_one_to_many(config: &RelationConfig, rng: &mut impl Rng) -> RelationDataset {
    let locations = location_generator(config).generate_batch(config.location_count, rng);
    let pool: Vec<u32> = locations.iter().map(|l| l.id).collect();

    let min = *config.locations_per_user.start();
    let max = (*config.locations_per_user.end()).max(min);

    let users = (1..=config.user_count as u32)
        .map(|id| {
            let wanted = rng.gen_range(min..=max).min(pool.len());
            let picked: Vec<u32> = pool.choose_multiple(rng, wanted).copied().collect();
            LinkedUser::generate(id, LocationRef::Many(picked), rng)
        })
        .collect();

    RelationDataset { locations, users }
}
