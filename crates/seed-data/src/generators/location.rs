//! Postal location generation.

use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, CountryName, StreetName, ZipCode};
use rand::Rng;
use serde::Serialize;

/// Street-level address embedded in a location document.
#[derive(Debug, Clone, Serialize)]
pub struct StreetAddress {
    pub street: String,
    pub city: String,
    pub country: String,
    pub zipcode: String,
}

/// Generated location document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLocation {
    #[serde(rename = "_id")]
    pub id: u32,
    /// Owning user, set only when the location belongs to exactly one user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u32>,
    pub address: StreetAddress,
}

/// Generates locations with sequential ids.
pub struct LocationGenerator {
    country: Option<String>,
}

impl LocationGenerator {
    /// Creates a generator that picks a random country per address.
    pub fn new() -> Self {
        Self { country: None }
    }

    /// Uses the same country for every generated address.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Generates a single location with the given id.
    pub fn generate(&self, id: u32, rng: &mut impl Rng) -> GeneratedLocation {
        GeneratedLocation {
            id,
            user_id: None,
            address: self.generate_address(rng),
        }
    }

    /// Generates locations with ids `1..=count`.
    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedLocation> {
        (1..=count as u32).map(|id| self.generate(id, rng)).collect()
    }

    fn generate_address(&self, rng: &mut impl Rng) -> StreetAddress {
        let number: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);
        let city: String = CityName().fake_with_rng(rng);
        let country = match &self.country {
            Some(country) => country.clone(),
            None => CountryName().fake_with_rng(rng),
        };
        let zipcode: String = ZipCode().fake_with_rng(rng);

        StreetAddress {
            street: format!("{number} {street}"),
            city,
            country,
            zipcode,
        }
    }
}

impl Default for LocationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_ids_are_sequential() {
        let mut rng = rand::thread_rng();
        let locations = LocationGenerator::new().generate_batch(5, &mut rng);

        let ids: Vec<u32> = locations.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(locations.iter().all(|l| l.user_id.is_none()));
    }

    #[test]
    fn test_fixed_country() {
        let mut rng = rand::thread_rng();
        let locations = LocationGenerator::new()
            .with_country("Cambodia")
            .generate_batch(10, &mut rng);

        assert!(locations.iter().all(|l| l.address.country == "Cambodia"));
        assert!(locations.iter().all(|l| !l.address.street.is_empty()));
    }

    #[test]
    fn test_document_uses_underscore_id() {
        let mut rng = rand::thread_rng();
        let mut location = LocationGenerator::new().generate(3, &mut rng);
        let doc = bson::to_document(&location).unwrap();
        assert_eq!(doc.get_i64("_id").ok().or(doc.get_i32("_id").ok().map(i64::from)), Some(3));
        assert!(!doc.contains_key("userId"));

        location.user_id = Some(3);
        let doc = bson::to_document(&location).unwrap();
        assert!(doc.contains_key("userId"));
    }
}
