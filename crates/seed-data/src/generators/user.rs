//! Flat user generation (students with contact details and enrolment data).

use bson::DateTime;
use fake::faker::address::en::{CityName, CountryName};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::PhoneNumber;
use fake::{Dummy, Fake, Faker};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use time::{Duration, OffsetDateTime};

/// Majors a generated user can be enrolled in.
pub const MAJORS: [&str; 6] = [
    "IT",
    "Design",
    "Digital Marketing",
    "Law",
    "Accounting",
    "Bus",
];

/// City/country pair embedded in a user document.
#[derive(Debug, Clone, Serialize, Dummy)]
pub struct HomeAddress {
    #[dummy(faker = "CityName()")]
    pub city: String,
    #[dummy(faker = "CountryName()")]
    pub country: String,
}

/// Generated user document ready for insertion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedUser {
    pub name: String,
    pub email: String,
    pub age: u8,
    pub phone: String,
    pub gpa: f64,
    pub address: HomeAddress,
    pub major: String,
    pub registered_at: DateTime,
    pub is_active: bool,
}

/// Configuration for user generation.
#[derive(Debug, Clone)]
pub struct UserGenConfig {
    pub min_age: u8,
    pub max_age: u8,
    pub min_gpa: f64,
    pub max_gpa: f64,
    /// Registration dates fall within this many days before now.
    pub registered_within_days: i64,
}

impl Default for UserGenConfig {
    fn default() -> Self {
        Self {
            min_age: 16,
            max_age: 40,
            min_gpa: 2.2,
            max_gpa: 3.8,
            registered_within_days: 365,
        }
    }
}

/// Generates flat user documents.
pub struct UserGenerator {
    config: UserGenConfig,
}

impl UserGenerator {
    /// Creates a new user generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: UserGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: UserGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single user.
    pub fn generate(&self, rng: &mut impl Rng) -> GeneratedUser {
        let name: String = Name().fake_with_rng(rng);
        let email: String = SafeEmail().fake_with_rng(rng);
        let phone: String = PhoneNumber().fake_with_rng(rng);
        let address: HomeAddress = Faker.fake_with_rng(rng);

        let age = rng.gen_range(self.config.min_age..=self.config.max_age);
        let gpa = round_to_hundredths(rng.gen_range(self.config.min_gpa..=self.config.max_gpa));
        let major = MAJORS
            .choose(rng)
            .copied()
            .unwrap_or(MAJORS[0])
            .to_string();

        GeneratedUser {
            name,
            email,
            age,
            phone,
            gpa,
            address,
            major,
            registered_at: self.generate_registration(rng),
            is_active: rng.gen_bool(0.5),
        }
    }

    /// Generates multiple users.
    pub fn generate_batch(&self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedUser> {
        (0..count).map(|_| self.generate(rng)).collect()
    }

    /// Picks a registration instant within the configured window before now.
    fn generate_registration(&self, rng: &mut impl Rng) -> DateTime {
        let window = Duration::days(self.config.registered_within_days.max(1)).whole_seconds();
        let at = OffsetDateTime::now_utc() - Duration::seconds(rng.gen_range(1..=window));
        DateTime::from_time_0_3(at)
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generate_user() {
        let user_gen = UserGenerator::new();
        let mut rng = rand::thread_rng();
        let user = user_gen.generate(&mut rng);

        assert!(!user.name.is_empty());
        assert!(user.email.contains('@'));
        assert!((16..=40).contains(&user.age));
        assert!((2.2..=3.8).contains(&user.gpa));
        assert!(MAJORS.contains(&user.major.as_str()));
        assert!(user.registered_at < DateTime::now());
    }

    #[test]
    fn test_generate_batch() {
        let user_gen = UserGenerator::new();
        let mut rng = rand::thread_rng();
        let users = user_gen.generate_batch(10, &mut rng);

        assert_eq!(users.len(), 10);
    }

    #[test]
    fn test_custom_age_range() {
        let user_gen = UserGenerator::with_config(UserGenConfig {
            min_age: 18,
            max_age: 18,
            ..UserGenConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(3);

        assert!(user_gen.generate_batch(20, &mut rng).iter().all(|u| u.age == 18));
    }

    #[test]
    fn test_gpa_has_two_decimals() {
        let user_gen = UserGenerator::new();
        let mut rng = StdRng::seed_from_u64(7);

        for user in user_gen.generate_batch(50, &mut rng) {
            let scaled = user.gpa * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn test_serialized_field_names() {
        let mut rng = StdRng::seed_from_u64(1);
        let user = UserGenerator::new().generate(&mut rng);
        let doc = bson::to_document(&user).unwrap();

        assert!(doc.contains_key("registeredAt"));
        assert!(doc.contains_key("isActive"));
        assert!(doc.get_document("address").unwrap().contains_key("city"));
    }
}
