//! Filler data for people pulled from an external catalog.

use std::ops::Range;

use fake::Fake;
use fake::faker::lorem::en::Paragraph;
use fake::faker::name::en::Name;
use rand::Rng;

/// Fills in the parts of a person record the catalog does not provide.
pub struct PersonGenerator {
    bio_sentences: Range<usize>,
}

impl PersonGenerator {
    /// Biographies of one to three sentences.
    pub fn new() -> Self {
        Self { bio_sentences: 1..4 }
    }

    /// Sets the sentence count range for biographies.
    pub fn with_bio_sentences(mut self, sentences: Range<usize>) -> Self {
        self.bio_sentences = sentences;
        self
    }

    /// Returns `name` when present and non-blank, otherwise a fake full name.
    pub fn name_or_fake(&self, name: Option<&str>, rng: &mut impl Rng) -> String {
        match name.map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => Name().fake_with_rng(rng),
        }
    }

    /// Generates a lorem-ipsum biography paragraph.
    pub fn biography(&self, rng: &mut impl Rng) -> String {
        Paragraph(self.bio_sentences.clone()).fake_with_rng(rng)
    }
}

impl Default for PersonGenerator {
    fn default() -> Self {
        Self::new()
    }
}
