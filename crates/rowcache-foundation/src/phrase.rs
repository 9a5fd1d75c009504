//! Phrase generation for cell content.
//!
//! The layout pipeline treats phrase production as an opaque dependency:
//! anything that can turn a word count into a string. [`LoremGenerator`] is
//! the default implementation, backed by a seedable random stream so tests
//! can reproduce exact content.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Produces a phrase with the requested number of words.
pub trait PhraseSource: Send {
    fn phrase(&mut self, word_count: usize) -> String;
}

const LOREM_WORDS: &[&str] = &[
    "lorem",
    "ipsum",
    "dolor",
    "sit",
    "amet",
    "consectetur",
    "adipiscing",
    "elit",
    "sed",
    "do",
    "eiusmod",
    "tempor",
    "incididunt",
    "ut",
    "labore",
    "et",
    "dolore",
    "magna",
    "aliqua",
    "enim",
    "ad",
    "minim",
    "veniam",
    "quis",
    "nostrud",
    "exercitation",
    "ullamco",
    "laboris",
    "nisi",
    "aliquip",
    "ex",
    "ea",
    "commodo",
    "consequat",
];

/// Lorem-ipsum phrase generator with an owned random stream.
pub struct LoremGenerator {
    rng: StdRng,
}

impl LoremGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generator with a fixed seed; identical seeds produce identical
    /// phrase streams.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for LoremGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PhraseSource for LoremGenerator {
    fn phrase(&mut self, word_count: usize) -> String {
        let mut phrase = String::new();
        for position in 0..word_count {
            let word = LOREM_WORDS.choose(&mut self.rng).copied().unwrap_or("lorem");
            if position == 0 {
                // Sentence case for the leading word.
                let mut chars = word.chars();
                if let Some(first) = chars.next() {
                    phrase.extend(first.to_uppercase());
                    phrase.push_str(chars.as_str());
                }
            } else {
                phrase.push(' ');
                phrase.push_str(word);
            }
        }
        phrase.push('.');
        phrase
    }
}
