//! Per-cell content materialization.
//!
//! Cell content is randomized per index but must stay fixed once produced:
//! the size measured during the population sweep is only valid if the cell
//! later renders the exact same content. [`ContentProvider`] therefore
//! memoizes each index's content on first request and serves the memoized
//! value on every revisit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::phrase::PhraseSource;

/// Number of phrases pregenerated into the shared pool.
pub const PHRASE_POOL_SIZE: usize = 100;

/// Smallest number of feature strings any cell gets.
const MIN_FEATURES: usize = 5;

/// Random spread added on top of [`MIN_FEATURES`] when picking a cell's
/// feature count.
const FEATURE_SPREAD: usize = 10;

/// Feature strings for one cell; small enough to usually stay inline.
pub type FeatureList = SmallVec<[String; 8]>;

/// Materialized content for one cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellContent {
    pub title: String,
    pub features: FeatureList,
}

struct ProviderInner {
    rng: StdRng,
    cells: HashMap<usize, Arc<CellContent>>,
}

/// Pregenerated phrase pool plus the per-index content cache.
///
/// Shared between the background measurement context and live cell binding;
/// the pool is immutable after construction and the memoization table sits
/// behind a mutex.
pub struct ContentProvider {
    pool: Vec<String>,
    inner: Mutex<ProviderInner>,
}

impl ContentProvider {
    pub fn new(source: &mut dyn PhraseSource) -> Self {
        Self::with_rng(source, StdRng::from_entropy())
    }

    /// Provider with a fixed random stream for the phrase-length and
    /// feature-count draws. Combined with a seeded [`PhraseSource`], this
    /// makes content fully deterministic.
    pub fn with_rng(source: &mut dyn PhraseSource, mut rng: StdRng) -> Self {
        // Phrase i draws its word count from 5..5+i, so later pool entries
        // tend to be longer.
        let pool = (1..=PHRASE_POOL_SIZE)
            .map(|i| source.phrase(rng.gen_range(0..i) + MIN_FEATURES))
            .collect();
        Self {
            pool,
            inner: Mutex::new(ProviderInner {
                rng,
                cells: HashMap::new(),
            }),
        }
    }

    /// Content for `index`, materialized on first request and memoized.
    ///
    /// A cell's features are a reversed prefix of the phrase pool with a
    /// random length; the draw happens exactly once per index.
    pub fn content_for(&self, index: usize) -> Arc<CellContent> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(content) = inner.cells.get(&index) {
            return Arc::clone(content);
        }

        let feature_count = inner.rng.gen_range(0..FEATURE_SPREAD) + MIN_FEATURES;
        let features: FeatureList = self.pool[..feature_count].iter().rev().cloned().collect();
        let content = Arc::new(CellContent {
            title: format!("Cell {index}"),
            features,
        });
        inner.cells.insert(index, Arc::clone(&content));
        log::trace!("materialized content for cell {index} ({feature_count} features)");
        content
    }

    /// Number of indices with materialized content.
    pub fn materialized_count(&self) -> usize {
        self.inner.lock().unwrap().cells.len()
    }
}
