//! Semantic-phrase detection.
//!
//! Embedding-similarity backstop for paraphrases with no lexical overlap with
//! any canonical phrase ("one more spin and I'm even" vs "chase losses").
//! Requires a [`TextEmbedder`] capability; deployments without one simply run
//! without this signal.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::detect::DetectorOutcome;
use crate::providers::{EmbedError, TextEmbedder, cosine};
use crate::registry::phrases::{self, PhraseSet};

/// Default cosine-similarity threshold for a phrase to fire.
pub(crate) const DEFAULT_THRESHOLD: f32 = 0.7;

/// Matches input text against canonical phrase embeddings.
///
/// Phrase embeddings are computed lazily, cached per label for the detector's
/// lifetime, and shared across analyses. A race on first use may compute a
/// label's embeddings twice; the later write overwrites with identical values
/// (providers are deterministic), so no coordination beyond the lock is
/// needed.
pub(crate) struct SemanticDetector {
    embedder: Arc<dyn TextEmbedder>,
    threshold: f32,
    cache: RwLock<HashMap<&'static str, Vec<Vec<f32>>>>,
}

impl SemanticDetector {
    pub(crate) fn new(embedder: Arc<dyn TextEmbedder>, threshold: f32) -> Self {
        Self { embedder, threshold, cache: RwLock::new(HashMap::new()) }
    }

    /// Detect semantic-phrase labels in `text`.
    ///
    /// Any provider failure (including timeout) degrades the whole run to
    /// [`DetectorOutcome::Unavailable`]; a partially embedded phrase table
    /// must not masquerade as "no hits".
    pub(crate) fn detect(&self, text: &str, timeout: Duration) -> DetectorOutcome {
        self.detect_in(text, phrases::SEMANTIC_PHRASES, timeout)
    }

    pub(crate) fn detect_in(&self, text: &str, sets: &[PhraseSet], timeout: Duration) -> DetectorOutcome {
        if text.trim().is_empty() {
            return DetectorOutcome::Hits(BTreeSet::new());
        }

        let query = match self.embedder.embed(text, timeout) {
            Ok(vector) => vector,
            Err(err) => {
                tracing::warn!(%err, "semantic detector unavailable");
                return DetectorOutcome::Unavailable;
            }
        };

        let mut fired = BTreeSet::new();
        for set in sets {
            let embeddings = match self.phrase_embeddings(set, timeout) {
                Ok(embeddings) => embeddings,
                Err(err) => {
                    tracing::warn!(label = set.label, %err, "semantic detector unavailable");
                    return DetectorOutcome::Unavailable;
                }
            };

            if embeddings.iter().any(|e| cosine(&query, e) >= self.threshold) {
                fired.insert(set.label);
            }
        }

        DetectorOutcome::Hits(fired)
    }

    /// Cached embeddings for one phrase set, computing them on first use.
    ///
    /// The provider call happens outside the lock so a slow model never
    /// blocks readers of already-cached labels.
    fn phrase_embeddings(&self, set: &PhraseSet, timeout: Duration) -> Result<Vec<Vec<f32>>, EmbedError> {
        if let Some(cached) = read_lock(&self.cache).get(set.label) {
            return Ok(cached.clone());
        }

        let computed: Vec<Vec<f32>> =
            set.phrases.iter().map(|p| self.embedder.embed(p, timeout)).collect::<Result<_, _>>()?;
        write_lock(&self.cache).insert(set.label, computed.clone());
        Ok(computed)
    }
}

// A poisoned lock only means another thread panicked mid-insert; the map
// itself is still valid, so recover the guard instead of propagating.
fn read_lock<'a, T>(lock: &'a RwLock<T>) -> RwLockReadGuard<'a, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<'a, T>(lock: &'a RwLock<T>) -> RwLockWriteGuard<'a, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
