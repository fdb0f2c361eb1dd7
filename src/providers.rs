//! Embedding capability providers.
//!
//! The semantic-phrase and visual-logo detectors need model inference that
//! this crate deliberately does not ship: a text-embedding model and an
//! image-embedding model. Both are consumed through the narrow traits below,
//! constructed once at startup and passed into [`crate::AnalyzerConfig`] /
//! [`crate::LogoDetector`] by the embedding host.
//!
//! Making the providers explicit objects (instead of lazily initialized
//! process globals) keeps every analysis deterministic under test: swap in a
//! table-driven mock and the detectors become pure functions.
//!
//! Providers are the only potentially slow calls an analysis makes, so every
//! method takes the caller's timeout. A provider that cannot answer within it
//! returns [`EmbedError::Timeout`]; the calling detector degrades to an empty
//! result instead of failing the analysis.

use std::time::Duration;

use thiserror::Error;

/// Failure of one embedding call.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// The provider did not answer within the caller-supplied timeout.
    #[error("embedding call exceeded {0:?}")]
    Timeout(Duration),

    /// The provider failed outright (model not loaded, backend down, ...).
    #[error("embedding provider failed: {0}")]
    Provider(String),
}

/// Produces a fixed-dimension vector for a text snippet.
///
/// Implementations must be deterministic: the same input yields the same
/// vector for the process lifetime. The phrase-embedding cache relies on this
/// to make concurrent recomputation harmless.
pub trait TextEmbedder: Send + Sync {
    fn embed(&self, text: &str, timeout: Duration) -> Result<Vec<f32>, EmbedError>;
}

/// Produces a fixed-dimension vector for an encoded image.
pub trait ImageEmbedder: Send + Sync {
    fn embed_image(&self, image: &[u8], timeout: Duration) -> Result<Vec<f32>, EmbedError>;
}

/// Cosine similarity of two vectors; 0.0 for mismatched or degenerate input.
pub(crate) fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 { 0.0 } else { dot / denom }
}

/// Scale `v` to unit length in place; zero vectors are left untouched.
pub(crate) fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
